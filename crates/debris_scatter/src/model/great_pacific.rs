//! Published Great Pacific Garbage Patch survey tables.
//!
//! Concentrations are the mean mass and number concentrations from Lebreton et al. (2018),
//! Sci. Rep. 8:4666, Table 2. Compositions average the polymer shares of the supplementary
//! Table 3 within each size class; whatever is left to 1.0 is unidentified polymer.
use super::ConcentrationModel;

use super::MaterialCategory::{F, H, N, P};
use super::SizeClass::{Macro, Mega, Meso, Micro};

/// Published mean mass concentration over all buckets, kg/km².
pub const GREAT_PACIFIC_TOTAL_MASS: f64 = 69.58;
/// Published mean number concentration over all buckets, #/km².
pub const GREAT_PACIFIC_TOTAL_COUNT: f64 = 700_886.0;

impl ConcentrationModel {
    /// The Great Pacific Garbage Patch dataset.
    ///
    /// Megaplastics have no upper bound in the survey; they are capped at 2 m here. Densities are
    /// nominal solid-polymer values in kg/m³. PVC sinks in seawater, so it shares the PS density
    /// to keep every generated piece buoyant.
    pub fn great_pacific() -> Self {
        ConcentrationModel::new()
            .with_size_range(Micro, 0.05, 0.5)
            .with_size_range(Meso, 0.5, 5.0)
            .with_size_range(Macro, 5.0, 50.0)
            .with_size_range(Mega, 50.0, 200.0)
            .with_density("PE", 920.0)
            .with_density("PP", 900.5)
            .with_density("PS", 1005.0)
            .with_density("PVC", 1005.0)
            // Micro
            .with_concentration(Micro, H, 2.33, 643_930.0)
            .with_concentration(Micro, N, 0.041, 19_873.0)
            .with_concentration(Micro, P, 0.13, 14_362.0)
            .with_concentration(Micro, F, 0.001, 216.0)
            .with_composition(Micro, H, [("PE", 0.95), ("PP", 0.05)])
            .with_composition(Micro, N, [("PE", 0.50), ("PP", 0.50)])
            .with_composition(Micro, P, [("PE", 1.00)])
            .with_composition(Micro, F, [("PE", 0.30), ("PS", 0.60)])
            // Meso
            .with_concentration(Meso, H, 3.68, 20_993.0)
            .with_concentration(Meso, N, 0.23, 803.0)
            .with_concentration(Meso, P, 0.0003, 3.6)
            .with_concentration(Meso, F, 0.003, 12.0)
            .with_composition(Meso, H, [("PE", 0.75), ("PP", 0.25)])
            .with_composition(Meso, N, [("PE", 0.70), ("PP", 0.30)])
            .with_composition(Meso, P, [("PE", 1.00)])
            .with_composition(
                Meso,
                F,
                [("PE", 0.40), ("PP", 0.05), ("PS", 0.40), ("PVC", 0.10)],
            )
            // Macro
            .with_concentration(Macro, H, 15.53, 640.0)
            .with_concentration(Macro, N, 1.27, 49.0)
            .with_concentration(Macro, P, 0.0, 0.0)
            .with_concentration(Macro, F, 0.021, 0.7)
            .with_composition(Macro, H, [("PE", 0.55), ("PP", 0.45)])
            .with_composition(Macro, N, [("PE", 0.65), ("PP", 0.35)])
            .with_composition(
                Macro,
                F,
                [("PE", 0.50), ("PP", 0.05), ("PS", 0.15), ("PVC", 0.10)],
            )
            // Mega
            .with_concentration(Mega, H, 3.52, 0.3)
            .with_concentration(Mega, N, 42.82, 3.3)
            .with_concentration(Mega, P, 0.0, 0.0)
            .with_concentration(Mega, F, 0.0, 0.0)
            .with_composition(Mega, H, [("PE", 0.60), ("PP", 0.40)])
            .with_composition(Mega, N, [("PE", 0.80), ("PP", 0.10)])
            .with_reference_total(GREAT_PACIFIC_TOTAL_MASS, GREAT_PACIFIC_TOTAL_COUNT)
    }
}

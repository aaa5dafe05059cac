//! Summaries of generated fields and expected collection rates.
//!
//! [`tally`] counts what a generation run produced per bucket. [`expected_collection`] works from
//! the concentration tables alone and estimates how much mass a collection vessel would gather
//! per kilometer travelled.
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::{Bucket, ConcentrationModel, SizeClass};
use crate::scatter::particle::Particle;

/// Count and mass of particles in one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BucketTally {
    pub count: usize,
    pub mass_kg: f64,
}

/// Per-bucket counts and masses, ordered by size class then category.
pub fn tally(particles: &[Particle]) -> BTreeMap<Bucket, BucketTally> {
    let mut out: BTreeMap<Bucket, BucketTally> = BTreeMap::new();
    for p in particles {
        let entry = out.entry(p.bucket()).or_default();
        entry.count += 1;
        entry.mass_kg += p.mass;
    }
    out
}

/// Collection vessel and debris sensor parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectorParams {
    /// Width of the conveyor opening that sweeps up small debris, m.
    pub opening_width_m: f64,
    /// Fraction of a target's geometric cross-section that backscatters to the sensor.
    pub backscatter_scaling: f64,
    /// Object size the sensor just detects at `reference_range_m`, m.
    pub reference_size_m: f64,
    /// Range at which `reference_size_m` is just detectable, m.
    pub reference_range_m: f64,
    /// Horizontal sensor field of view, degrees.
    pub field_of_view_deg: f64,
    /// Cruising speed, m/s.
    pub speed_m_per_s: f64,
}

impl Default for CollectorParams {
    fn default() -> Self {
        Self {
            opening_width_m: 4.5,
            backscatter_scaling: 0.5,
            reference_size_m: 1.0,
            reference_range_m: 60.0,
            field_of_view_deg: 130.0,
            speed_m_per_s: 1.5,
        }
    }
}

/// Expected collected mass per distance travelled.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectionEstimate {
    /// Meso- and macroplastic swept through the opening, kg/km.
    pub small_kg_per_km: f64,
    /// Megaplastic detected and steered to, kg/km.
    pub mega_kg_per_km: f64,
    /// Effective megaplastic swath, m.
    pub mega_swath_m: f64,
    /// Sum of both, kg/km.
    pub total_kg_per_km: f64,
    /// Total at cruising speed, kg/h.
    pub total_kg_per_hour: f64,
}

/// Mean detection range over log-uniform sizes in `[min_m, max_m)`.
///
/// A target of size `D` is detectable while `D² / r⁴` stays above the sensor threshold `k`,
/// i.e. out to `r = (D²/k)^¼`. The result is projected onto the beam axis by `sin(FOV / 2)`.
pub fn mean_detection_range(params: &CollectorParams, min_m: f64, max_m: f64) -> f64 {
    let k = params.reference_size_m.powi(2)
        / params.reference_range_m.powi(4)
        / params.backscatter_scaling;
    let log_span = max_m.log10() - min_m.log10();
    if log_span <= 0.0 {
        return (min_m.powi(2) / k).powf(0.25);
    }
    let range = 2.0 * ((max_m.powi(2) / k).powf(0.25) - (min_m.powi(2) / k).powf(0.25))
        / (std::f64::consts::LN_10 * log_span);
    range * (params.field_of_view_deg / 2.0).to_radians().sin()
}

/// Estimate collected mass per kilometer at `scale` times the model's mean concentrations.
pub fn expected_collection(
    model: &ConcentrationModel,
    params: &CollectorParams,
    scale: f64,
) -> CollectionEstimate {
    let small_conc = model.class_mass_concentration(SizeClass::Meso)
        + model.class_mass_concentration(SizeClass::Macro);
    let mega_conc = model.class_mass_concentration(SizeClass::Mega);

    let mega_swath_m = match model.size_range_cm(SizeClass::Mega) {
        Some(range) => {
            let (lo, hi) = range.meters();
            2.0 * mean_detection_range(params, lo, hi)
        }
        None => 0.0,
    };

    let small_kg_per_km = scale * (params.opening_width_m / 1000.0) * small_conc;
    let mega_kg_per_km = scale * (mega_swath_m / 1000.0) * mega_conc;
    let total_kg_per_km = small_kg_per_km + mega_kg_per_km;
    CollectionEstimate {
        small_kg_per_km,
        mega_kg_per_km,
        mega_swath_m,
        total_kg_per_km,
        total_kg_per_hour: total_kg_per_km * params.speed_m_per_s / 1000.0 * 3600.0,
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;
    use crate::model::MaterialCategory;

    fn particle(size_class: SizeClass, category: MaterialCategory, mass: f64) -> Particle {
        Particle {
            position: DVec2::ZERO,
            size: 1.0,
            mass,
            density: 920.0,
            size_class,
            category,
            material: None,
        }
    }

    #[test]
    fn tally_groups_by_bucket() {
        let particles = vec![
            particle(SizeClass::Mega, MaterialCategory::N, 2.0),
            particle(SizeClass::Meso, MaterialCategory::H, 0.5),
            particle(SizeClass::Mega, MaterialCategory::N, 3.0),
        ];
        let t = tally(&particles);
        assert_eq!(t.len(), 2);
        let nets = t[&Bucket::new(SizeClass::Mega, MaterialCategory::N)];
        assert_eq!(nets.count, 2);
        assert!((nets.mass_kg - 5.0).abs() < 1e-12);
        assert_eq!(
            t.keys().next(),
            Some(&Bucket::new(SizeClass::Meso, MaterialCategory::H))
        );
    }

    #[test]
    fn detection_range_matches_closed_form() {
        let params = CollectorParams::default();
        let k = 1.0 / 60f64.powi(4) / 0.5;
        let expected = 2.0 * ((4.0 / k).powf(0.25) - (0.25 / k).powf(0.25))
            / (10f64.ln() * (2.0f64.log10() - 0.5f64.log10()))
            * 65f64.to_radians().sin();
        assert!((mean_detection_range(&params, 0.5, 2.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn collection_scales_linearly() {
        let model = ConcentrationModel::great_pacific();
        let params = CollectorParams::default();
        let mean = expected_collection(&model, &params, 1.0);
        let hot = expected_collection(&model, &params, model.default_scale());

        let small_conc = 3.68 + 0.23 + 0.0003 + 0.003 + 15.53 + 1.27 + 0.021;
        assert!((mean.small_kg_per_km - 0.0045 * small_conc).abs() < 1e-9);
        assert!(mean.mega_swath_m > 0.0);
        assert!((hot.total_kg_per_km / mean.total_kg_per_km - model.default_scale()).abs() < 1e-9);
        assert!(
            (mean.total_kg_per_hour - mean.total_kg_per_km * 1.5 * 3.6).abs() < 1e-9
        );
    }
}

//! Hand-placed megaplastic net layout for reproducible demos and tests.
//!
//! The layout ignores randomness and the requested size classes. Masses come from the
//! bucket's expected volume instead of a sampled one, so they do not depend on any seed.
use glam::DVec2;

use crate::error::{Error, Result};
use crate::model::{ConcentrationModel, MaterialCategory, SizeClass};
use crate::sampling::size::mean_cubed_size;
use crate::scatter::particle::Particle;

/// Fixture positions (m) and sizes (m). All pieces are megaplastic nets.
pub const EXAMPLE_LAYOUT: [(f64, f64, f64); 7] = [
    (100.0, 16.0, 0.75),
    (110.0, 100.0, 0.75),
    (90.0, 100.0, 0.75),
    (115.0, 130.0, 1.00),
    (88.0, 170.0, 0.75),
    (115.0, 210.0, 2.50),
    (100.0, 240.0, 0.50),
];

const EXAMPLE_SIZE_CLASS: SizeClass = SizeClass::Mega;
const EXAMPLE_CATEGORY: MaterialCategory = MaterialCategory::N;

/// Build the fixture for an area of `extent` meters at `scale`.
///
/// Each piece gets `total_mass * size³ / implied_total_volume`, where the implied volume is the
/// expected per-piece volume of the size class times the bucket's target count. The density is
/// the composition-weighted average density of the bucket.
pub fn example_particles(
    model: &ConcentrationModel,
    extent: DVec2,
    scale: f64,
) -> Result<Vec<Particle>> {
    let bucket_name = format!("{EXAMPLE_SIZE_CLASS}/{}", EXAMPLE_CATEGORY.code());
    let concentration = model
        .concentration(EXAMPLE_SIZE_CLASS, EXAMPLE_CATEGORY)
        .filter(|c| c.count_per_km2 > 0.0)
        .ok_or_else(|| {
            Error::InvalidConfig(format!("fixture needs a non-zero {bucket_name} concentration"))
        })?;
    let range = model.size_range_cm(EXAMPLE_SIZE_CLASS).ok_or_else(|| {
        Error::InvalidConfig(format!("fixture needs a size range for {EXAMPLE_SIZE_CLASS}"))
    })?;
    if !(scale > 0.0) {
        return Err(Error::InvalidConfig(
            "fixture needs a positive scale".into(),
        ));
    }

    let area_km2 = (extent.x / 1000.0) * (extent.y / 1000.0);
    let total_mass = scale * concentration.mass_kg_per_km2 * area_km2;
    let target_count = scale * concentration.count_per_km2 * area_km2;
    let implied_total_volume = mean_cubed_size(range) * target_count;
    let density = model.average_density(EXAMPLE_SIZE_CLASS, EXAMPLE_CATEGORY);

    Ok(EXAMPLE_LAYOUT
        .iter()
        .map(|&(x, y, size)| Particle {
            position: DVec2::new(x, y),
            size,
            mass: total_mass * size.powi(3) / implied_total_volume,
            density,
            size_class: EXAMPLE_SIZE_CLASS,
            category: EXAMPLE_CATEGORY,
            material: None,
        })
        .collect())
}

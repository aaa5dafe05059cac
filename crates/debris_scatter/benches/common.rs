#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};
use debris_scatter::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const SAMPLE_SIZE: usize = 30;
pub const WARM_UP: Duration = Duration::from_millis(500);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(3);

pub fn survey_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

/// Square centered scene with a vessel-sized footprint at the origin.
pub fn vessel_scene(side_m: f64) -> GenerateConfig {
    GenerateConfig::new((side_m, side_m))
        .with_centered(true)
        .with_exclusion((0.0, 0.0), (20.0, 8.0))
}

/// Piece count of one seeded run, used as the throughput denominator.
pub fn pieces_per_run(model: &ConcentrationModel, config: &GenerateConfig, seed: u64) -> Throughput {
    let mut rng = StdRng::seed_from_u64(seed);
    let pieces = generate(model, config, &mut rng, None)
        .map(|r| r.particles.len())
        .unwrap_or(0);
    draws(pieces)
}

pub fn draws(n: usize) -> Throughput {
    Throughput::Elements(n.max(1) as u64)
}

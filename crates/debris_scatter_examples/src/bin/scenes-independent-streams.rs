use std::thread;

use debris_scatter::prelude::*;
use debris_scatter_examples::init_tracing;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

const BASE_SEED: u64 = 0x5EED;
const SCENES: u64 = 4;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let model = ConcentrationModel::great_pacific();
    let config = GenerateConfig::new((150.0, 150.0))
        .with_centered(true)
        .with_exclusion((0.0, 0.0), (10.0, 4.0));

    // Every scene owns its generator, so the threads share nothing mutable.
    let results: Vec<Result<GenerationResult>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..SCENES)
            .map(|scene| {
                let model = &model;
                let config = &config;
                scope.spawn(move || {
                    let mut rng = StdRng::seed_from_u64(seed_for_scene(BASE_SEED, scene));
                    generate(model, config, &mut rng, None)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|_| Err("scene thread panicked".into())))
            .collect()
    });

    for (scene, result) in results.into_iter().enumerate() {
        let result = result?;
        info!(
            "Scene {}: {} pieces, {:.3} kg, {} rejected draws.",
            scene,
            result.particles.len(),
            result.total_mass(),
            result.positions_rejected
        );
    }
    Ok(())
}

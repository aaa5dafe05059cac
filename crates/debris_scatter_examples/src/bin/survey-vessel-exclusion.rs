use debris_scatter::prelude::*;
use debris_scatter_examples::{init_tracing, print_tally};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let model = ConcentrationModel::great_pacific();

    // Vessel hull footprint at the center of a 200 m x 200 m scene.
    let config = GenerateConfig::new((200.0, 200.0))
        .with_centered(true)
        .with_exclusion((0.0, 0.0), (12.0, 4.5))
        .with_scale(model.default_scale() * 4.0);

    let sampler = DebrisSampler::try_new(config, &model)?;
    let mut sink = VecSink::new().ignoring(GenerationEventKind::ParticlePlaced);
    let mut rng = StdRng::seed_from_u64(2018);
    let result = sampler.generate_with_events(&mut rng, &mut sink)?;

    for event in sink.as_slice() {
        if let GenerationEvent::BucketFinished { summary } = event {
            println!(
                "{}: target {:.3} -> {} pieces, {:.4} kg, {} rejected draws",
                summary.bucket(),
                summary.target.count,
                summary.rounded.count,
                summary.rounded.mass_kg,
                summary.positions_rejected
            );
        }
    }
    print_tally(&model, &sampler.config.size_classes, &result.particles);

    let zone = sampler.config.exclusion;
    anyhow::ensure!(
        result.particles.iter().all(|p| !zone.contains(p.position)),
        "a particle landed inside the hull footprint"
    );
    Ok(())
}

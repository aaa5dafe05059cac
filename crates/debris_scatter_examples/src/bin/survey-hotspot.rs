use debris_scatter::prelude::*;
use debris_scatter_examples::{init_tracing, print_collection_estimate, print_tally};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let model = ConcentrationModel::great_pacific();
    let params = CollectorParams::default();

    print_collection_estimate(
        "Average over the survey area",
        &expected_collection(&model, &params, 1.0),
    );
    print_collection_estimate(
        "Most concentrated areas",
        &expected_collection(&model, &params, model.default_scale()),
    );

    // 100 m x 100 m patch at hotspot density (100 kg/km²), corner origin.
    let config = GenerateConfig::new((100.0, 100.0)).with_seed(7);
    let particles = generate_debris(&model, &config)?;
    print_tally(&model, &config.size_classes, &particles);

    Ok(())
}

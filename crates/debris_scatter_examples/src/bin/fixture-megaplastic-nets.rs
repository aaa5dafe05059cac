use debris_scatter::prelude::*;
use debris_scatter_examples::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let model = ConcentrationModel::great_pacific();
    let config = GenerateConfig::new((100.0, 100.0)).with_example(true);
    let particles = generate_debris(&model, &config)?;

    println!("{:>8} {:>8} {:>6} {:>10} {:>9}", "x (m)", "y (m)", "size", "mass (kg)", "density");
    for p in &particles {
        println!(
            "{:>8.1} {:>8.1} {:>6.2} {:>10.3} {:>9.1}",
            p.position.x, p.position.y, p.size, p.mass, p.density
        );
    }
    Ok(())
}

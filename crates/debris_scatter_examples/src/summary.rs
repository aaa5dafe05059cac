use debris_scatter::prelude::*;
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Print piece counts and masses for every bucket of the requested size classes.
pub fn print_tally(model: &ConcentrationModel, size_classes: &[SizeClass], particles: &[Particle]) {
    let counts = tally(particles);
    let mut shown: Vec<SizeClass> = size_classes.to_vec();
    for p in particles {
        if !shown.contains(&p.size_class) {
            shown.push(p.size_class);
        }
    }
    shown.sort();

    for size_class in shown {
        for category in MaterialCategory::ALL {
            let entry = counts
                .get(&Bucket::new(size_class, category))
                .copied()
                .unwrap_or_default();
            println!(
                "Number of {} of type {}: {} ({:.3} kg)",
                model.size_class_name(size_class),
                category,
                entry.count,
                entry.mass_kg
            );
        }
    }
    let total: f64 = particles.iter().map(|p| p.mass).sum();
    println!("Total: {} pieces, {:.3} kg", particles.len(), total);
}

/// Print an expected collection estimate under a heading.
pub fn print_collection_estimate(heading: &str, estimate: &CollectionEstimate) {
    println!("{heading}:");
    println!(
        "\tsmall trash mass collected per distance travelled: {:.4} kg/km",
        estimate.small_kg_per_km
    );
    println!(
        "\tmegaplastic mass collected per distance travelled: {:.4} kg/km (swath {:.1} m)",
        estimate.mega_kg_per_km, estimate.mega_swath_m
    );
    println!(
        "\ttotal mass collected per distance travelled: {:.4} kg/km",
        estimate.total_kg_per_km
    );
    println!(
        "\ttotal mass collection rate: {:.3} kg/h",
        estimate.total_kg_per_hour
    );
    println!();
}

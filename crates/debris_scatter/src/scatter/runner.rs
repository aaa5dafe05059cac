//! High-level sampler turning concentration tables into a debris field.
use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::{Bucket, ConcentrationModel, MaterialCategory, SizeClass, SizeRange};
use crate::sampling::{
    rand01, sample_log_uniform, ExclusionFilter, MaterialSampler, SamplingRegion,
};
use crate::scatter::bucket::{BucketSummary, BucketTarget};
use crate::scatter::config::GenerateConfig;
use crate::scatter::events::{EventSink, GenerationEvent, GenerationEventKind};
use crate::scatter::fixture::example_particles;
use crate::scatter::particle::{BucketBuilder, Particle, ParticleDraft};

/// Exclusion coverage above which rejection sampling is reported as wasteful.
pub const EXCLUSION_COVERAGE_WARNING: f64 = 0.5;

/// Result of a generation run.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct GenerationResult {
    /// Particles in bucket order: size classes as requested, categories H, N, P, F.
    pub particles: Vec<Particle>,
    /// One entry per sampled bucket, in the same order.
    pub buckets: Vec<BucketSummary>,
    /// Total position draws rejected by the exclusion zone.
    pub positions_rejected: usize,
}

impl GenerationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the particles and returns a new instance.
    pub fn with_particles(mut self, particles: Vec<Particle>) -> Self {
        self.particles = particles;
        self
    }

    pub fn total_mass(&self) -> f64 {
        self.particles.iter().map(|p| p.mass).sum()
    }

    /// Particles belonging to `bucket`.
    pub fn bucket_particles(&self, bucket: Bucket) -> impl Iterator<Item = &Particle> + '_ {
        self.particles.iter().filter(move |p| p.bucket() == bucket)
    }
}

/// Samples debris fields from a [`ConcentrationModel`].
pub struct DebrisSampler<'a> {
    /// Generation settings applied to this sampler.
    pub config: GenerateConfig,
    /// Dataset the sampler draws targets and compositions from.
    pub model: &'a ConcentrationModel,
}

impl<'a> DebrisSampler<'a> {
    /// Validates `config` and `model` and creates a sampler.
    pub fn try_new(config: GenerateConfig, model: &'a ConcentrationModel) -> Result<Self> {
        config.validate()?;
        model.validate()?;
        Ok(Self { config, model })
    }

    /// Generates with the given RNG.
    pub fn generate(&self, rng: &mut dyn RngCore) -> Result<GenerationResult> {
        generate(self.model, &self.config, rng, None)
    }

    pub fn generate_with_events(
        &self,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<GenerationResult> {
        generate(self.model, &self.config, rng, Some(sink))
    }

    /// Generates with an RNG seeded from the configuration, or from fresh entropy when unseeded.
    pub fn generate_seeded(&self) -> Result<GenerationResult> {
        match self.config.seed {
            Some(seed) => self.generate(&mut StdRng::seed_from_u64(seed)),
            None => self.generate(&mut rand::rng()),
        }
    }
}

/// Generates the particle list for `config`.
///
/// Uses the configured seed, or fresh entropy when unseeded. With `use_example` set the
/// fixed fixture is returned instead.
pub fn generate_debris(model: &ConcentrationModel, config: &GenerateConfig) -> Result<Vec<Particle>> {
    let result = match config.seed {
        Some(seed) => generate(model, config, &mut StdRng::seed_from_u64(seed), None)?,
        None => generate(model, config, &mut rand::rng(), None)?,
    };
    Ok(result.particles)
}

pub fn generate(
    model: &ConcentrationModel,
    config: &GenerateConfig,
    rng: &mut dyn RngCore,
    sink: Option<&mut dyn EventSink>,
) -> Result<GenerationResult> {
    if let Some(s) = sink {
        generate_with_events(model, config, rng, s)
    } else {
        generate_with_events(model, config, rng, &mut ())
    }
}

/// A bucket ready to sample: targets, size range and material sampler resolved.
struct PlannedBucket {
    target: BucketTarget,
    range: SizeRange,
    materials: MaterialSampler,
}

pub fn generate_with_events(
    model: &ConcentrationModel,
    config: &GenerateConfig,
    rng: &mut dyn RngCore,
    sink: &mut dyn EventSink,
) -> Result<GenerationResult> {
    config.validate()?;
    model.validate()?;

    let region = config.region();
    let scale = config.effective_scale(model);

    if config.use_example {
        return run_example(model, config, scale, sink);
    }

    let plan = plan_buckets(model, config, &region, scale, sink)?;

    if sink.wants(GenerationEventKind::RunStarted) {
        sink.send(GenerationEvent::RunStarted {
            config: config.clone(),
            bucket_count: plan.len(),
        });
    }
    info!(
        "Generating {:.1} x {:.1} m ({:.6} km²) at scale {:.4} | buckets: {}.",
        config.extent.x,
        config.extent.y,
        region.area_km2(),
        scale,
        plan.len(),
    );

    let filter = ExclusionFilter::new(config.exclusion)
        .with_max_attempts(config.max_position_attempts);

    let mut result = GenerationResult::new();
    for planned in &plan {
        let summary = sample_bucket(planned, &region, &filter, rng, sink, &mut result.particles)?;
        result.positions_rejected += summary.positions_rejected;
        result.buckets.push(summary);
    }

    if sink.wants(GenerationEventKind::RunFinished) {
        sink.send(GenerationEvent::RunFinished {
            particle_count: result.particles.len(),
            total_mass_kg: result.total_mass(),
            positions_rejected: result.positions_rejected,
        });
    }

    Ok(result)
}

/// Resolve every bucket before drawing anything, so configuration problems surface with no output.
fn plan_buckets(
    model: &ConcentrationModel,
    config: &GenerateConfig,
    region: &SamplingRegion,
    scale: f64,
    sink: &mut dyn EventSink,
) -> Result<Vec<PlannedBucket>> {
    if config.size_classes.is_empty() {
        warn!("No size classes requested; nothing to generate.");
        send_warning(sink, "config", "No size classes requested");
    }

    let coverage = config.exclusion.coverage(region);
    if coverage > EXCLUSION_COVERAGE_WARNING {
        warn!(
            "Exclusion zone covers {:.0}% of the sampling region; expect many rejected positions.",
            coverage * 100.0
        );
        send_warning(
            sink,
            "exclusion",
            &format!("Exclusion zone covers {:.0}% of the region", coverage * 100.0),
        );
    }

    let area_km2 = region.area_km2();
    let mut plan = Vec::new();
    let size_classes: BTreeSet<SizeClass> = config.size_classes.iter().copied().collect();
    for size_class in size_classes {
        let range = model.size_range_cm(size_class).ok_or_else(|| {
            Error::InvalidConfig(format!("no size range defined for {size_class}"))
        })?;
        for category in MaterialCategory::ALL {
            let bucket = Bucket::new(size_class, category);
            let Some(target) = BucketTarget::compute(model, bucket, area_km2, scale) else {
                continue;
            };
            let Some(materials) = MaterialSampler::for_bucket(model, bucket)? else {
                warn!("Bucket {} has a count target but no materials; skipping.", bucket);
                send_warning(
                    sink,
                    &format!("bucket:{bucket}"),
                    "Bucket has a count target but no materials; skipping",
                );
                continue;
            };
            plan.push(PlannedBucket {
                target,
                range,
                materials,
            });
        }
    }

    Ok(plan)
}

fn sample_bucket(
    planned: &PlannedBucket,
    region: &SamplingRegion,
    filter: &ExclusionFilter,
    rng: &mut dyn RngCore,
    sink: &mut dyn EventSink,
    out: &mut Vec<Particle>,
) -> Result<BucketSummary> {
    let bucket = planned.target.bucket;
    let rounded = planned.target.round(rand01(rng));

    if sink.wants(GenerationEventKind::BucketStarted) {
        sink.send(GenerationEvent::BucketStarted {
            target: planned.target,
            count: rounded.count,
        });
    }

    let mut builder = BucketBuilder::with_capacity(bucket, rounded.count);
    let mut rejected = 0;
    for _ in 0..rounded.count {
        let (position, rejections) = filter.sample_position(region, rng)?;
        rejected += rejections;
        let size = sample_log_uniform(planned.range, rng);
        let choice = planned.materials.sample(rng);
        builder.push(ParticleDraft {
            position,
            size,
            density: choice.density,
            material: Some(choice.material.clone()),
        });

        if sink.wants(GenerationEventKind::ParticlePlaced) {
            sink.send(GenerationEvent::ParticlePlaced {
                bucket,
                position,
                rejections,
            });
        }
    }

    debug!(
        "Bucket {}: target {:.4} pieces / {:.6} kg -> {} pieces / {:.6} kg.",
        bucket, planned.target.count, planned.target.mass_kg, rounded.count, rounded.mass_kg,
    );
    out.extend(builder.finish(rounded.mass_kg));

    let summary = BucketSummary {
        target: planned.target,
        rounded,
        positions_rejected: rejected,
    };
    if sink.wants(GenerationEventKind::BucketFinished) {
        sink.send(GenerationEvent::BucketFinished {
            summary: summary.clone(),
        });
    }

    Ok(summary)
}

fn run_example(
    model: &ConcentrationModel,
    config: &GenerateConfig,
    scale: f64,
    sink: &mut dyn EventSink,
) -> Result<GenerationResult> {
    let particles = example_particles(model, config.extent, scale)?;
    info!("Using the fixed example layout ({} pieces).", particles.len());

    if sink.wants(GenerationEventKind::RunStarted) {
        sink.send(GenerationEvent::RunStarted {
            config: config.clone(),
            bucket_count: 1,
        });
    }
    let result = GenerationResult::new().with_particles(particles);
    if sink.wants(GenerationEventKind::RunFinished) {
        sink.send(GenerationEvent::RunFinished {
            particle_count: result.particles.len(),
            total_mass_kg: result.total_mass(),
            positions_rejected: 0,
        });
    }
    Ok(result)
}

fn send_warning(sink: &mut dyn EventSink, context: &str, message: &str) {
    if sink.wants(GenerationEventKind::Warning) {
        sink.send(GenerationEvent::Warning {
            context: context.into(),
            message: message.into(),
        });
    }
}

#![forbid(unsafe_code)]
//! debris_scatter: synthesize marine plastic debris fields from empirical concentration tables.
//!
//! Modules:
//! - model: size classes, material categories, concentration and composition tables
//! - sampling: uniform, log-uniform and categorical draws, unbiased rounding, exclusion zones
//! - scatter: bucket targets, particle assembly, the sampler, events and the canned fixture
//! - report: per-bucket tallies and expected collection rates
pub mod error;
pub mod model;
pub mod report;
pub mod sampling;
pub mod scatter;

/// Convenient re-exports for common types. Import with `use debris_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::model::{
        Bucket, Concentration, ConcentrationModel, MaterialCategory, MaterialFraction, SizeClass,
        SizeRange,
    };
    pub use crate::report::{expected_collection, tally, CollectionEstimate, CollectorParams};
    pub use crate::sampling::{
        seed_for_scene, stochastic_round, ExclusionFilter, ExclusionZone, SamplingRegion,
    };
    pub use crate::scatter::bucket::{BucketSummary, BucketTarget, RoundedTarget};
    pub use crate::scatter::config::GenerateConfig;
    pub use crate::scatter::events::{
        EventSink, FnSink, GenerationEvent, GenerationEventKind, MultiSink, VecSink,
    };
    pub use crate::scatter::fixture::example_particles;
    pub use crate::scatter::particle::Particle;
    pub use crate::scatter::runner::{generate, generate_debris, DebrisSampler, GenerationResult};
}

//! Event types and sinks for observing generation runs.
//!
//! This module defines [`GenerationEvent`] and a set of sinks and adapters to emit,
//! collect, or forward events while executing [`crate::scatter::runner::DebrisSampler`]
//! or [`crate::scatter::runner::generate`].
use glam::DVec2;

use crate::model::Bucket;
use crate::scatter::bucket::{BucketSummary, BucketTarget};
use crate::scatter::config::GenerateConfig;

/// Describes events emitted during generation.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum GenerationEvent {
    /// Emitted once the configuration has been validated.
    RunStarted {
        /// The configuration used.
        config: GenerateConfig,
        /// Number of buckets with a non-zero count target.
        bucket_count: usize,
    },

    /// Emitted after the run completes.
    RunFinished {
        /// Number of particles produced.
        particle_count: usize,
        /// Sum of all particle masses in kg.
        total_mass_kg: f64,
        /// Position draws rejected by the exclusion zone.
        positions_rejected: usize,
    },

    /// Emitted when a bucket's count has been rounded and sampling begins.
    BucketStarted {
        /// Real-valued targets for the bucket.
        target: BucketTarget,
        /// Rounded piece count.
        count: usize,
    },

    /// Emitted when a bucket's masses have been assigned.
    BucketFinished {
        /// Targets, rounding and rejection counts for the bucket.
        summary: BucketSummary,
    },

    /// Emitted for each particle placed.
    ParticlePlaced {
        /// Bucket of the particle.
        bucket: Bucket,
        /// Accepted position.
        position: DVec2,
        /// Draws rejected before this position was accepted.
        rejections: usize,
    },

    /// Non-fatal warning generated during a run.
    Warning {
        /// Context string (e.g. bucket name).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`GenerationEvent`] used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationEventKind {
    RunStarted,
    RunFinished,
    BucketStarted,
    BucketFinished,
    ParticlePlaced,
    Warning,
}

impl GenerationEvent {
    pub fn kind(&self) -> GenerationEventKind {
        match self {
            GenerationEvent::RunStarted { .. } => GenerationEventKind::RunStarted,
            GenerationEvent::RunFinished { .. } => GenerationEventKind::RunFinished,
            GenerationEvent::BucketStarted { .. } => GenerationEventKind::BucketStarted,
            GenerationEvent::BucketFinished { .. } => GenerationEventKind::BucketFinished,
            GenerationEvent::ParticlePlaced { .. } => GenerationEventKind::ParticlePlaced,
            GenerationEvent::Warning { .. } => GenerationEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`GenerationEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: GenerationEvent);

    /// Whether the sink cares about events of `kind`. Lets the sampler skip building them.
    fn wants(&self, _kind: GenerationEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = GenerationEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: GenerationEvent) {}

    #[inline]
    fn wants(&self, _kind: GenerationEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally skipping some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<GenerationEvent>,
    ignored: Vec<GenerationEventKind>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            events: Vec::with_capacity(cap),
            ignored: Vec::new(),
        }
    }

    /// Do not record events of `kind`.
    pub fn ignoring(mut self, kind: GenerationEventKind) -> Self {
        self.ignored.push(kind);
        self
    }

    pub fn into_inner(self) -> Vec<GenerationEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[GenerationEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: GenerationEventKind) -> bool {
        !self.ignored.contains(&kind)
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: GenerationEvent) {
        if self.sinks.is_empty() {
            return;
        }
        let last_idx = self.sinks.len() - 1;
        for i in 0..last_idx {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last_idx].send(event);
    }

    fn wants(&self, kind: GenerationEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

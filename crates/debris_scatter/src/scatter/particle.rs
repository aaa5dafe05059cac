//! Generated debris particles and the per-bucket builder that assigns their masses.
use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::{Bucket, MaterialCategory, MaterialId, SizeClass};

/// A single piece of debris.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position in meters, in the caller's coordinate frame.
    pub position: DVec2,
    /// Linear size in meters.
    pub size: f64,
    /// Mass in kilograms.
    pub mass: f64,
    /// Density in kg/m³.
    pub density: f64,
    pub size_class: SizeClass,
    pub category: MaterialCategory,
    /// Raw material, if one was drawn. Fixture particles carry a bucket-averaged density instead.
    pub material: Option<MaterialId>,
}

impl Particle {
    pub fn bucket(&self) -> Bucket {
        Bucket::new(self.size_class, self.category)
    }

    /// Cube-law volume in m³.
    pub fn volume(&self) -> f64 {
        self.size.powi(3)
    }

    /// Rendering radius in meters.
    pub fn radius(&self) -> f64 {
        self.size * 0.5
    }
}

/// Geometry and material of a particle whose mass is not yet known.
#[derive(Debug, Clone)]
pub struct ParticleDraft {
    pub position: DVec2,
    pub size: f64,
    pub density: f64,
    pub material: Option<MaterialId>,
}

impl ParticleDraft {
    /// Relative mass weight: density × size³.
    pub fn weight(&self) -> f64 {
        self.density * self.size.powi(3)
    }
}

/// Collects the drafts of one bucket, then splits the bucket's mass among them.
#[derive(Debug)]
pub struct BucketBuilder {
    bucket: Bucket,
    drafts: Vec<ParticleDraft>,
    total_weight: f64,
}

impl BucketBuilder {
    pub fn new(bucket: Bucket) -> Self {
        Self::with_capacity(bucket, 0)
    }

    pub fn with_capacity(bucket: Bucket, capacity: usize) -> Self {
        Self {
            bucket,
            drafts: Vec::with_capacity(capacity),
            total_weight: 0.0,
        }
    }

    pub fn push(&mut self, draft: ParticleDraft) {
        self.total_weight += draft.weight();
        self.drafts.push(draft);
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Finalize the bucket so that particle masses sum to `total_mass`.
    ///
    /// Each particle receives `total_mass * weight / total_weight`.
    pub fn finish(self, total_mass: f64) -> Vec<Particle> {
        let Self {
            bucket,
            drafts,
            total_weight,
        } = self;
        let n = drafts.len();
        drafts
            .into_iter()
            .map(|d| {
                let mass = if total_weight > 0.0 {
                    total_mass * d.weight() / total_weight
                } else {
                    total_mass / n as f64
                };
                Particle {
                    position: d.position,
                    size: d.size,
                    mass,
                    density: d.density,
                    size_class: bucket.size_class,
                    category: bucket.category,
                    material: d.material,
                }
            })
            .collect()
    }
}

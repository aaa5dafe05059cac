//! Per-bucket mass and count targets.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::{Bucket, ConcentrationModel};
use crate::sampling::stochastic_round;

/// Real-valued mass and piece-count targets of a bucket over the survey area.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketTarget {
    pub bucket: Bucket,
    /// Target mass in kg.
    pub mass_kg: f64,
    /// Target piece count, not yet rounded.
    pub count: f64,
}

impl BucketTarget {
    /// Targets for `bucket` over `area_km2` at `scale`.
    ///
    /// Returns `None` when the bucket has no concentration entry or a zero count target,
    /// which means no debris rather than an error.
    pub fn compute(
        model: &ConcentrationModel,
        bucket: Bucket,
        area_km2: f64,
        scale: f64,
    ) -> Option<Self> {
        let c = model.concentration(bucket.size_class, bucket.category)?;
        let mass_kg = scale * c.mass_kg_per_km2 * area_km2;
        let count = scale * c.count_per_km2 * area_km2;
        if !(count > 0.0) {
            return None;
        }
        Some(Self {
            bucket,
            mass_kg,
            count,
        })
    }

    pub fn mass_per_piece(&self) -> f64 {
        self.mass_kg / self.count
    }

    /// Round the count with uniform draw `u` and rescale the mass to match.
    pub fn round(&self, u: f64) -> RoundedTarget {
        let count = stochastic_round(self.count, u);
        RoundedTarget {
            count,
            mass_kg: self.mass_per_piece() * count as f64,
        }
    }
}

/// Integer count and the mass consistent with it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedTarget {
    pub count: usize,
    pub mass_kg: f64,
}

/// Outcome of generating one bucket.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSummary {
    pub target: BucketTarget,
    pub rounded: RoundedTarget,
    /// Position draws rejected by the exclusion zone.
    pub positions_rejected: usize,
}

impl BucketSummary {
    pub fn bucket(&self) -> Bucket {
        self.target.bucket
    }
}

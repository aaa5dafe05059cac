//! Categorical material selection within a bucket.
//!
//! A bucket's composition lists weight fractions that may leave an unidentified remainder.
//! [`MaterialSampler`] renormalizes the listed fractions so the remainder is never drawn.
use rand::RngCore;

use crate::error::{Error, Result};
use crate::model::{Bucket, ConcentrationModel, MaterialId};
use crate::sampling::rand01;

/// Pick an index with probability proportional to its weight.
///
/// Returns `None` when no weight is positive. Zero-weight entries are never picked.
pub fn pick_weighted(weights: &[f64], rng: &mut dyn RngCore) -> Option<usize> {
    let total_weight: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if total_weight <= 0.0 {
        return None;
    }

    let mut roll = rand01(rng) * total_weight;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        if roll < w {
            return Some(i);
        }
        roll -= w;
    }

    weights.iter().rposition(|w| *w > 0.0)
}

/// A raw material that can be drawn for a bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialChoice {
    pub material: MaterialId,
    /// Share of the bucket after renormalization.
    pub probability: f64,
    /// Density in kg/m³.
    pub density: f64,
}

/// Draws raw materials for one bucket according to its renormalized composition.
#[derive(Debug, Clone)]
pub struct MaterialSampler {
    choices: Vec<MaterialChoice>,
    weights: Vec<f64>,
}

impl MaterialSampler {
    /// Build the sampler for a bucket.
    ///
    /// Returns `Ok(None)` when the bucket lists no material with positive weight.
    /// A listed material with no known density is an error.
    pub fn for_bucket(model: &ConcentrationModel, bucket: Bucket) -> Result<Option<Self>> {
        let fractions = model.material_weights(bucket.size_class, bucket.category);
        let total: f64 = fractions
            .iter()
            .map(|f| f.weight)
            .filter(|w| *w > 0.0)
            .sum();
        if total <= 0.0 {
            return Ok(None);
        }

        let mut choices = Vec::with_capacity(fractions.len());
        let mut weights = Vec::with_capacity(fractions.len());
        for f in fractions.iter().filter(|f| f.weight > 0.0) {
            let density = model
                .density(&f.material)
                .ok_or_else(|| Error::UnknownMaterial {
                    name: f.material.clone(),
                })?;
            choices.push(MaterialChoice {
                material: f.material.clone(),
                probability: f.weight / total,
                density,
            });
            weights.push(f.weight);
        }

        Ok(Some(Self { choices, weights }))
    }

    pub fn choices(&self) -> &[MaterialChoice] {
        &self.choices
    }

    pub fn sample(&self, rng: &mut dyn RngCore) -> &MaterialChoice {
        let idx = pick_weighted(&self.weights, rng).unwrap_or(0);
        &self.choices[idx]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::model::{MaterialCategory, SizeClass};
    use crate::sampling::test_rng::FixedRng;

    #[test]
    fn weighted_pick_selects_by_probability() {
        let weights = [0.7, 0.3];
        let mut first = FixedRng::at(0.0);
        assert_eq!(pick_weighted(&weights, &mut first), Some(0));
        let mut second = FixedRng::at(0.8);
        assert_eq!(pick_weighted(&weights, &mut second), Some(1));
    }

    #[test]
    fn weighted_pick_skips_zero_weights() {
        let weights = [0.0, 1.0, 0.0];
        for u in [0.0, 0.5, 0.999] {
            let mut rng = FixedRng::at(u);
            assert_eq!(pick_weighted(&weights, &mut rng), Some(1));
        }
        let mut rng = FixedRng::at(0.5);
        assert_eq!(pick_weighted(&[0.0, 0.0], &mut rng), None);
        assert_eq!(pick_weighted(&[], &mut rng), None);
    }

    #[test]
    fn composition_is_renormalized() {
        let model = ConcentrationModel::great_pacific();
        let bucket = Bucket::new(SizeClass::Mega, MaterialCategory::N);
        let sampler = MaterialSampler::for_bucket(&model, bucket)
            .unwrap()
            .expect("mega nets have a composition");
        let probs: Vec<f64> = sampler.choices().iter().map(|c| c.probability).collect();
        assert!((probs[0] - 0.8 / 0.9).abs() < 1e-12);
        assert!((probs[1] - 0.1 / 0.9).abs() < 1e-12);
        assert_eq!(sampler.choices()[0].density, 920.0);
    }

    #[test]
    fn empty_composition_yields_no_sampler() {
        let model = ConcentrationModel::great_pacific();
        let bucket = Bucket::new(SizeClass::Mega, MaterialCategory::P);
        assert!(MaterialSampler::for_bucket(&model, bucket).unwrap().is_none());
    }

    #[test]
    fn unknown_density_is_reported() {
        let model = ConcentrationModel::new().with_composition(
            SizeClass::Meso,
            MaterialCategory::H,
            [("PET", 1.0)],
        );
        let bucket = Bucket::new(SizeClass::Meso, MaterialCategory::H);
        assert!(matches!(
            MaterialSampler::for_bucket(&model, bucket),
            Err(Error::UnknownMaterial { .. })
        ));
    }

    #[test]
    fn empirical_frequencies_match_weights() {
        let model = ConcentrationModel::great_pacific();
        let bucket = Bucket::new(SizeClass::Meso, MaterialCategory::F);
        let sampler = MaterialSampler::for_bucket(&model, bucket).unwrap().unwrap();
        let mut rng = StdRng::seed_from_u64(2024);
        let n = 100_000;
        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..n {
            *counts
                .entry(sampler.sample(&mut rng).material.clone())
                .or_default() += 1;
        }
        for choice in sampler.choices() {
            let freq = counts.get(&choice.material).copied().unwrap_or(0) as f64 / n as f64;
            assert!(
                (freq - choice.probability).abs() < 0.01,
                "{}: {freq} vs {}",
                choice.material,
                choice.probability
            );
        }
    }
}

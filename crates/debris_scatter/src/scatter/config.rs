//! Generation settings.
use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{ConcentrationModel, SizeClass};
use crate::sampling::exclusion::DEFAULT_MAX_POSITION_ATTEMPTS;
use crate::sampling::{ExclusionZone, SamplingRegion};

/// Configuration for generating a debris field.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Width and height of the survey area in meters.
    pub extent: DVec2,
    /// Origin at the area center instead of its corner. Applies to the exclusion zone too.
    pub centered: bool,
    /// Area in which no debris is placed.
    pub exclusion: ExclusionZone,
    /// Multiplier on every concentration. `None` uses the model's hotspot scale.
    pub scale: Option<f64>,
    /// Size classes to generate. Treated as a set; duplicates are ignored.
    pub size_classes: Vec<SizeClass>,
    /// Return the hand-placed fixture instead of sampling.
    pub use_example: bool,
    /// Seed for reproducible output. `None` draws fresh entropy.
    pub seed: Option<u64>,
    /// Cap on position draws per particle before giving up on the exclusion zone.
    pub max_position_attempts: usize,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            extent: DVec2::ZERO,
            centered: false,
            exclusion: ExclusionZone::none(),
            scale: None,
            size_classes: SizeClass::SURVEY.to_vec(),
            use_example: false,
            seed: None,
            max_position_attempts: DEFAULT_MAX_POSITION_ATTEMPTS,
        }
    }
}

impl GenerateConfig {
    /// Creates a new [`GenerateConfig`] for an area of `extent` meters.
    pub fn new(extent: impl Into<DVec2>) -> Self {
        Self {
            extent: extent.into(),
            ..Default::default()
        }
    }

    /// Sets the exclusion zone from its center and full size.
    pub fn with_exclusion(mut self, center: impl Into<DVec2>, size: impl Into<DVec2>) -> Self {
        self.exclusion = ExclusionZone::new(center, size);
        self
    }

    /// Sets whether coordinates are centered on the area.
    pub fn with_centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }

    /// Sets the concentration multiplier.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Sets the size classes to generate, sorted and without duplicates.
    pub fn with_size_classes(mut self, size_classes: impl IntoIterator<Item = SizeClass>) -> Self {
        self.size_classes = size_classes.into_iter().collect();
        self.size_classes.sort_unstable();
        self.size_classes.dedup();
        self
    }

    /// Switches to the deterministic fixture.
    pub fn with_example(mut self, use_example: bool) -> Self {
        self.use_example = use_example;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the cap on position draws per particle.
    pub fn with_max_position_attempts(mut self, attempts: usize) -> Self {
        self.max_position_attempts = attempts;
        self
    }

    pub fn region(&self) -> SamplingRegion {
        SamplingRegion::new(self.extent, self.centered)
    }

    /// Scale in effect for `model`.
    pub fn effective_scale(&self, model: &ConcentrationModel) -> f64 {
        self.scale.unwrap_or_else(|| model.default_scale())
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.extent.is_finite() || self.extent.x <= 0.0 || self.extent.y <= 0.0 {
            return Err(Error::InvalidConfig(
                "extent must be finite and > 0 in both components".into(),
            ));
        }
        if let Some(scale) = self.scale {
            if !scale.is_finite() || scale < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "scale must be finite and >= 0, got {scale}"
                )));
            }
        }
        if self.max_position_attempts == 0 {
            return Err(Error::InvalidConfig(
                "max_position_attempts must be > 0".into(),
            ));
        }
        if !self.exclusion.center.is_finite() || !self.exclusion.size.is_finite() {
            return Err(Error::InvalidConfig(
                "exclusion zone must be finite".into(),
            ));
        }
        if !self.use_example && self.exclusion.covers(&self.region()) {
            return Err(Error::InvalidConfig(
                "exclusion zone covers the entire sampling region".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_survey_classes() {
        let config = GenerateConfig::new((100.0, 100.0));
        assert_eq!(config.size_classes, SizeClass::SURVEY.to_vec());
        assert!(!config.centered);
        assert!(config.exclusion.is_degenerate());
        assert_eq!(config.max_position_attempts, DEFAULT_MAX_POSITION_ATTEMPTS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn size_classes_are_sorted_and_unique() {
        let config = GenerateConfig::new((10.0, 10.0)).with_size_classes([
            SizeClass::Mega,
            SizeClass::Meso,
            SizeClass::Mega,
        ]);
        assert_eq!(config.size_classes, vec![SizeClass::Meso, SizeClass::Mega]);
    }

    #[test]
    fn builder_sets_fields() {
        let config = GenerateConfig::new([40.0, 20.0])
            .with_exclusion((1.0, 2.0), (3.0, 4.0))
            .with_centered(true)
            .with_scale(2.5)
            .with_size_classes([SizeClass::Mega])
            .with_example(true)
            .with_seed(9)
            .with_max_position_attempts(50);
        assert_eq!(config.extent, DVec2::new(40.0, 20.0));
        assert_eq!(config.exclusion.center, DVec2::new(1.0, 2.0));
        assert!(config.centered);
        assert_eq!(config.scale, Some(2.5));
        assert_eq!(config.size_classes, vec![SizeClass::Mega]);
        assert!(config.use_example);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.max_position_attempts, 50);
    }

    #[test]
    fn non_positive_extent_is_rejected() {
        for extent in [(0.0, 10.0), (10.0, 0.0), (-1.0, 5.0), (f64::NAN, 5.0)] {
            let config = GenerateConfig::new(extent);
            assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn covering_exclusion_is_rejected_up_front() {
        let config = GenerateConfig::new((10.0, 10.0)).with_exclusion((5.0, 5.0), (12.0, 12.0));
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let centered = GenerateConfig::new((10.0, 10.0))
            .with_centered(true)
            .with_exclusion((0.0, 0.0), (10.0, 10.0));
        assert!(centered.validate().is_err());

        let partial = GenerateConfig::new((10.0, 10.0)).with_exclusion((5.0, 5.0), (9.0, 12.0));
        assert!(partial.validate().is_ok());
    }

    #[test]
    fn bad_scale_and_attempts_are_rejected() {
        let base = GenerateConfig::new((10.0, 10.0));
        assert!(base.clone().with_scale(-1.0).validate().is_err());
        assert!(base.clone().with_scale(f64::INFINITY).validate().is_err());
        assert!(base.clone().with_scale(0.0).validate().is_ok());
        assert!(base.with_max_position_attempts(0).validate().is_err());
    }

    #[test]
    fn effective_scale_defaults_to_model_hotspot() {
        let model = ConcentrationModel::great_pacific();
        let config = GenerateConfig::new((10.0, 10.0));
        assert_eq!(config.effective_scale(&model), model.default_scale());
        assert_eq!(config.with_scale(1.0).effective_scale(&model), 1.0);
    }
}

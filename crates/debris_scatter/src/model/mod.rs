//! Empirical concentration model: size classes, material categories, compositions and densities.
//!
//! A [`ConcentrationModel`] is an immutable dataset injected into the sampler. It maps each
//! [`Bucket`] (a [`SizeClass`] and [`MaterialCategory`] pair) to a mean areal [`Concentration`]
//! and a material composition, and maps material names to densities. Absent entries are not
//! errors: a bucket without a concentration produces no debris, and a bucket without a
//! composition has no material to sample from.
//!
//! The published Great Pacific Garbage Patch tables are available via
//! [`ConcentrationModel::great_pacific`].
use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

mod great_pacific;

pub use great_pacific::{GREAT_PACIFIC_TOTAL_COUNT, GREAT_PACIFIC_TOTAL_MASS};

pub type MaterialId = String;

/// Debris size class, ordered from smallest to largest.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SizeClass {
    Micro,
    Meso,
    Macro,
    Mega,
}

impl SizeClass {
    pub const ALL: [SizeClass; 4] = [
        SizeClass::Micro,
        SizeClass::Meso,
        SizeClass::Macro,
        SizeClass::Mega,
    ];

    /// Classes that are visible at survey scale. Microplastics dominate the counts but not the picture.
    pub const SURVEY: [SizeClass; 3] = [SizeClass::Meso, SizeClass::Macro, SizeClass::Mega];

    pub fn label(self) -> &'static str {
        match self {
            SizeClass::Micro => "Microplastics",
            SizeClass::Meso => "Mesoplastics",
            SizeClass::Macro => "Macroplastics",
            SizeClass::Mega => "Megaplastics",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Letter-coded debris category from the source survey.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaterialCategory {
    /// Hard plastic, plastic sheet and film.
    H,
    /// Plastic lines, ropes and fishing nets.
    N,
    /// Pre-production plastic pellets.
    P,
    /// Foamed material.
    F,
}

impl MaterialCategory {
    pub const ALL: [MaterialCategory; 4] = [
        MaterialCategory::H,
        MaterialCategory::N,
        MaterialCategory::P,
        MaterialCategory::F,
    ];

    pub fn code(self) -> char {
        match self {
            MaterialCategory::H => 'H',
            MaterialCategory::N => 'N',
            MaterialCategory::P => 'P',
            MaterialCategory::F => 'F',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'H' => Some(MaterialCategory::H),
            'N' => Some(MaterialCategory::N),
            'P' => Some(MaterialCategory::P),
            'F' => Some(MaterialCategory::F),
            _ => None,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MaterialCategory::H => "hard plastic, plastic sheet and film",
            MaterialCategory::N => "plastic lines, ropes and fishing nets",
            MaterialCategory::P => "pre-production plastic pellets",
            MaterialCategory::F => "foamed material",
        }
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.description())
    }
}

/// A (size class, material category) pair. Targets and mass normalization are computed per bucket.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bucket {
    pub size_class: SizeClass,
    pub category: MaterialCategory,
}

impl Bucket {
    pub fn new(size_class: SizeClass, category: MaterialCategory) -> Self {
        Self {
            size_class,
            category,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.size_class, self.category.code())
    }
}

/// Linear size interval `[min_cm, max_cm)` in centimeters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeRange {
    pub min_cm: f64,
    pub max_cm: f64,
}

impl SizeRange {
    pub fn new(min_cm: f64, max_cm: f64) -> Self {
        Self { min_cm, max_cm }
    }

    /// Interval bounds converted to meters.
    pub fn meters(&self) -> (f64, f64) {
        (self.min_cm / 100.0, self.max_cm / 100.0)
    }

    /// Whether a size in meters falls inside `[min, max)`.
    pub fn contains_m(&self, size_m: f64) -> bool {
        let (lo, hi) = self.meters();
        size_m >= lo && size_m < hi
    }
}

/// Mean areal concentration of one bucket.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Concentration {
    /// Mass per area, kg/km².
    pub mass_kg_per_km2: f64,
    /// Piece count per area, #/km².
    pub count_per_km2: f64,
}

impl Concentration {
    pub const ZERO: Concentration = Concentration {
        mass_kg_per_km2: 0.0,
        count_per_km2: 0.0,
    };

    pub fn new(mass_kg_per_km2: f64, count_per_km2: f64) -> Self {
        Self {
            mass_kg_per_km2,
            count_per_km2,
        }
    }
}

/// Weight fraction of one raw material within a bucket's composition.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialFraction {
    pub material: MaterialId,
    pub weight: f64,
}

impl MaterialFraction {
    pub fn new(material: impl Into<MaterialId>, weight: f64) -> Self {
        Self {
            material: material.into(),
            weight,
        }
    }
}

/// Immutable lookup tables describing an areal debris population.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct ConcentrationModel {
    pub size_ranges: BTreeMap<SizeClass, SizeRange>,
    pub concentrations: BTreeMap<Bucket, Concentration>,
    pub compositions: BTreeMap<Bucket, Vec<MaterialFraction>>,
    pub densities: BTreeMap<MaterialId, f64>,
    /// Published population totals, if known. Falls back to the table sum.
    pub reference_total: Option<Concentration>,
}

impl ConcentrationModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size_range(mut self, size_class: SizeClass, min_cm: f64, max_cm: f64) -> Self {
        self.size_ranges
            .insert(size_class, SizeRange::new(min_cm, max_cm));
        self
    }

    pub fn with_concentration(
        mut self,
        size_class: SizeClass,
        category: MaterialCategory,
        mass_kg_per_km2: f64,
        count_per_km2: f64,
    ) -> Self {
        self.concentrations.insert(
            Bucket::new(size_class, category),
            Concentration::new(mass_kg_per_km2, count_per_km2),
        );
        self
    }

    pub fn with_composition<S: Into<MaterialId>>(
        mut self,
        size_class: SizeClass,
        category: MaterialCategory,
        fractions: impl IntoIterator<Item = (S, f64)>,
    ) -> Self {
        let fractions = fractions
            .into_iter()
            .map(|(m, w)| MaterialFraction::new(m, w))
            .collect();
        self.compositions
            .insert(Bucket::new(size_class, category), fractions);
        self
    }

    pub fn with_density(mut self, material: impl Into<MaterialId>, kg_per_m3: f64) -> Self {
        self.densities.insert(material.into(), kg_per_m3);
        self
    }

    pub fn with_reference_total(mut self, mass_kg_per_km2: f64, count_per_km2: f64) -> Self {
        self.reference_total = Some(Concentration::new(mass_kg_per_km2, count_per_km2));
        self
    }

    /// Mean concentration of a bucket, or `None` when the combination is absent.
    pub fn concentration(
        &self,
        size_class: SizeClass,
        category: MaterialCategory,
    ) -> Option<Concentration> {
        self.concentrations
            .get(&Bucket::new(size_class, category))
            .copied()
    }

    /// Size interval in centimeters for a size class.
    pub fn size_range_cm(&self, size_class: SizeClass) -> Option<SizeRange> {
        self.size_ranges.get(&size_class).copied()
    }

    /// Ordered material weights of a bucket. Empty when the bucket has no composition.
    pub fn material_weights(
        &self,
        size_class: SizeClass,
        category: MaterialCategory,
    ) -> &[MaterialFraction] {
        self.compositions
            .get(&Bucket::new(size_class, category))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Density of a raw material in kg/m³.
    pub fn density(&self, material: &str) -> Option<f64> {
        self.densities.get(material).copied()
    }

    /// Sum of the bucket mass and count concentrations in the table.
    pub fn total_concentration(&self) -> Concentration {
        self.concentrations
            .values()
            .fold(Concentration::ZERO, |acc, c| Concentration {
                mass_kg_per_km2: acc.mass_kg_per_km2 + c.mass_kg_per_km2,
                count_per_km2: acc.count_per_km2 + c.count_per_km2,
            })
    }

    /// Sum of the mass concentrations of every bucket in `size_class`, in kg/km².
    pub fn class_mass_concentration(&self, size_class: SizeClass) -> f64 {
        MaterialCategory::ALL
            .iter()
            .filter_map(|&category| self.concentration(size_class, category))
            .map(|c| c.mass_kg_per_km2)
            .sum()
    }

    /// Total mean mass concentration used to derive the default scale.
    pub fn total_mean_mass_concentration(&self) -> f64 {
        self.reference_total
            .unwrap_or_else(|| self.total_concentration())
            .mass_kg_per_km2
    }

    /// Scale that brings the total mass concentration to a 100 kg/km² hotspot.
    pub fn default_scale(&self) -> f64 {
        let total = self.total_mean_mass_concentration();
        if total > 0.0 {
            100.0 / total
        } else {
            1.0
        }
    }

    /// Scale that turns the model's totals into `actual_mean_kg_per_km2`.
    pub fn scale_for_mean(&self, actual_mean_kg_per_km2: f64) -> f64 {
        let total = self.total_mean_mass_concentration();
        if total > 0.0 {
            actual_mean_kg_per_km2 / total
        } else {
            1.0
        }
    }

    /// Human-readable size class name including its size interval.
    pub fn size_class_name(&self, size_class: SizeClass) -> String {
        match self.size_range_cm(size_class) {
            Some(range) if size_class == SizeClass::Mega => {
                format!("{} (>{}cm)", size_class.label(), range.min_cm)
            }
            Some(range) => format!(
                "{} ({}cm - {}cm)",
                size_class.label(),
                range.min_cm,
                range.max_cm
            ),
            None => size_class.label().to_string(),
        }
    }

    /// Weight-averaged density of a bucket's composition, without renormalizing the weights.
    pub fn average_density(&self, size_class: SizeClass, category: MaterialCategory) -> f64 {
        self.material_weights(size_class, category)
            .iter()
            .map(|f| self.density(&f.material).unwrap_or(0.0) * f.weight)
            .sum()
    }

    /// Check the tables for values the sampler cannot work with.
    pub fn validate(&self) -> Result<()> {
        for (size_class, range) in &self.size_ranges {
            if !(range.min_cm > 0.0 && range.min_cm < range.max_cm && range.max_cm.is_finite()) {
                return Err(Error::InvalidConfig(format!(
                    "size range for {size_class} must satisfy 0 < min < max, got [{}, {})",
                    range.min_cm, range.max_cm
                )));
            }
        }
        for (bucket, c) in &self.concentrations {
            if !(c.mass_kg_per_km2 >= 0.0 && c.count_per_km2 >= 0.0)
                || !c.mass_kg_per_km2.is_finite()
                || !c.count_per_km2.is_finite()
            {
                return Err(Error::InvalidConfig(format!(
                    "concentration for {bucket} must be finite and >= 0"
                )));
            }
            if c.count_per_km2 > 0.0 && c.mass_kg_per_km2 <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "concentration for {bucket} has pieces but no mass"
                )));
            }
        }
        for (bucket, fractions) in &self.compositions {
            for f in fractions {
                if !(f.weight.is_finite() && f.weight >= 0.0) {
                    return Err(Error::InvalidConfig(format!(
                        "weight of '{}' in {bucket} must be finite and >= 0",
                        f.material
                    )));
                }
                match self.density(&f.material) {
                    Some(d) if d > 0.0 && d.is_finite() => {}
                    Some(_) => {
                        return Err(Error::InvalidConfig(format!(
                            "density of '{}' must be finite and > 0",
                            f.material
                        )))
                    }
                    None => {
                        return Err(Error::UnknownMaterial {
                            name: f.material.clone(),
                        })
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> ConcentrationModel {
        ConcentrationModel::new()
            .with_size_range(SizeClass::Macro, 5.0, 50.0)
            .with_concentration(SizeClass::Macro, MaterialCategory::H, 10.0, 100.0)
            .with_composition(
                SizeClass::Macro,
                MaterialCategory::H,
                [("PE", 0.5), ("PP", 0.25)],
            )
            .with_density("PE", 920.0)
            .with_density("PP", 900.5)
    }

    #[test]
    fn absent_bucket_is_none_not_error() {
        let model = tiny();
        assert!(model
            .concentration(SizeClass::Mega, MaterialCategory::P)
            .is_none());
        assert!(model
            .material_weights(SizeClass::Mega, MaterialCategory::P)
            .is_empty());
        assert!(model.validate().is_ok());
    }

    #[test]
    fn default_scale_falls_back_to_table_sum() {
        let model = tiny();
        assert_eq!(model.total_mean_mass_concentration(), 10.0);
        assert!((model.default_scale() - 10.0).abs() < 1e-12);

        let model = model.with_reference_total(50.0, 1000.0);
        assert!((model.default_scale() - 2.0).abs() < 1e-12);
        assert!((model.scale_for_mean(25.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn average_density_uses_raw_weights() {
        let model = tiny();
        let expected = 920.0 * 0.5 + 900.5 * 0.25;
        let got = model.average_density(SizeClass::Macro, MaterialCategory::H);
        assert!((got - expected).abs() < 1e-9);
    }

    #[test]
    fn validate_reports_missing_density() {
        let model = tiny().with_composition(
            SizeClass::Macro,
            MaterialCategory::F,
            [("EPS", 1.0)],
        );
        match model.validate() {
            Err(Error::UnknownMaterial { name }) => assert_eq!(name, "EPS"),
            other => panic!("expected UnknownMaterial, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_inverted_size_range() {
        let model = tiny().with_size_range(SizeClass::Meso, 5.0, 0.5);
        assert!(matches!(model.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn validate_rejects_pieces_without_mass() {
        let model = tiny().with_concentration(SizeClass::Macro, MaterialCategory::N, 0.0, 4.0);
        assert!(matches!(model.validate(), Err(Error::InvalidConfig(_))));

        let model = tiny().with_concentration(SizeClass::Macro, MaterialCategory::N, 0.0, 0.0);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn default_scale_is_bit_identical_across_builds() {
        let build = || {
            let mut model = ConcentrationModel::new();
            for (i, size_class) in SizeClass::ALL.into_iter().enumerate() {
                for (j, category) in MaterialCategory::ALL.into_iter().enumerate() {
                    let mass = 0.1 + 0.37 * i as f64 + 0.013 * j as f64;
                    model = model.with_concentration(size_class, category, mass, 1.0 + mass);
                }
            }
            model
        };
        let first = build();
        for _ in 0..50 {
            let other = build();
            assert_eq!(other.default_scale().to_bits(), first.default_scale().to_bits());
            for size_class in SizeClass::ALL {
                assert_eq!(
                    other.class_mass_concentration(size_class).to_bits(),
                    first.class_mass_concentration(size_class).to_bits()
                );
            }
        }
    }

    #[test]
    fn size_range_contains_is_half_open() {
        let range = SizeRange::new(50.0, 200.0);
        assert!(range.contains_m(0.5));
        assert!(range.contains_m(1.999));
        assert!(!range.contains_m(2.0));
        assert!(!range.contains_m(0.49));
    }

    #[test]
    fn category_codes_round_trip() {
        for category in MaterialCategory::ALL {
            assert_eq!(MaterialCategory::from_code(category.code()), Some(category));
        }
        assert_eq!(MaterialCategory::from_code('n'), Some(MaterialCategory::N));
        assert_eq!(MaterialCategory::from_code('X'), None);
    }

    #[test]
    fn size_class_name_includes_range() {
        let model = tiny().with_size_range(SizeClass::Mega, 50.0, 200.0);
        assert_eq!(
            model.size_class_name(SizeClass::Macro),
            "Macroplastics (5cm - 50cm)"
        );
        assert_eq!(
            model.size_class_name(SizeClass::Mega),
            "Megaplastics (>50cm)"
        );
        assert_eq!(model.size_class_name(SizeClass::Micro), "Microplastics");
    }

    #[test]
    fn bucket_display_uses_letter_code() {
        let bucket = Bucket::new(SizeClass::Mega, MaterialCategory::N);
        assert_eq!(bucket.to_string(), "Megaplastics/N");
    }
}

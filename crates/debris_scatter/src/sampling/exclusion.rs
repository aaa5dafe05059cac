//! Sampling region and rectangular exclusion zone.
//!
//! Positions are drawn uniformly over a [`SamplingRegion`] and redrawn while they fall strictly
//! inside an [`ExclusionZone`]. [`ExclusionFilter`] bounds the number of redraws so a zone that
//! leaves no room cannot stall generation.
use glam::DVec2;
use rand::RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sampling::uniform_in;

pub const DEFAULT_MAX_POSITION_ATTEMPTS: usize = 10_000;

/// Rectangular area that debris is scattered over.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingRegion {
    /// Width and height in meters.
    pub extent: DVec2,
    /// Origin at the region center instead of its lower-left corner.
    pub centered: bool,
}

impl SamplingRegion {
    pub fn new(extent: impl Into<DVec2>, centered: bool) -> Self {
        Self {
            extent: extent.into(),
            centered,
        }
    }

    /// Lower and upper bounds of the region in its own coordinate frame.
    pub fn bounds(&self) -> (DVec2, DVec2) {
        if self.centered {
            let half = self.extent * 0.5;
            (-half, half)
        } else {
            (DVec2::ZERO, self.extent)
        }
    }

    /// Area in km².
    pub fn area_km2(&self) -> f64 {
        (self.extent.x / 1000.0) * (self.extent.y / 1000.0)
    }

    /// Draw a point uniformly over `[min, max)` on both axes, x first.
    pub fn sample_point(&self, rng: &mut dyn RngCore) -> DVec2 {
        let (min, max) = self.bounds();
        let x = uniform_in(min.x, max.x, rng);
        let y = uniform_in(min.y, max.y, rng);
        DVec2::new(x, y)
    }

    pub fn contains(&self, p: DVec2) -> bool {
        let (min, max) = self.bounds();
        p.x >= min.x && p.x < max.x && p.y >= min.y && p.y < max.y
    }
}

/// Axis-aligned rectangle in which no debris may be placed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExclusionZone {
    pub center: DVec2,
    /// Full width and height.
    pub size: DVec2,
}

impl ExclusionZone {
    pub fn new(center: impl Into<DVec2>, size: impl Into<DVec2>) -> Self {
        Self {
            center: center.into(),
            size: size.into(),
        }
    }

    /// A zone that excludes nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Zones with no area exclude nothing.
    pub fn is_degenerate(&self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0)
    }

    pub fn bounds(&self) -> (DVec2, DVec2) {
        let half = self.size * 0.5;
        (self.center - half, self.center + half)
    }

    /// Whether `p` lies strictly inside the zone on both axes.
    pub fn contains(&self, p: DVec2) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let (min, max) = self.bounds();
        min.x < p.x && p.x < max.x && min.y < p.y && p.y < max.y
    }

    /// Area of the zone that overlaps `region`, in m².
    pub fn overlap_area(&self, region: &SamplingRegion) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        let (zmin, zmax) = self.bounds();
        let (rmin, rmax) = region.bounds();
        let w = (zmax.x.min(rmax.x) - zmin.x.max(rmin.x)).max(0.0);
        let h = (zmax.y.min(rmax.y) - zmin.y.max(rmin.y)).max(0.0);
        w * h
    }

    /// Fraction of the region's area covered by the zone, in `[0, 1]`.
    pub fn coverage(&self, region: &SamplingRegion) -> f64 {
        let area = region.extent.x * region.extent.y;
        if area <= 0.0 {
            return 0.0;
        }
        (self.overlap_area(region) / area).clamp(0.0, 1.0)
    }

    /// Whether the zone covers the whole region, leaving nowhere to place debris.
    pub fn covers(&self, region: &SamplingRegion) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let (zmin, zmax) = self.bounds();
        let (rmin, rmax) = region.bounds();
        zmin.x <= rmin.x && zmin.y <= rmin.y && zmax.x >= rmax.x && zmax.y >= rmax.y
    }
}

/// Rejection sampler for positions outside an [`ExclusionZone`].
#[derive(Debug, Clone, Copy)]
pub struct ExclusionFilter {
    pub zone: ExclusionZone,
    pub max_attempts: usize,
}

impl ExclusionFilter {
    pub fn new(zone: ExclusionZone) -> Self {
        Self {
            zone,
            max_attempts: DEFAULT_MAX_POSITION_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn accepts(&self, p: DVec2) -> bool {
        !self.zone.contains(p)
    }

    /// Draw a position in `region` that the zone does not contain.
    ///
    /// Returns the position and the number of rejected draws before it.
    pub fn sample_position(
        &self,
        region: &SamplingRegion,
        rng: &mut dyn RngCore,
    ) -> Result<(DVec2, usize)> {
        for attempt in 0..self.max_attempts {
            let p = region.sample_point(rng);
            if self.accepts(p) {
                return Ok((p, attempt));
            }
        }
        Err(Error::ExclusionExhausted {
            attempts: self.max_attempts,
        })
    }
}

//! Random draws used by the debris sampler.
//!
//! Randomness is any [`rand::RngCore`], passed as `&mut dyn RngCore` so callers choose the
//! generator and its seed. Every helper draws through [`rand01`], which keeps the stream layout
//! identical across platforms for a given seed.
use rand::RngCore;

pub mod exclusion;
pub mod material;
pub mod rounding;
pub mod seed;
pub mod size;

pub use exclusion::{ExclusionFilter, ExclusionZone, SamplingRegion};
pub use material::{pick_weighted, MaterialChoice, MaterialSampler};
pub use rounding::stochastic_round;
pub use seed::seed_for_scene;
pub use size::sample_log_uniform;

/// Generate a random float in the range [0, 1) with 53 bits of precision.
#[inline]
pub fn rand01(rng: &mut dyn RngCore) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Generate a random float in `[lo, hi)`.
///
/// Returns `lo` for an empty or inverted interval.
#[inline]
pub fn uniform_in(lo: f64, hi: f64, rng: &mut dyn RngCore) -> f64 {
    let u = rand01(rng);
    if hi <= lo {
        return lo;
    }
    (lo + u * (hi - lo)).clamp(lo, next_down(hi))
}

/// Compute the next smaller representable float value.
///
/// Returns a value that is strictly less than the input, useful for
/// keeping samples strictly inside a half-open interval.
#[inline]
pub(crate) fn next_down(val: f64) -> f64 {
    if val.is_nan() {
        return f64::NAN;
    }

    if val == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }

    if val == f64::INFINITY {
        return f64::MAX;
    }

    if val == 0.0 {
        return -f64::MIN_POSITIVE;
    }

    let bits = val.to_bits();
    if val > 0.0 {
        f64::from_bits(bits.saturating_sub(1))
    } else {
        f64::from_bits(bits.saturating_add(1))
    }
}

#[cfg(test)]
pub(crate) mod test_rng {
    use rand::RngCore;

    /// Generator returning the same word forever.
    pub struct FixedRng {
        pub value: u64,
    }

    impl FixedRng {
        /// A generator whose [`super::rand01`] output is approximately `u`.
        pub fn at(u: f64) -> Self {
            Self {
                value: ((u.clamp(0.0, 1.0) * (1u64 << 53) as f64) as u64).min((1u64 << 53) - 1)
                    << 11,
            }
        }
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            (self.value >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.value
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 8];
            }
        }
    }

    /// Generator cycling through a fixed list of [`super::rand01`] outputs.
    pub struct SequenceRng {
        values: Vec<u64>,
        index: usize,
    }

    impl SequenceRng {
        pub fn new(draws: &[f64]) -> Self {
            Self {
                values: draws.iter().map(|&u| FixedRng::at(u).value).collect(),
                index: 0,
            }
        }
    }

    impl RngCore for SequenceRng {
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            let v = self.values[self.index % self.values.len()];
            self.index += 1;
            v
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
    }
}

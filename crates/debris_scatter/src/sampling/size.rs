//! Log-uniform size sampling within a size class.
use rand::RngCore;

use crate::model::SizeRange;
use crate::sampling::{next_down, uniform_in};

/// Draw a linear size in meters, uniform in `log10(size)` over the range.
///
/// Size classes are decade-spaced and piece counts fall off roughly log-linearly across them,
/// so uniform-in-log is the closest match within a class. The result always lies in
/// `[min_cm, max_cm) / 100`.
pub fn sample_log_uniform(range: SizeRange, rng: &mut dyn RngCore) -> f64 {
    let u = uniform_in(range.min_cm.log10(), range.max_cm.log10(), rng);
    let (lo, hi) = range.meters();
    (10f64.powf(u) / 100.0).clamp(lo, next_down(hi))
}

/// Mean of `size³` (m³) under the log-uniform size distribution of a range.
///
/// Mirrors the closed form used for the canned fixture, which divides by `log10(1000)`.
pub fn mean_cubed_size(range: SizeRange) -> f64 {
    let (lo, hi) = range.meters();
    let min_log = lo.log10();
    let max_log = hi.log10();
    let span = max_log - min_log;
    if span <= 0.0 {
        return lo.powi(3);
    }
    (1000f64.powf(max_log) - 1000f64.powf(min_log)) / (span * 1000f64.log10())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::sampling::test_rng::FixedRng;

    #[test]
    fn extreme_draws_stay_in_range() {
        let range = SizeRange::new(50.0, 200.0);
        let mut low = FixedRng { value: 0 };
        assert!((sample_log_uniform(range, &mut low) - 0.5).abs() < 1e-12);

        let mut high = FixedRng { value: u64::MAX };
        let s = sample_log_uniform(range, &mut high);
        assert!(range.contains_m(s), "{s} escaped the range");
    }

    #[test]
    fn median_is_geometric_mean() {
        let range = SizeRange::new(5.0, 50.0);
        let mut mid = FixedRng::at(0.5);
        let s = sample_log_uniform(range, &mut mid);
        let expected = (0.05f64 * 0.5).sqrt();
        assert!((s - expected).abs() < 1e-9);
    }

    #[test]
    fn log_sizes_are_uniform() {
        let range = SizeRange::new(0.5, 5.0);
        let mut rng = StdRng::seed_from_u64(99);
        let n = 50_000;
        let below_midpoint = (0..n)
            .map(|_| sample_log_uniform(range, &mut rng))
            .inspect(|&s| assert!(range.contains_m(s)))
            .filter(|&s| s < (0.005f64 * 0.05).sqrt())
            .count();
        let share = below_midpoint as f64 / n as f64;
        assert!((share - 0.5).abs() < 0.01, "share {share}");
    }

    #[test]
    fn mean_cubed_size_for_megaplastics() {
        let range = SizeRange::new(50.0, 200.0);
        let expected = (8.0 - 0.125) / (3.0 * (2.0f64.log10() - 0.5f64.log10()));
        assert!((mean_cubed_size(range) - expected).abs() < 1e-9);
    }
}

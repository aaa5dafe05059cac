//! Unbiased integer rounding of real-valued piece counts.

/// Round `target` to `floor(target)` or `ceil(target)` so that the expected result equals `target`.
///
/// `u` is a uniform draw in `[0, 1)`. The result is `ceil(target)` when `u < frac(target)`,
/// which happens with probability `frac(target)`. Integral targets are returned unchanged
/// regardless of `u`. Non-finite or non-positive targets round to zero.
pub fn stochastic_round(target: f64, u: f64) -> usize {
    if !target.is_finite() || target <= 0.0 {
        return 0;
    }
    let floor = target.floor();
    let frac = target - floor;
    if frac == 0.0 {
        return floor as usize;
    }
    if u < frac {
        floor as usize + 1
    } else {
        floor as usize
    }
}

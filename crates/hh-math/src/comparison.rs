//! Comparison utilities.

use hh_core::Real;

/// Default epsilon for close comparisons.
pub const EPSILON: Real = 1e-10;

/// Return `true` if `|a - b| <= epsilon`.
#[inline]
pub fn close(a: Real, b: Real, epsilon: Real) -> bool {
    (a - b).abs() <= epsilon
}

/// Sup-norm distance `max_i |a_i - b_i|` between two equally long slices.
///
/// Returns `NaN` if any pair contains a `NaN`, and `+inf` if the two slices
/// disagree on an infinite entry, so a non-finite iterate never looks
/// converged.
pub fn sup_norm_distance(a: &[Real], b: &[Real]) -> Real {
    debug_assert_eq!(a.len(), b.len());
    let mut dist: Real = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        let d = if x == y { 0.0 } else { (x - y).abs() };
        if d.is_nan() {
            return Real::NAN;
        }
        dist = dist.max(d);
    }
    dist
}

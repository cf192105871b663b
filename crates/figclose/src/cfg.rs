//! Tolerance defaults shared by every comparison in the crate.
//!
//! Policy
//! - Defaults are fixed constants to avoid “tolerance juggling”. Point identity
//!   (equality, hashing, ordering) and the scalar predicates all go through the
//!   helpers below, so two points that compare equal always hash equal and sort
//!   next to each other.
//! - Identity uses a quantized grid of pitch `EPS`; scalar predicates use
//!   `|a - b| < EPS`. Both read the same constant.
//! - Two points about `EPS` apart that straddle a grid boundary are distinct.
//! - Point order is lexicographic on grid keys. Along a line within `EPS` of
//!   vertical that order is not monotone, so chains on a segment are ordered by
//!   position along it (`Segment::collect_ordered_points_on`), never by `Ord`.

/// Coordinate/scalar tolerance.
pub const EPS: f64 = 1e-6;

/// Canonical rounded value of a coordinate on the `EPS` grid.
///
/// `-0.0` and `0.0` map to the same key.
#[inline]
pub fn quantize(v: f64) -> i64 {
    (v / EPS).round() as i64
}

/// Tolerant scalar equality.
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

/// Tolerant zero test.
#[inline]
pub fn approx_zero(v: f64) -> bool {
    v.abs() < EPS
}

/// `lo - EPS <= v <= hi + EPS` for an unordered pair of bounds.
#[inline]
pub(crate) fn within_span(v: f64, a: f64, b: f64) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    v >= lo - EPS && v <= hi + EPS
}

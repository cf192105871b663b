//! Tolerant predicates over points and segments.
//!
//! All comparisons route through `crate::cfg` so that the predicates agree with
//! point identity: a crossing that `lies_between` two segments registers to the
//! same key the segment endpoints use.
//!
//! Degenerate input never errors: vertical runs give an infinite slope, parallel
//! or coincident lines give no intersection.

use nalgebra::Vector2;

use super::{Point, Segment};
use crate::cfg::{approx_eq, approx_zero, within_span};

/// Endpoint policy for [`lies_between`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bounds {
    /// Endpoints count as lying on the segment.
    Inclusive,
    /// Endpoints are rejected; used for every implicit-point test.
    Exclusive,
}

#[inline]
pub(crate) fn cross(u: Vector2<f64>, v: Vector2<f64>) -> f64 {
    u.x * v.y - u.y * v.x
}

/// Slope of the line through `a` and `b`; `f64::INFINITY` when the run is within `EPS` of zero.
#[inline]
pub fn slope(a: Point, b: Point) -> f64 {
    let run = b.x() - a.x();
    if approx_zero(run) {
        f64::INFINITY
    } else {
        (b.y() - a.y()) / run
    }
}

/// True iff the infinite lines through `s1` and `s2` coincide.
///
/// Non-vertical lines compare slope and y-intercept; vertical lines compare x.
pub fn collinear(s1: &Segment, s2: &Segment) -> bool {
    match (s1.is_vertical(), s2.is_vertical()) {
        (true, true) => approx_eq(s1.p1().x(), s2.p1().x()),
        (false, false) => {
            approx_eq(s1.slope(), s2.slope()) && approx_eq(intercept(s1), intercept(s2))
        }
        _ => false,
    }
}

#[inline]
fn intercept(s: &Segment) -> f64 {
    s.p1().y() - s.slope() * s.p1().x()
}

/// Crossing point of the infinite lines through `s1` and `s2`.
///
/// Lines are written as `n·x = c` with `n = (dy, -dx)` and solved by Cramer's
/// rule. Swapping the arguments negates numerator and denominator exactly, so
/// the result is symmetric bit for bit.
///
/// Lines count as parallel when the sine of their angle is below `EPS`, so the
/// test does not depend on segment length.
pub fn intersection(s1: &Segment, s2: &Segment) -> Option<Point> {
    if s1 == s2 {
        return None;
    }
    let (n1, c1) = line_eq(s1);
    let (n2, c2) = line_eq(s2);
    let scale = n1.norm() * n2.norm();
    if scale == 0.0 {
        return None;
    }
    let det = cross(n1, n2);
    if approx_zero(det / scale) {
        return None;
    }
    let x = cross(Vector2::new(c1, n1.y), Vector2::new(c2, n2.y)) / det;
    let y = cross(Vector2::new(n1.x, c1), Vector2::new(n2.x, c2)) / det;
    if !(x.is_finite() && y.is_finite()) {
        return None;
    }
    Some(Point::new(x, y))
}

#[inline]
fn line_eq(s: &Segment) -> (Vector2<f64>, f64) {
    let d = s.p2().to_vec() - s.p1().to_vec();
    let n = Vector2::new(d.y, -d.x);
    (n, n.dot(&s.p1().to_vec()))
}

/// Perpendicular distance from `p` to the line through `s` is below `EPS`.
///
/// A zero-length segment only contains its own endpoint.
pub fn on_line(s: &Segment, p: Point) -> bool {
    let a = s.p1().to_vec();
    let d = s.p2().to_vec() - a;
    let len = d.norm();
    if approx_zero(len) {
        return p == s.p1();
    }
    approx_zero(cross(d, p.to_vec() - a) / len)
}

/// `p` is on the line of `s` and inside the coordinate span of its endpoints.
pub fn lies_between(s: &Segment, p: Point, bounds: Bounds) -> bool {
    if !on_line(s, p) {
        return false;
    }
    let (a, b) = (s.p1(), s.p2());
    if !(within_span(p.x(), a.x(), b.x()) && within_span(p.y(), a.y(), b.y())) {
        return false;
    }
    match bounds {
        Bounds::Inclusive => true,
        Bounds::Exclusive => p != a && p != b,
    }
}

/// The single endpoint common to both segments; `None` for zero or two shared endpoints.
pub fn shared_vertex(s1: &Segment, s2: &Segment) -> Option<Point> {
    if s1 == s2 {
        return None;
    }
    [s1.p1(), s1.p2()].into_iter().find(|p| s2.has(*p))
}

/// Both endpoints of `candidate` lie (inclusively) on `container`.
#[inline]
pub fn subsumes(container: &Segment, candidate: &Segment) -> bool {
    lies_between(container, candidate.p1(), Bounds::Inclusive)
        && lies_between(container, candidate.p2(), Bounds::Inclusive)
}

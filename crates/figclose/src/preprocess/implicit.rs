//! Implicit points: proper crossings between pairs of given segments.

use std::collections::BTreeSet;

use crate::geom::{Bounds, Point, Segment};
use crate::registry::PointRegistry;

/// Every registered point where two distinct given segments properly cross.
///
/// A crossing counts only if it lies strictly inside both segments, so shared
/// endpoints never become implicit. Each crossing is passed through
/// `registry.register` and the canonical point is collected.
pub fn compute_implicit_points<R>(registry: &mut R, given: &[Segment]) -> BTreeSet<Point>
where
    R: PointRegistry + ?Sized,
{
    let mut implicit = BTreeSet::new();
    for (i, s1) in given.iter().enumerate() {
        for s2 in &given[i + 1..] {
            let Some(x) = proper_crossing(s1, s2) else {
                continue;
            };
            let canonical = registry.register(x);
            if implicit.insert(canonical) {
                tracing::trace!(%s1, %s2, point = %canonical, "implicit point");
            }
        }
    }
    implicit
}

/// Crossing of `s1` and `s2` lying strictly between the endpoints of both.
#[inline]
pub fn proper_crossing(s1: &Segment, s2: &Segment) -> Option<Point> {
    let x = s1.intersection(s2)?;
    (s1.lies_between(x, Bounds::Exclusive) && s2.lies_between(x, Bounds::Exclusive)).then_some(x)
}

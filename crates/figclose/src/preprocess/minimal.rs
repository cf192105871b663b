//! Minimal segments: given segments chopped at implicit points.

use std::collections::BTreeSet;

use crate::geom::{Bounds, Point, Segment};

/// Pieces of given segments split by the implicit points strictly inside them.
///
/// For a given segment with k interior implicit points this emits the k+1
/// consecutive pieces of the chain ordered from one endpoint to the other.
/// Segments without interior implicit points contribute nothing here.
pub fn compute_implicit_base_segments(
    given: &[Segment],
    implicit: &BTreeSet<Point>,
) -> BTreeSet<Segment> {
    let mut pieces = BTreeSet::new();
    for seg in given {
        let interior = interior_points(seg, implicit);
        if interior.is_empty() {
            continue;
        }
        let ends = [seg.p1(), seg.p2()];
        let chain = seg.collect_ordered_points_on(interior.iter().chain(ends.iter()));
        pieces.extend(make_segments(&chain));
    }
    pieces
}

/// The `n - 1` segments joining consecutive points of an ordered chain.
pub fn make_segments(chain: &[Point]) -> BTreeSet<Segment> {
    chain
        .windows(2)
        .map(|w| Segment::new(w[0], w[1]))
        .collect()
}

/// Implicit pieces plus every given segment with no implicit point strictly inside.
///
/// A given segment that was split never appears here in its original form.
pub fn identify_all_minimal_segments(
    implicit: &BTreeSet<Point>,
    given: &[Segment],
    implicit_segments: &BTreeSet<Segment>,
) -> BTreeSet<Segment> {
    let mut minimal = implicit_segments.clone();
    minimal.extend(
        given
            .iter()
            .filter(|seg| !implicit.iter().any(|p| seg.lies_between(*p, Bounds::Exclusive)))
            .copied(),
    );
    minimal
}

fn interior_points(seg: &Segment, implicit: &BTreeSet<Point>) -> BTreeSet<Point> {
    implicit
        .iter()
        .filter(|p| seg.lies_between(**p, Bounds::Exclusive))
        .copied()
        .collect()
}

//! Non-minimal segments: fixpoint of collinear end-to-end fusion.
//!
//! Worklist
//! - FIFO queue seeded with the minimal segments. Each popped segment is tried
//!   against every segment known so far (minimal ∪ emitted, snapshot before the
//!   round). A fused segment is emitted and enqueued only if it is new.
//! - Every pair of known segments meets once: the later-popped member sees the
//!   other in the known list. Fused endpoints come from a finite point set, so
//!   the known set is bounded and the queue drains.

use std::collections::{BTreeSet, HashSet, VecDeque};

use crate::geom::Segment;

/// Segment spanning `a ∪ b` when they are collinear, touch at exactly one
/// endpoint, and leave it in opposite directions.
///
/// The union runs between the two endpoints that are not shared. Pieces that
/// leave the shared vertex in the same direction overlay one another and are
/// rejected, as is any pair where one contains an interior point of the other.
pub fn fuse(a: &Segment, b: &Segment) -> Option<Segment> {
    let shared = a.shared_vertex(b)?;
    if !a.coincides_without_overlap(b) || a.overlays_as_ray(b) {
        return None;
    }
    Some(Segment::new(a.other(shared)?, b.other(shared)?))
}

/// Every segment obtainable by repeatedly fusing minimal segments.
///
/// Never contains an input segment.
pub fn construct_non_minimal_segments(minimal: &BTreeSet<Segment>) -> BTreeSet<Segment> {
    let mut known: HashSet<Segment> = minimal.iter().copied().collect();
    let mut known_list: Vec<Segment> = minimal.iter().copied().collect();
    let mut queue: VecDeque<Segment> = minimal.iter().copied().collect();
    let mut out = BTreeSet::new();

    while let Some(a) = queue.pop_front() {
        let snapshot = known_list.len();
        for i in 0..snapshot {
            let b = known_list[i];
            if a == b {
                continue;
            }
            let Some(c) = fuse(&a, &b) else {
                continue;
            };
            if known.insert(c) {
                tracing::trace!(%a, %b, fused = %c, "fusion");
                out.insert(c);
                known_list.push(c);
                queue.push_back(c);
            }
        }
    }
    out
}

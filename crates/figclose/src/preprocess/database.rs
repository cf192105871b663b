//! Identity-preserving segment store.

use std::collections::HashSet;

use crate::geom::Segment;

/// Intern set of segments keyed by their unordered endpoint pair.
///
/// Inserting a segment equal to a stored one keeps the stored instance.
#[derive(Clone, Debug, Default)]
pub struct SegmentDatabase {
    segments: HashSet<Segment>,
}

impl SegmentDatabase {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the segment was new.
    #[inline]
    pub fn insert(&mut self, seg: Segment) -> bool {
        self.segments.insert(seg)
    }

    #[inline]
    pub fn contains(&self, seg: &Segment) -> bool {
        self.segments.contains(seg)
    }

    /// The stored instance equal to `query`.
    #[inline]
    pub fn get(&self, query: &Segment) -> Option<&Segment> {
        self.segments.get(query)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Stored segments in lexicographic order.
    pub fn sorted(&self) -> Vec<Segment> {
        let mut out: Vec<Segment> = self.segments.iter().copied().collect();
        out.sort();
        out
    }
}

impl Extend<Segment> for SegmentDatabase {
    fn extend<I: IntoIterator<Item = Segment>>(&mut self, iter: I) {
        for seg in iter {
            self.insert(seg);
        }
    }
}

//! Finite segment between two points (unordered pair).

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::predicates::{self, Bounds};
use super::Point;
use crate::cfg::approx_eq;

/// Immutable segment `p1–p2`.
///
/// Invariants:
/// - Equality ignores endpoint order; hashing and ordering use the
///   lexicographically ordered pair `(min, max)` so all three agree.
/// - Endpoints are kept as constructed; combined segments are new values.
#[derive(Clone, Copy, Debug)]
pub struct Segment {
    p1: Point,
    p2: Point,
}

impl Segment {
    #[inline]
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }
    #[inline]
    pub fn p1(&self) -> Point {
        self.p1
    }
    #[inline]
    pub fn p2(&self) -> Point {
        self.p2
    }
    /// Endpoints in lexicographic order.
    #[inline]
    pub fn ordered(&self) -> (Point, Point) {
        if self.p1 <= self.p2 {
            (self.p1, self.p2)
        } else {
            (self.p2, self.p1)
        }
    }
    #[inline]
    pub fn length(&self) -> f64 {
        self.p1.distance(&self.p2)
    }
    /// Slope, `f64::INFINITY` for vertical segments.
    #[inline]
    pub fn slope(&self) -> f64 {
        predicates::slope(self.p1, self.p2)
    }
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        approx_eq(self.p1.y(), self.p2.y())
    }
    #[inline]
    pub fn is_vertical(&self) -> bool {
        approx_eq(self.p1.x(), self.p2.x())
    }
    /// Both endpoints share one identity.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.p1 == self.p2
    }
    #[inline]
    pub fn midpoint(&self) -> Point {
        Point::from_vec((self.p1.to_vec() + self.p2.to_vec()) * 0.5)
    }
    /// `pt` is one of the endpoints.
    #[inline]
    pub fn has(&self, pt: Point) -> bool {
        self.p1 == pt || self.p2 == pt
    }
    /// The endpoint opposite to `pt`, if `pt` is an endpoint.
    pub fn other(&self, pt: Point) -> Option<Point> {
        if pt == self.p1 {
            Some(self.p2)
        } else if pt == self.p2 {
            Some(self.p1)
        } else {
            None
        }
    }
    #[inline]
    pub fn is_collinear_with(&self, that: &Segment) -> bool {
        predicates::collinear(self, that)
    }
    #[inline]
    pub fn intersection(&self, that: &Segment) -> Option<Point> {
        predicates::intersection(self, that)
    }
    #[inline]
    pub fn lies_between(&self, pt: Point, bounds: Bounds) -> bool {
        predicates::lies_between(self, pt, bounds)
    }
    #[inline]
    pub fn shared_vertex(&self, that: &Segment) -> Option<Point> {
        predicates::shared_vertex(self, that)
    }
    /// `candidate` lies entirely on this segment.
    #[inline]
    pub fn has_subsegment(&self, candidate: &Segment) -> bool {
        predicates::subsumes(self, candidate)
    }

    /// Collinear, and neither endpoint of `that` is strictly inside `self`.
    ///
    /// Still true when the two share a vertex.
    pub fn coincides_without_overlap(&self, that: &Segment) -> bool {
        self.is_collinear_with(that)
            && !self.lies_between(that.p1, Bounds::Exclusive)
            && !self.lies_between(that.p2, Bounds::Exclusive)
    }

    /// Two collinear segments leaving a shared vertex in the same direction,
    /// so that one extends over the other. Equal segments overlay.
    pub fn overlays_as_ray(&self, that: &Segment) -> bool {
        if self == that {
            return true;
        }
        let Some(shared) = self.shared_vertex(that) else {
            return false;
        };
        if !self.is_collinear_with(that) {
            return false;
        }
        let (Some(other_l), Some(other_r)) = (self.other(shared), that.other(shared)) else {
            return false;
        };
        Segment::new(shared, other_r).lies_between(other_l, Bounds::Inclusive)
            || Segment::new(shared, other_l).lies_between(other_r, Bounds::Inclusive)
    }

    /// Signed position of `pt` along `p1 → p2`, scaled by the squared length.
    #[inline]
    pub fn position_of(&self, pt: Point) -> f64 {
        (pt.to_vec() - self.p1.to_vec()).dot(&(self.p2.to_vec() - self.p1.to_vec()))
    }

    /// Distinct points from `points` lying on this segment (endpoints
    /// included), ordered from `p1` to `p2`.
    ///
    /// Ordering by position rather than by `Point`'s lexicographic key keeps
    /// the chain monotone on lines within `EPS` of vertical.
    pub fn collect_ordered_points_on<'a, I>(&self, points: I) -> Vec<Point>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut on: Vec<Point> = points
            .into_iter()
            .filter(|p| self.lies_between(**p, Bounds::Inclusive))
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        on.sort_by(|a, b| self.position_of(*a).total_cmp(&self.position_of(*b)));
        on
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.ordered() == other.ordered()
    }
}
impl Eq for Segment {}

impl Hash for Segment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (lo, hi) = self.ordered();
        lo.hash(state);
        hi.hash(state);
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordered().cmp(&other.ordered())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.p1, self.p2)
    }
}

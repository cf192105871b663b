//! Value-typed 2D primitives for figure closure.
//!
//! Purpose
//! - `Point` and `Segment` with tolerant identity (quantized keys) and the
//!   predicates the closure pipeline needs: slope, collinearity, line
//!   intersection, betweenness, shared vertex, subsumption.
//!
//! Assumptions and conventions
//! - Tolerances come from `crate::cfg` only (`EPS = 1e-6`); callers should keep
//!   coordinates at O(1)–O(1e3) scale.
//! - Segments are unordered; predicates never depend on which endpoint is `p1`.
//! - Degenerate configurations return `None`/`INFINITY` rather than erroring.

mod point;
pub mod predicates;
mod segment;

pub use point::Point;
pub use predicates::{
    collinear, intersection, lies_between, on_line, shared_vertex, slope, subsumes, Bounds,
};
pub use segment::Segment;

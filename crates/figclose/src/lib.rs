//! Deductive closure of straight-line figures.
//!
//! Given named points and the segments drawn between them, compute every point
//! forced by proper crossings and every segment (minimal or composite) the
//! figure contains. Downstream deduction consumes the resulting
//! `SegmentDatabase`.
//!
//! Layout
//! - `geom`: tolerant `Point`/`Segment` and predicates.
//! - `registry`: `PointRegistry` contract and the `PointDatabase` implementation.
//! - `preprocess`: the staged pipeline and `Preprocessor` orchestration.
//! - `gen`: reproducible random figures for stress runs.
//! - `cfg`: the one tolerance all comparisons share.

pub mod cfg;
mod error;
pub mod gen;
pub mod geom;
pub mod preprocess;
pub mod registry;

pub use error::{Error, Result};
pub use geom::{Bounds, Point, Segment};
pub use preprocess::{Preprocessor, PreprocessorBuilder, SegmentDatabase};
pub use registry::{PointDatabase, PointRegistry};

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::gen::{draw_figure, RandomFigureCfg, ReplayToken};
    pub use crate::geom::{
        collinear, intersection, lies_between, shared_vertex, slope, subsumes, Bounds, Point,
        Segment,
    };
    pub use crate::preprocess::{
        compute_implicit_base_segments, compute_implicit_points, construct_non_minimal_segments,
        identify_all_minimal_segments, Preprocessor, SegmentDatabase,
    };
    pub use crate::registry::{PointDatabase, PointRegistry};
    pub use crate::{Error, Result};
}

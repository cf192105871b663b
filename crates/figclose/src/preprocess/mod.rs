//! Figure closure pipeline: implicit points → minimal segments → composites.
//!
//! Purpose
//! - Turn the points and segments a user drew into the full set of points and
//!   segments the figure contains: proper crossings become points, segments
//!   are split at them, and collinear pieces are fused into every composite.
//!
//! Stages
//! - `implicit::compute_implicit_points` (needs the registry)
//! - `minimal::{compute_implicit_base_segments, identify_all_minimal_segments}`
//! - `closure::construct_non_minimal_segments`
//! - `SegmentDatabase` holds minimal ∪ non-minimal.
//!
//! Each stage is a free function over sets so callers and tests can run them in
//! isolation; `Preprocessor` runs them in order and keeps every intermediate.

pub mod closure;
mod database;
pub mod implicit;
pub mod minimal;

use std::collections::{BTreeSet, HashSet};

pub use closure::{construct_non_minimal_segments, fuse};
pub use database::SegmentDatabase;
pub use implicit::{compute_implicit_points, proper_crossing};
pub use minimal::{compute_implicit_base_segments, identify_all_minimal_segments, make_segments};

use crate::error::{Error, Result};
use crate::geom::{Point, Segment};
use crate::registry::PointRegistry;

/// Output of one closure run.
///
/// Invariants:
/// - `minimal` and `non_minimal` are disjoint; `database` is their union.
/// - Every endpoint of every stored segment is registered.
#[derive(Clone, Debug)]
pub struct Preprocessor {
    given: Vec<Segment>,
    implicit_points: BTreeSet<Point>,
    implicit_segments: BTreeSet<Segment>,
    minimal: BTreeSet<Segment>,
    non_minimal: BTreeSet<Segment>,
    database: SegmentDatabase,
}

impl Preprocessor {
    /// Run the full pipeline over `given`.
    ///
    /// Endpoints are registered first. Zero-length segments are dropped and
    /// duplicate segments collapse to their first occurrence.
    pub fn new<R, I>(registry: &mut R, given: I) -> Self
    where
        R: PointRegistry + ?Sized,
        I: IntoIterator<Item = Segment>,
    {
        let given = canonical_given(registry, given);
        let implicit_points = compute_implicit_points(registry, &given);
        let implicit_segments = compute_implicit_base_segments(&given, &implicit_points);
        let minimal = identify_all_minimal_segments(&implicit_points, &given, &implicit_segments);
        let non_minimal = construct_non_minimal_segments(&minimal);

        let mut database = SegmentDatabase::new();
        database.extend(minimal.iter().copied());
        database.extend(non_minimal.iter().copied());

        tracing::debug!(
            given = given.len(),
            implicit_points = implicit_points.len(),
            implicit_segments = implicit_segments.len(),
            minimal = minimal.len(),
            non_minimal = non_minimal.len(),
            "closure"
        );
        Self {
            given,
            implicit_points,
            implicit_segments,
            minimal,
            non_minimal,
            database,
        }
    }

    /// Resolve segment endpoints by name through the registry, then run.
    ///
    /// Fails with `NotFound` on the first unknown name; nothing is computed.
    pub fn from_names<R, N>(registry: &mut R, pairs: &[(N, N)]) -> Result<Self>
    where
        R: PointRegistry + ?Sized,
        N: AsRef<str>,
    {
        let given = pairs
            .iter()
            .map(|(a, b)| {
                let p1 = registry.lookup(a.as_ref())?;
                let p2 = registry.lookup(b.as_ref())?;
                Ok(Segment::new(p1, p2))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(registry, given))
    }

    #[inline]
    pub fn builder<'a, R: PointRegistry + ?Sized>() -> PreprocessorBuilder<'a, R> {
        PreprocessorBuilder::new()
    }

    /// Given segments after canonicalization (registered, deduplicated, non-degenerate).
    #[inline]
    pub fn given_segments(&self) -> &[Segment] {
        &self.given
    }
    #[inline]
    pub fn implicit_points(&self) -> &BTreeSet<Point> {
        &self.implicit_points
    }
    #[inline]
    pub fn implicit_segments(&self) -> &BTreeSet<Segment> {
        &self.implicit_segments
    }
    #[inline]
    pub fn minimal_segments(&self) -> &BTreeSet<Segment> {
        &self.minimal
    }
    #[inline]
    pub fn non_minimal_segments(&self) -> &BTreeSet<Segment> {
        &self.non_minimal
    }
    /// All minimal and non-minimal segments.
    #[inline]
    pub fn database(&self) -> &SegmentDatabase {
        &self.database
    }
    #[inline]
    pub fn into_database(self) -> SegmentDatabase {
        self.database
    }
}

fn canonical_given<R, I>(registry: &mut R, given: I) -> Vec<Segment>
where
    R: PointRegistry + ?Sized,
    I: IntoIterator<Item = Segment>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for seg in given {
        let s = Segment::new(registry.register(seg.p1()), registry.register(seg.p2()));
        if s.is_degenerate() {
            tracing::warn!(segment = %s, "dropping zero-length segment");
            continue;
        }
        if seen.insert(s) {
            out.push(s);
        }
    }
    out
}

/// Collects the pipeline inputs; both are required.
///
/// `build` fails with `InvalidInput` before any computation when the registry
/// or the segment collection was never supplied.
pub struct PreprocessorBuilder<'a, R: PointRegistry + ?Sized> {
    registry: Option<&'a mut R>,
    segments: Option<Vec<Segment>>,
}

impl<'a, R: PointRegistry + ?Sized> Default for PreprocessorBuilder<'a, R> {
    fn default() -> Self {
        Self {
            registry: None,
            segments: None,
        }
    }
}

impl<'a, R: PointRegistry + ?Sized> PreprocessorBuilder<'a, R> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(mut self, registry: &'a mut R) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn segments<I: IntoIterator<Item = Segment>>(mut self, segments: I) -> Self {
        self.segments = Some(segments.into_iter().collect());
        self
    }

    pub fn build(self) -> Result<Preprocessor> {
        let registry = self
            .registry
            .ok_or_else(|| Error::InvalidInput("point registry is absent".into()))?;
        let segments = self
            .segments
            .ok_or_else(|| Error::InvalidInput("segment collection is absent".into()))?;
        Ok(Preprocessor::new(registry, segments))
    }
}

#[cfg(test)]
mod tests;

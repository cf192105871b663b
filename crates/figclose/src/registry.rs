//! Point registry: one canonical point per tolerant coordinate.
//!
//! The closure stages only rely on the `PointRegistry` contract. `PointDatabase`
//! is the in-memory implementation used by the CLI, the generators and tests.
//!
//! Canonical representative
//! - The first point registered for a key wins. When two crossings land on the
//!   same key with slightly different floating values, registration order picks
//!   which raw coordinates survive. This is accepted behavior.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::geom::Point;

/// Contract for canonicalizing points.
pub trait PointRegistry {
    /// Canonical point equal to `pt`; stores `pt` if none exists yet. Idempotent.
    fn register(&mut self, pt: Point) -> Point;
    /// Point registered under `name`.
    fn lookup(&self, name: &str) -> Result<Point>;
}

/// Append-only table of canonical points with optional names.
///
/// Invariants:
/// - `points` holds each key once, in registration order.
/// - Every name maps to a point present in `points`; names are never reassigned.
#[derive(Clone, Debug, Default)]
pub struct PointDatabase {
    points: Vec<Point>,
    index: HashMap<Point, usize>,
    names: HashMap<String, usize>,
    labels: HashMap<usize, String>,
}

impl PointDatabase {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named point. An existing point at the same coordinate keeps
    /// its identity and gains the name if it had none.
    pub fn put(&mut self, name: impl Into<String>, x: f64, y: f64) -> Point {
        let canonical = self.register(Point::new(x, y));
        let slot = self.index[&canonical];
        let name = name.into();
        if !self.names.contains_key(&name) {
            self.labels.entry(slot).or_insert_with(|| name.clone());
            self.names.insert(name, slot);
        }
        canonical
    }

    /// Canonical point for `pt` if registered.
    #[inline]
    pub fn get(&self, pt: &Point) -> Option<Point> {
        self.index.get(pt).map(|&i| self.points[i])
    }

    #[inline]
    pub fn contains(&self, pt: &Point) -> bool {
        self.index.contains_key(pt)
    }

    /// First name given to the point equal to `pt`.
    pub fn name_of(&self, pt: &Point) -> Option<&str> {
        let slot = self.index.get(pt)?;
        self.labels.get(slot).map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}

impl PointRegistry for PointDatabase {
    fn register(&mut self, pt: Point) -> Point {
        if let Some(&i) = self.index.get(&pt) {
            return self.points[i];
        }
        self.index.insert(pt, self.points.len());
        self.points.push(pt);
        pt
    }

    fn lookup(&self, name: &str) -> Result<Point> {
        self.names
            .get(name)
            .map(|&i| self.points[i])
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }
}

//! Tolerant 2D point.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use nalgebra::Vector2;

use crate::cfg::quantize;

/// Immutable point in the plane.
///
/// Invariants:
/// - Equality, hashing and ordering all compare the quantized key
///   `(quantize(x), quantize(y))`, so they agree with each other.
/// - Ordering is lexicographic: x first, then y.
#[derive(Clone, Copy, Debug)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }
    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }
    #[inline]
    pub fn to_vec(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
    #[inline]
    pub fn from_vec(v: Vector2<f64>) -> Self {
        Self::new(v.x, v.y)
    }
    /// Canonical rounded identity of this point.
    #[inline]
    pub fn key(&self) -> (i64, i64) {
        (quantize(self.x), quantize(self.y))
    }
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        (other.to_vec() - self.to_vec()).norm()
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}
impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

//! Random figures on an integer lattice (replay tokens for reproducibility).
//!
//! Purpose
//! - Deterministic stress inputs for the closure pipeline: the CLI `random`
//!   command, property tests and benchmarks all draw from here.
//!
//! Model
//! - Points are distinct lattice points in `[-extent, extent]²`, named `P0, P1, …`.
//!   A lattice makes collinear chains and shared crossings common, which is
//!   where the closure does real work.
//! - Segments join distinct random point pairs; duplicates are redrawn.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom::{Point, Segment};
use crate::registry::PointDatabase;

/// Largest lattice half-width `draw_figure` honours; larger requests are clamped.
pub const MAX_EXTENT: i32 = 1 << 12;

/// Figure sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RandomFigureCfg {
    /// Requested point count; capped by the lattice size.
    pub points: usize,
    /// Requested segment count; capped by the number of point pairs.
    pub segments: usize,
    /// Lattice half-width, clamped to `1..=MAX_EXTENT`.
    pub extent: i32,
}
impl Default for RandomFigureCfg {
    fn default() -> Self {
        Self {
            points: 8,
            segments: 10,
            extent: 6,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a random figure: named points in a fresh registry plus given segments.
pub fn draw_figure(cfg: RandomFigureCfg, tok: ReplayToken) -> (PointDatabase, Vec<Segment>) {
    let mut rng = tok.to_std_rng();
    let extent = cfg.extent.clamp(1, MAX_EXTENT);
    let side = (2 * extent + 1) as usize;
    let n_points = cfg.points.clamp(2, side * side);

    let mut db = PointDatabase::new();
    let mut pts: Vec<Point> = Vec::with_capacity(n_points);
    while pts.len() < n_points {
        let x = rng.gen_range(-extent..=extent) as f64;
        let y = rng.gen_range(-extent..=extent) as f64;
        let p = Point::new(x, y);
        if db.contains(&p) {
            continue;
        }
        pts.push(db.put(format!("P{}", pts.len()), x, y));
    }

    let n_segments = cfg.segments.min(n_points * (n_points - 1) / 2);
    let mut seen: HashSet<Segment> = HashSet::with_capacity(n_segments);
    let mut segs = Vec::with_capacity(n_segments);
    while segs.len() < n_segments {
        let i = rng.gen_range(0..n_points);
        let j = rng.gen_range(0..n_points);
        if i == j {
            continue;
        }
        let s = Segment::new(pts[i], pts[j]);
        if seen.insert(s) {
            segs.push(s);
        }
    }
    (db, segs)
}

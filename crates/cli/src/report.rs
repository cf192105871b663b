//! JSON closure report written by `run` and `random`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use figclose::{Point, PointDatabase, Preprocessor, Segment};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PointOut {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Serialize)]
pub struct SegmentOut {
    pub a: PointOut,
    pub b: PointOut,
}

#[derive(Clone, Debug, Serialize)]
pub struct Counts {
    pub given: usize,
    pub implicit_points: usize,
    pub implicit_segments: usize,
    pub minimal: usize,
    pub non_minimal: usize,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ClosureReport {
    pub counts: Counts,
    pub implicit_points: Vec<PointOut>,
    pub minimal: Vec<SegmentOut>,
    pub non_minimal: Vec<SegmentOut>,
}

fn point_out(db: &PointDatabase, p: &Point) -> PointOut {
    PointOut {
        name: db.name_of(p).map(str::to_string),
        x: p.x(),
        y: p.y(),
    }
}

fn segment_out(db: &PointDatabase, s: &Segment) -> SegmentOut {
    let (a, b) = s.ordered();
    SegmentOut {
        a: point_out(db, &a),
        b: point_out(db, &b),
    }
}

impl ClosureReport {
    pub fn new(db: &PointDatabase, pp: &Preprocessor) -> Self {
        Self {
            counts: Counts {
                given: pp.given_segments().len(),
                implicit_points: pp.implicit_points().len(),
                implicit_segments: pp.implicit_segments().len(),
                minimal: pp.minimal_segments().len(),
                non_minimal: pp.non_minimal_segments().len(),
                total: pp.database().len(),
            },
            implicit_points: pp
                .implicit_points()
                .iter()
                .map(|p| point_out(db, p))
                .collect(),
            minimal: pp
                .minimal_segments()
                .iter()
                .map(|s| segment_out(db, s))
                .collect(),
            non_minimal: pp
                .non_minimal_segments()
                .iter()
                .map(|s| segment_out(db, s))
                .collect(),
        }
    }

    pub fn write<P: AsRef<Path>>(&self, out: P) -> Result<()> {
        let out = out.as_ref();
        if let Some(parent) = out.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating output dir {}", parent.display()))?;
            }
        }
        fs::write(out, serde_json::to_vec_pretty(self)?)
            .with_context(|| format!("writing {}", out.display()))
    }
}

//! Figure files: named points plus segments given by endpoint names.
//!
//! ```json
//! { "points": [{ "name": "A", "x": 0, "y": 0 }, ...],
//!   "segments": [["A", "B"], ...] }
//! ```
//!
//! A missing `points` or `segments` key is an `InvalidInput`; a segment naming
//! an undeclared point is a `NotFound` from the registry.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use figclose::{Error, PointDatabase, Preprocessor};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NamedPoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Deserialize)]
struct FigureFile {
    points: Option<Vec<NamedPoint>>,
    segments: Option<Vec<[String; 2]>>,
}

/// Parsed figure with every input present.
#[derive(Debug)]
pub struct Figure {
    pub points: Vec<NamedPoint>,
    pub segments: Vec<[String; 2]>,
}

impl Figure {
    pub fn parse(text: &str) -> Result<Self> {
        let raw: FigureFile = serde_json::from_str(text).context("parsing figure JSON")?;
        let points = raw
            .points
            .ok_or_else(|| Error::InvalidInput("figure has no `points`".into()))?;
        let segments = raw
            .segments
            .ok_or_else(|| Error::InvalidInput("figure has no `segments`".into()))?;
        Ok(Self { points, segments })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading figure {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("loading figure {}", path.display()))
    }

    /// Register the named points and run the closure pipeline.
    pub fn close(&self) -> Result<(PointDatabase, Preprocessor)> {
        let mut db = PointDatabase::new();
        for p in &self.points {
            db.put(p.name.as_str(), p.x, p.y);
        }
        let pairs: Vec<(&str, &str)> = self
            .segments
            .iter()
            .map(|[a, b]| (a.as_str(), b.as_str()))
            .collect();
        let pp = Preprocessor::from_names(&mut db, &pairs)?;
        tracing::debug!(points = db.len(), "figure closed");
        Ok((db, pp))
    }
}

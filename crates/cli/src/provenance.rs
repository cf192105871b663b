//! `<stem>.provenance.json` sidecars next to closure reports.
//!
//! A sidecar says which build closed which figure: code rev and library
//! version, the figure source (file or replay token) with its input sizes, the
//! closure counts, and the report it describes.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::report::Counts;

/// Build identity shared by sidecars and the `report` command.
#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub code_rev: String,
    pub figclose: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            code_rev: code_rev(),
            figclose: figclose::VERSION,
        }
    }
}

/// Where the closed figure came from.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Source {
    File {
        path: String,
        points: usize,
        segments: usize,
    },
    Random {
        seed: u64,
        index: u64,
        points: usize,
        segments: usize,
        extent: i32,
    },
}

#[derive(Debug, Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

#[derive(Debug, Serialize)]
pub struct Provenance {
    #[serde(flatten)]
    build: BuildInfo,
    written_by: Callsite,
    tags: Vec<String>,
    source: Source,
    counts: Counts,
    report: String,
}

impl Provenance {
    /// Record for `report_path`; the callsite is the caller of this constructor.
    #[track_caller]
    pub fn new(source: Source, counts: &Counts, report_path: &Path) -> Self {
        let caller = Location::caller();
        Self {
            build: BuildInfo::current(),
            written_by: Callsite {
                file: caller.file(),
                line: caller.line(),
            },
            tags: Vec::new(),
            source,
            counts: counts.clone(),
            report: report_path.display().to_string(),
        }
    }

    pub fn tagged(mut self, tag: Option<String>) -> Self {
        self.tags.extend(tag);
        self
    }

    /// Write beside the report; returns the sidecar path.
    pub fn write(&self) -> Result<PathBuf> {
        let path = sidecar_path(Path::new(&self.report));
        let body = serde_json::to_vec_pretty(self).context("serializing provenance")?;
        fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

/// `dir/pentagon.json` → `dir/pentagon.provenance.json`.
pub fn sidecar_path(report: &Path) -> PathBuf {
    let stem = report
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("closure");
    report.with_file_name(format!("{stem}.provenance.json"))
}

/// `GIT_COMMIT` (runtime, then build time), else `git rev-parse HEAD`, else "unknown".
pub fn code_rev() -> String {
    std::env::var("GIT_COMMIT")
        .ok()
        .or_else(|| option_env!("GIT_COMMIT").map(str::to_string))
        .filter(|rev| !rev.is_empty())
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_string())
}

fn git_head() -> Option<String> {
    let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let rev = String::from_utf8(out.stdout).ok()?;
    Some(rev.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    fn counts() -> Counts {
        Counts {
            given: 2,
            implicit_points: 1,
            implicit_segments: 4,
            minimal: 4,
            non_minimal: 2,
            total: 6,
        }
    }

    #[test]
    fn sidecar_sits_next_to_report() {
        let derived = sidecar_path(Path::new("/tmp/closure/pentagon.json"));
        assert_eq!(derived, Path::new("/tmp/closure/pentagon.provenance.json"));
        let derived = sidecar_path(Path::new("x.closure.json"));
        assert_eq!(derived, Path::new("x.closure.provenance.json"));
    }

    #[test]
    fn sidecar_records_source_and_counts() {
        let dir = tempdir().unwrap();
        let report = dir.path().join("x.json");
        fs::write(&report, "{}").unwrap();
        let source = Source::File {
            path: "x-figure.json".into(),
            points: 4,
            segments: 2,
        };
        let written = Provenance::new(source, &counts(), &report)
            .tagged(Some("nightly".into()))
            .write()
            .unwrap();
        assert_eq!(written, dir.path().join("x.provenance.json"));

        let parsed: Value = serde_json::from_slice(&fs::read(written).unwrap()).unwrap();
        assert_eq!(parsed["report"], report.display().to_string());
        assert_eq!(parsed["source"]["kind"], "file");
        assert_eq!(parsed["source"]["points"], 4);
        assert_eq!(parsed["counts"]["non_minimal"], 2);
        assert_eq!(parsed["tags"][0], "nightly");
        assert_eq!(parsed["figclose"], figclose::VERSION);
        assert!(parsed["code_rev"].is_string());
        assert!(parsed["written_by"]["file"]
            .as_str()
            .unwrap()
            .ends_with("provenance.rs"));
    }

    #[test]
    fn random_source_keeps_replay_token() {
        let source = Source::Random {
            seed: 7,
            index: 3,
            points: 8,
            segments: 10,
            extent: 6,
        };
        let doc = serde_json::to_value(Provenance::new(source, &counts(), Path::new("r.json")))
            .unwrap();
        assert_eq!(doc["source"]["kind"], "random");
        assert_eq!(doc["source"]["seed"], 7);
        assert_eq!(doc["source"]["index"], 3);
    }
}

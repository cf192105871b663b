use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the closure pipeline.
///
/// Degenerate geometry (parallel lines, vertical slopes, zero-length segments)
/// is absorbed by the predicates and never shows up here.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// A required input was never supplied.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Registry lookup by an unknown point name.
    #[error("point not found: {0}")]
    NotFound(String),
}

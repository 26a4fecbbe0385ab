//! Error types for the expense puzzle crate

use thiserror::Error;

/// Main error type for the expense puzzle crate.
///
/// Running out of fringe without reaching the goal is not an error; it is
/// reported as [`crate::solver::SearchOutcome::NoSolution`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid board: expected exactly one blank cell, found {blanks}")]
    InvalidBoard { blanks: usize },

    #[error("invalid board: tile weight {value} must be positive")]
    NegativeTile { value: i32 },

    #[error("depth limit {limit} must be non-negative")]
    InvalidDepthLimit { limit: i64 },

    #[error("depth-limited search requires a depth limit")]
    MissingDepthLimit,

    #[error("board {index} of the path is not one slide away from its successor")]
    BrokenPath { index: usize },

    #[error("invalid token '{token}' on line {line}")]
    ParseBoard { line: usize, token: String },

    #[error("puzzle must contain 9 cells, found {found}")]
    CellCount { found: usize },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

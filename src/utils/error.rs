//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading input rows
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Cannot open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: expected 3 fields, found {found}")]
    FieldCount { line: u64, found: usize },

    #[error("Line {line}: weight {value:?} is not an integer: {source}")]
    InvalidWeight {
        line: u64,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Errors that can occur during chart rendering
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to plot: no rows were aggregated")]
    EmptySeries,

    #[error("Drawing failed: {0}")]
    Drawing(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to read file: {0}")]
    ReadFailed(std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

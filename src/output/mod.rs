//! Output writers for charts and series dumps.
//!
//! This module handles writing data to disk:
//! - SVG charts
//! - JSON series exports

pub mod json;
pub mod svg;

use crate::utils::error::OutputError;
use log::debug;
use std::path::{Path, PathBuf};

// Re-export main functions
pub use json::{read_series, write_series};
pub use svg::write_svg;

/// Validate that an output path is usable
///
/// **Public** - shared by every writer
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Derive the output path for an input file: `<dir>/<stem>.<extension>`
///
/// `dir` defaults to the input's own directory.
pub fn derive_output_path(input: &Path, output_dir: Option<&Path>, extension: &str) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "chart".into());
    name.push(".");
    name.push(extension);

    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();

    dir.join(name)
}

/// Create missing parent directories of an output path
fn prepare_output_path(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

//! JSON series export writer.
//!
//! Dumps the aggregated series so they can be inspected or diffed
//! without opening the chart.

use super::{prepare_output_path, validate_path};
use crate::parser::schema::SeriesExport;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a series export to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_series(export: &SeriesExport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing series to: {}", output_path.display());

    validate_path(output_path)?;
    prepare_output_path(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, export).map_err(OutputError::SerializationFailed)?;

    info!(
        "Series written successfully ({} bytes)",
        std::fs::metadata(output_path).map(|m| m.len()).unwrap_or(0)
    );

    Ok(())
}

/// Read a series export back from a JSON file
///
/// # Errors
/// * `OutputError::ReadFailed` - file missing or unreadable
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_series(input_path: impl AsRef<Path>) -> Result<SeriesExport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading series from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::ReadFailed)?;
    let export: SeriesExport =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Series loaded: version {}, source {}",
        export.version, export.source
    );

    Ok(export)
}

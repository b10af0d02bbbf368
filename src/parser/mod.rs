//! Input parsing and schema definitions.
//!
//! This module handles:
//! - Reading `timestamp,category,weight` rows from CSV
//! - Reporting malformed rows with their line number
//! - Defining the JSON series export schema

pub mod csv_rows;
pub mod schema;

// Re-export main types
pub use csv_rows::{open_rows, read_rows, RowReader};
pub use schema::{CategoryEntry, Row, SeriesExport};

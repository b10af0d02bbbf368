//! Configuration and constants for the CLI.

/// Current JSON series export schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Chart defaults
pub const DEFAULT_TITLE: &str = "Value weight at time";
pub const DEFAULT_Y_LABEL: &str = "Weight";
pub const DEFAULT_WIDTH: u32 = 1024;
pub const DEFAULT_HEIGHT: u32 = 768;

/// Extension of input files picked up when the input is a directory
pub const INPUT_EXTENSION: &str = "csv";

/// Number of fields every input row must carry: timestamp, category, weight
pub const FIELDS_PER_ROW: usize = 3;

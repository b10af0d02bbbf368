//! Input row type and the JSON series export schema.
//!
//! The export schema is versioned to allow future evolution.

use crate::aggregator::Aggregation;
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// One input record: `timestamp,category,weight`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Opaque timestamp, used as an x-axis label
    pub timestamp: String,

    /// Opaque category, used as a legend label
    pub category: String,

    /// Weight of the category at this timestamp
    pub weight: i64,
}

impl Row {
    pub fn new(timestamp: impl Into<String>, category: impl Into<String>, weight: i64) -> Self {
        Self {
            timestamp: timestamp.into(),
            category: category.into(),
            weight,
        }
    }
}

/// Top-level structure of a `--json` series dump
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesExport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Input file the series were built from
    pub source: String,

    /// Timestamp sequence, in input order
    pub timestamps: Vec<String>,

    /// Category series, in first-seen order
    pub series: Vec<CategoryEntry>,

    /// When the dump was generated (RFC 3339)
    pub generated_at: String,
}

/// One category's series inside a [`SeriesExport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub category: String,
    pub values: Vec<i64>,
}

impl SeriesExport {
    /// Snapshot an aggregation for serialization
    pub fn from_aggregation(aggregation: &Aggregation, source: impl Into<String>) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            source: source.into(),
            timestamps: aggregation.timestamps().to_vec(),
            series: aggregation
                .iter()
                .map(|(category, values)| CategoryEntry {
                    category: category.to_string(),
                    values: values.to_vec(),
                })
                .collect(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

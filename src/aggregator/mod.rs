//! Aggregation of input rows into chart series and metrics.
//!
//! This module transforms parsed rows into:
//! - A timestamp sequence and per-category weight series (for charting)
//! - Per-category totals (for the text summary)

pub mod metrics;
pub mod series_builder;

// Re-export main types and functions
pub use metrics::{calculate_category_totals, generate_text_summary, CategoryTotal};
pub use series_builder::{aggregate, try_aggregate, Aggregation, SeriesAggregator};

//! Chart generation using plotters.
//!
//! This module converts an aggregation into a stacked area or stacked bar
//! chart rendered as SVG.

pub mod generator;

// Re-export main types
pub use generator::{render_chart, stack_layers, ChartConfig, ChartStyle, Layer};

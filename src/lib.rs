//! Edge Graph
//!
//! Stacked charts of per-category weights over time, built from
//! `timestamp,category,weight` CSV dumps.
//!
//! This crate provides the core implementation for the `graph` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! cargo install edge-graph
//! graph edges.csv            # one chart
//! graph runs/ --style bar    # one chart per runs/*.csv
//! ```
//!
//! ## Library use
//!
//! ```no_run
//! use edge_graph::aggregator::try_aggregate;
//! use edge_graph::chart::render_chart;
//! use edge_graph::parser::open_rows;
//!
//! # fn main() -> anyhow::Result<()> {
//! let aggregation = try_aggregate(open_rows("edges.csv")?)?;
//! let svg = render_chart(&aggregation, None)?;
//! # let _ = svg;
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod chart;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;

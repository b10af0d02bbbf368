//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod graph;

// Re-export main command functions
pub use graph::{collect_input_files, execute_graph, validate_args, GraphArgs, GraphReport};

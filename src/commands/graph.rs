//! Graph command implementation.
//!
//! The graph command, for every input file:
//! 1. Reads the CSV rows
//! 2. Aggregates them into per-category series
//! 3. Renders a stacked chart
//! 4. Writes output files (SVG, optionally a JSON series dump)

use crate::aggregator::{generate_text_summary, try_aggregate};
use crate::chart::{render_chart, ChartConfig};
use crate::output::{derive_output_path, write_series, write_svg};
use crate::parser::{open_rows, SeriesExport};
use crate::utils::config::INPUT_EXTENSION;
use crate::utils::error::RenderError;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Upper bound for either chart dimension, in pixels
const MAX_DIMENSION: u32 = 16_384;

/// Arguments for the graph command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct GraphArgs {
    /// A CSV file, or a directory whose `*.csv` files are all graphed
    pub input: PathBuf,

    /// Where charts are written; next to each input when unset
    pub output_dir: Option<PathBuf>,

    /// Chart title, style and size
    pub chart: ChartConfig,

    /// Also write `<stem>.json` with the aggregated series
    pub write_json: bool,

    /// Print a per-category summary to stdout
    pub print_summary: bool,
}

impl Default for GraphArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("edges.csv"),
            output_dir: None,
            chart: ChartConfig::default(),
            write_json: false,
            print_summary: false,
        }
    }
}

/// What a graph run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphReport {
    /// SVG charts written, in processing order
    pub charts: Vec<PathBuf>,

    /// JSON series dumps written
    pub exports: Vec<PathBuf>,

    /// Inputs that had no rows to plot
    pub skipped: Vec<PathBuf>,
}

/// Execute the graph command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Unreadable input files
/// * Malformed rows (wrong field count, non-integer weight)
/// * Rendering or file write errors
///
/// Empty inputs are not errors: they are logged and listed in
/// [`GraphReport::skipped`].
pub fn execute_graph(args: &GraphArgs) -> Result<GraphReport> {
    let start_time = Instant::now();

    let files = collect_input_files(&args.input)?;
    info!("Graphing {} file(s) from {}", files.len(), args.input.display());
    debug!("Input files: {:?}", files);

    let mut report = GraphReport::default();
    for file in &files {
        graph_file(file, args, &mut report)
            .with_context(|| format!("Failed to graph {}", file.display()))?;
    }

    info!(
        "Wrote {} chart(s) in {:.2}s",
        report.charts.len(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(report)
}

/// Run the read/aggregate/render/write pipeline for one file
///
/// **Private** - internal helper for execute_graph
fn graph_file(file: &Path, args: &GraphArgs, report: &mut GraphReport) -> Result<()> {
    info!("Processing {}", file.display());

    // The reader owns the file handle; it is closed when this call returns.
    let rows = open_rows(file)?;
    let aggregation = try_aggregate(rows).context("Failed to read rows")?;

    if args.print_summary {
        println!("\n{}", "=".repeat(75));
        println!("{}", file.display());
        println!("{}", "=".repeat(75));
        println!("{}", generate_text_summary(&aggregation, 20));
    }

    if args.write_json {
        let json_path = derive_output_path(file, args.output_dir.as_deref(), "json");
        let export = SeriesExport::from_aggregation(&aggregation, file.display().to_string());
        write_series(&export, &json_path).context("Failed to write series JSON")?;
        report.exports.push(json_path);
    }

    let svg = match render_chart(&aggregation, Some(&args.chart)) {
        Ok(svg) => svg,
        Err(RenderError::EmptySeries) => {
            warn!("{} has no rows, nothing to plot", file.display());
            report.skipped.push(file.to_path_buf());
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to render chart"),
    };

    let svg_path = derive_output_path(file, args.output_dir.as_deref(), "svg");
    write_svg(&svg, &svg_path).context("Failed to write chart SVG")?;
    info!("✓ Chart written to: {}", svg_path.display());
    report.charts.push(svg_path);

    Ok(())
}

/// Resolve the input argument to the list of files to graph
///
/// **Public** - a directory expands to its `*.csv` files in lexicographic
/// order (not recursive); anything else is taken as a single file.
pub fn collect_input_files(input: &Path) -> Result<Vec<PathBuf>> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }

    let dir = input
        .to_str()
        .with_context(|| format!("Directory path is not valid UTF-8: {}", input.display()))?;
    let pattern = format!("{}/*.{}", glob::Pattern::escape(dir), INPUT_EXTENSION);
    debug!("Globbing {}", pattern);

    let mut files = glob::glob(&pattern)
        .with_context(|| format!("Invalid glob pattern {}", pattern))?
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to list input directory")?;
    files.retain(|path| path.is_file());
    files.sort();

    if files.is_empty() {
        warn!("No .{} files in {}", INPUT_EXTENSION, input.display());
    }

    Ok(files)
}

/// Validate graph arguments
///
/// **Public** - can be called before execute_graph for early validation
pub fn validate_args(args: &GraphArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if !args.input.exists() {
        anyhow::bail!("Input not found: {}", args.input.display());
    }

    if let Some(dir) = &args.output_dir {
        if dir.is_file() {
            anyhow::bail!("Output directory is a file: {}", dir.display());
        }
    }

    let (width, height) = (args.chart.width, args.chart.height);
    if width == 0 || height == 0 {
        anyhow::bail!("Chart dimensions must be greater than 0");
    }

    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        anyhow::bail!("Chart dimensions are too large (max {})", MAX_DIMENSION);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args_for(input: &Path) -> GraphArgs {
        GraphArgs {
            input: input.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_args_valid() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_args(&args_for(dir.path())).is_ok());
    }

    #[test]
    fn test_validate_args_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_args(&args_for(&dir.path().join("nope.csv"))).is_err());
    }

    #[test]
    fn test_validate_args_empty_input() {
        assert!(validate_args(&args_for(Path::new(""))).is_err());
    }

    #[test]
    fn test_validate_args_zero_width() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args_for(dir.path());
        args.chart.width = 0;
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_too_large() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args_for(dir.path());
        args.chart.height = MAX_DIMENSION + 1;
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_output_dir_is_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("edges.csv");
        fs::write(&file, "").unwrap();

        let mut args = args_for(dir.path());
        args.output_dir = Some(file);
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_collect_single_file() {
        let files = collect_input_files(Path::new("edges.csv")).unwrap();
        assert_eq!(files, vec![PathBuf::from("edges.csv")]);
    }

    #[test]
    fn test_collect_directory_sorted_csv_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["edges_2.csv", "edges_1.csv", "notes.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("nested.csv")).unwrap();

        let files = collect_input_files(dir.path()).unwrap();

        assert_eq!(
            files,
            vec![dir.path().join("edges_1.csv"), dir.path().join("edges_2.csv")]
        );
    }

    #[test]
    fn test_collect_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_input_files(dir.path()).unwrap().is_empty());
    }
}

//! Edge Graph CLI
//!
//! Renders a stacked chart of category weights over time for a CSV file,
//! or for every CSV file in a directory.

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use edge_graph::chart::{ChartConfig, ChartStyle};
use edge_graph::commands::{execute_graph, validate_args, GraphArgs};
use edge_graph::utils::config::{DEFAULT_HEIGHT, DEFAULT_TITLE, DEFAULT_WIDTH};

/// Edge Graph - stacked weight charts from timestamped CSV
#[derive(Parser, Debug)]
#[command(name = "graph")]
#[command(version, about, long_about = None)]
struct Cli {
    /// CSV file, or directory whose *.csv files are each graphed
    input: PathBuf,

    /// Chart style
    #[arg(short, long, value_enum, default_value_t = ChartStyle::Area)]
    style: ChartStyle,

    /// Directory for output files (defaults to next to each input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Chart title
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,

    /// Chart width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Chart height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// Also write the aggregated series as <stem>.json
    #[arg(long)]
    json: bool,

    /// Print a per-category summary to stdout
    #[arg(long)]
    summary: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Usage errors exit with 1; help and version keep clap's behavior
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let args = GraphArgs {
        input: cli.input,
        output_dir: cli.output_dir,
        chart: ChartConfig::new()
            .with_title(cli.title)
            .with_style(cli.style)
            .with_size(cli.width, cli.height),
        write_json: cli.json,
        print_summary: cli.summary,
    };

    // Validate args first
    validate_args(&args)?;

    execute_graph(&args)?;

    Ok(())
}

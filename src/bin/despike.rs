//! Command-line interface for removing spikes from geospatial data files.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use despike::io::{read_file, write_file};
use despike::{RemoveSpikes, DEFAULT_ANGLE_THRESHOLD, DEFAULT_MIN_DISTANCE};

#[derive(Parser)]
#[command(
    name = "despike",
    version,
    about = "Remove spikes from lines and polygons in geospatial data files",
    long_about = None
)]
struct Cli {
    /// Path to the input file
    #[arg(short, long)]
    input: PathBuf,

    /// Name of the specific layer/table in the input file (only for
    /// multi-layer formats)
    #[arg(short, long)]
    layer: Option<String>,

    /// Name of the geometry column. Specify this if the table contains
    /// multiple geometry columns
    #[arg(short, long)]
    geometry_column: Option<String>,

    /// Path to the output file
    #[arg(short, long)]
    output: PathBuf,

    /// Angle threshold in degrees. Vertices with an angle smaller than this
    /// threshold are considered spikes
    #[arg(short, long, default_value_t = DEFAULT_ANGLE_THRESHOLD)]
    angle: f64,

    /// Minimum distance between a vertex and its neighbors for it to be
    /// considered a spike, in source coordinate units
    #[arg(short = 'd', long, default_value_t = DEFAULT_MIN_DISTANCE)]
    min_distance: f64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> Result<()> {
    let table = read_file(&cli.input, cli.layer.as_deref())
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let table = table.with_geometry_column(cli.geometry_column.as_deref())?;

    info!(
        rows = table.len(),
        angle = cli.angle,
        min_distance = cli.min_distance,
        "removing spikes"
    );
    let cleaned = table.remove_spikes(cli.angle, cli.min_distance);

    write_file(&cleaned, &cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    match run(&cli) {
        Ok(()) => {
            println!(
                "Spikes removed successfully. Output saved to: {}",
                cli.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error processing data: {err:#}");
            ExitCode::FAILURE
        }
    }
}

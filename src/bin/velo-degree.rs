//! Rolling Median Degree CLI
//!
//! Reads a JSON-lines stream of payments and writes the median vertex degree
//! of the payment graph within a trailing time window, one line per payment.
//!
//! ## Usage
//!
//! ```bash
//! # Defaults: ./venmo_input/venmo-trans.txt -> ./venmo_output/output.txt, 60s window
//! velo-degree
//!
//! # Explicit paths and a 90 second window with debug logging
//! velo-degree -i payments.txt -o medians.txt -w 90 --debug
//!
//! # Settings from YAML, window overridden on the command line
//! velo-degree --config demo/venmo/velo-degree.yaml -w 30
//! ```

use clap::Parser;
use log::{LevelFilter, error};
use std::path::PathBuf;
use std::process;
use velodegree::{DegreeResult, MedianDegreePipeline, PipelineConfig};

#[derive(Parser)]
#[command(name = "velo-degree")]
#[command(about = "Rolling-window median vertex degree of a payment graph")]
#[command(version = "0.1.0")]
struct Cli {
    /// File containing JSON transactions, one per line
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file, one median degree per transaction
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Sliding window (lagging) in seconds [default: 60]
    #[arg(short, long, allow_negative_numbers = true)]
    window: Option<i64>,

    /// YAML configuration file; command-line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log verbosity [off, error, warn, info, debug, trace]; bare flag means debug
    #[arg(
        short,
        long = "debug",
        value_name = "LEVEL",
        num_args = 0..=1,
        default_missing_value = "debug"
    )]
    debug: Option<LevelFilter>,

    /// Suppress all log messages
    #[arg(short, long, conflicts_with = "debug")]
    quiet: bool,
}

impl Cli {
    fn pipeline_config(&self) -> DegreeResult<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_yaml_file(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(input) = &self.input {
            config.input = input.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(window) = self.window {
            config.window_size = window;
        }
        Ok(config)
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(LevelFilter::Off);
    } else if let Some(level) = cli.debug {
        builder.filter_level(level);
    }
    builder.init();
}

fn run(cli: &Cli) -> DegreeResult<()> {
    let config = cli.pipeline_config()?;
    let mut pipeline = MedianDegreePipeline::new(config)?;
    pipeline.run_files()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(err) = run(&cli) {
        let report = err.report();
        error!("{}", report);
        eprintln!("velo-degree failed: {}", report);
        process::exit(1);
    }
}

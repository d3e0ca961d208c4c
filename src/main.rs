mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::input::dedup::DuplicatePolicy;
use crate::input::{IngestOptions, InputError, load_records};
use crate::model::config::{ConfigError, ScoringConfig};
use crate::model::labels::LabelSet;
use crate::pipeline::stage5_report::{ExportFormat, ReportError, write_reports};
use crate::pipeline::{ScoringError, run_scoring};
use crate::report::ReportContext;

#[derive(Debug, Parser)]
#[command(name = "stationscore", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a sheet and write result tables and reports.
    Run(RunArgs),
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    /// Score sheet (.csv, .tsv or .txt, optionally gzip-compressed).
    #[arg(long)]
    input: PathBuf,
    /// Output directory.
    #[arg(long)]
    out: PathBuf,
    /// Minimum std floor; overrides the config file.
    #[arg(long = "min-std")]
    min_std: Option<f64>,
    /// JSON scoring config.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = DuplicatePolicy::Reject)]
    duplicates: DuplicatePolicy,
    /// Allowed categories, comma separated.
    #[arg(long, value_delimiter = ',')]
    categories: Option<Vec<String>>,
    /// Allowed stations, comma separated.
    #[arg(long, value_delimiter = ',')]
    stations: Option<Vec<String>>,
    /// Accept any category or station label.
    #[arg(long)]
    no_label_check: bool,
    #[arg(long, value_enum, default_value_t = ExportFormat::Tsv)]
    format: ExportFormat,
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

fn main() {
    let cli = Cli::parse();
    let Command::Run(args) = cli.command;
    logging::init_logging(args.verbose);
    if let Err(err) = run(&args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(args: &RunArgs) -> Result<Vec<PathBuf>, AppError> {
    let config = resolve_config(args)?;

    let opts = ingest_options(args);
    let records = load_records(&args.input, &opts)?;
    let run = run_scoring(&records, &config)?;
    if run.has_advisories() {
        tracing::warn!(
            n_advisories = run.advisories.len(),
            "run completed with advisories; see report.txt"
        );
    }

    let ctx = ReportContext {
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        input_path: args.input.display().to_string(),
        duplicate_policy: duplicate_policy_name(args.duplicates).to_string(),
        label_check: opts.labels.is_some(),
    };
    Ok(write_reports(&run, &ctx, &args.out, args.format)?)
}

fn resolve_config(args: &RunArgs) -> Result<ScoringConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => ScoringConfig::load(path)?,
        None => ScoringConfig::default(),
    };
    if let Some(floor) = args.min_std {
        config.min_std_floor = floor;
    }
    Ok(config)
}

fn ingest_options(args: &RunArgs) -> IngestOptions {
    let labels = if args.no_label_check {
        None
    } else {
        let mut labels = LabelSet::default();
        if let Some(categories) = &args.categories {
            labels.categories = trimmed_labels(categories);
        }
        if let Some(stations) = &args.stations {
            labels.stations = trimmed_labels(stations);
        }
        Some(labels)
    };
    IngestOptions {
        labels,
        duplicates: args.duplicates,
    }
}

/// Sheet fields are trimmed on read, so flag values must be too.
fn trimmed_labels(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn duplicate_policy_name(policy: DuplicatePolicy) -> &'static str {
    match policy {
        DuplicatePolicy::Reject => "reject",
        DuplicatePolicy::KeepFirst => "keep-first",
        DuplicatePolicy::KeepHighest => "keep-highest",
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;

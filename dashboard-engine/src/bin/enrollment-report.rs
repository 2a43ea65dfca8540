//! FILENAME: dashboard-engine/src/bin/enrollment-report.rs
//! Command-line driver: decode one or two enrollment uploads, apply filters
//! and print the dashboard figures as JSON.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use dashboard_engine::{
    aggregate_with, compare, resolve_options, DashboardConfig, Dataset, Dimension,
    FilterSelection,
};
use dataset::logging::init_stderr_logger;
use decoder::{decode_path, DecodeOutcome};
use log::LevelFilter;
use serde_json::json;

#[derive(Parser)]
#[command(about = "Summarize school enrollment uploads with cascading filters.")]
struct Args {
    /// Present-year upload (.csv or spreadsheet).
    #[arg(long)]
    present: PathBuf,

    /// Previous-year upload; enables the year-over-year comparison.
    #[arg(long)]
    previous: Option<PathBuf>,

    /// Filter as `DIMENSION=VALUE` (repeatable; values on one dimension accumulate).
    #[arg(long = "filter")]
    filters: Vec<String>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print only the legal filter options.
    #[arg(long)]
    options: bool,

    /// Log level for stderr diagnostics.
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

fn parse_filters(filters: &[String]) -> Result<FilterSelection> {
    let mut selection = FilterSelection::new();
    for filter in filters {
        let (name, value) = filter
            .split_once('=')
            .ok_or_else(|| anyhow!("filter '{}' is not DIMENSION=VALUE", filter))?;
        let dimension = Dimension::from_column_name(name.trim())
            .ok_or_else(|| anyhow!("unknown dimension '{}'", name.trim()))?;
        selection.add(dimension, value.trim());
    }
    Ok(selection)
}

fn load(path: &Path, config: &DashboardConfig) -> Result<Dataset> {
    match decode_path(path, config) {
        DecodeOutcome::Decoded(dataset) => Ok(dataset),
        DecodeOutcome::Failed { message } => bail!("Error reading {}: {}", path.display(), message),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_stderr_logger(args.log_level).context("installing logger")?;

    let config = match &args.config {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    let selection = parse_filters(&args.filters)?;

    let present = load(&args.present, &config)?;
    let options = resolve_options(&present, &selection);

    let report = if args.options {
        json!({ "options": options })
    } else {
        let result = aggregate_with(&present, &selection, &config);
        let comparison = match &args.previous {
            Some(path) => {
                let previous = load(path, &config)?;
                Some(compare(&present, &previous, &selection))
            }
            None => None,
        };
        json!({
            "selection": selection,
            "illegalSelections": selection.illegal_values(&options),
            "options": options,
            "aggregate": result,
            "cards": result.summary_cards(),
            "charts": result.charts(),
            "comparison": comparison,
        })
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

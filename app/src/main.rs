// In app/src/main.rs

use anyhow::{Context, Result};
use app_config::Settings;
use backtester::{
    evaluate, run_pipeline, write_json, write_result, OutputFormat, PipelineOutcome,
};
use clap::{Parser, Subcommand};
use core_types::Signal;
use forecast::{create_predictor, ModelKind};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::prelude::*;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Forecast-driven signal backtester.")]
struct Cli {
    /// Directory holding `base.toml` and the per-environment overrides.
    /// Defaults to `config/` in the working directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Trains a baseline model on a price CSV and backtests its forecasts.
    Backtest {
        /// Price CSV. Overrides `data.path`.
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// The predictor to train ("persistence" or "linear").
        #[arg(short, long, default_value = "linear")]
        model: ModelKind,

        /// Report file. Overrides `output.path`.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// "table", "csv" or "json". Overrides `output.format`.
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Backtests forecasts produced elsewhere, read from a `predicted,actual` CSV.
    Evaluate {
        #[arg(short, long)]
        predictions: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long)]
        format: Option<OutputFormat>,
    },
}

/// What a JSON report file holds.
#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    generated_at: String,
    command: &'static str,
    result: &'a T,
}

// --- Main Application Entry Point ---

fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(dir) => app_config::load_settings_from(dir)
            .with_context(|| format!("Failed to load settings from {}", dir.display()))?,
        None => app_config::load_settings().context("Failed to load settings from config/")?,
    };

    init_tracing(&settings.app.log_level);
    tracing::info!(environment = %settings.app.environment, "Starting forecaster");

    match cli.command {
        Commands::Backtest {
            data,
            model,
            output,
            format,
        } => handle_backtest(&settings, data, model, output, format)?,
        Commands::Evaluate {
            predictions,
            output,
            format,
        } => handle_evaluate(&settings, &predictions, output, format)?,
    }

    tracing::info!("Forecaster has finished successfully.");
    Ok(())
}

fn init_tracing(log_level: &str) {
    let level = log_level.parse().unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();
}

/// Handles the logic for the `backtest` subcommand.
fn handle_backtest(
    settings: &Settings,
    data: Option<PathBuf>,
    model: ModelKind,
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let start_time = Instant::now();

    // --- 1. Load Data ---
    let path = data
        .or_else(|| settings.data.path.as_ref().map(PathBuf::from))
        .context("No price data given: pass --data or set data.path")?;
    let series = dataset::load_csv(&path, &settings.data)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    tracing::info!(rows = series.len(), features = series.n_features(), "Loaded price series.");

    // --- 2. Train, Forecast and Backtest ---
    let mut predictor = create_predictor(model);
    let outcome = run_pipeline(&settings.pipeline, &series, predictor.as_mut())?;
    tracing::info!(
        model = %outcome.training.model,
        final_loss = outcome.training.final_loss,
        duration = ?start_time.elapsed(),
        "Pipeline finished."
    );

    // --- 3. Report ---
    let (format, output) = resolve_output(settings, output, format);
    match format {
        OutputFormat::Table => {
            print_training(&outcome);
            write_result(&outcome.backtest, format, output.as_deref())?;
        }
        OutputFormat::Json => save_json("backtest", &outcome, output.as_deref())?,
        OutputFormat::Csv => write_result(&outcome.backtest, format, output.as_deref())?,
    }
    Ok(())
}

/// Handles the logic for the `evaluate` subcommand.
fn handle_evaluate(
    settings: &Settings,
    predictions: &Path,
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let pairs = dataset::load_predictions_csv(predictions)
        .with_context(|| format!("Failed to load {}", predictions.display()))?;
    let (predicted, actual): (Vec<f64>, Vec<f64>) =
        pairs.iter().map(|p| (p.predicted, p.actual)).unzip();

    let (signals, backtest) = evaluate(&settings.pipeline, &predicted, &actual)?;
    log_signal_mix(&signals);

    let (format, output) = resolve_output(settings, output, format);
    match format {
        OutputFormat::Json => save_json("evaluate", &backtest, output.as_deref())?,
        _ => write_result(&backtest, format, output.as_deref())?,
    }
    Ok(())
}

/// Command-line flags win over the configured output settings.
fn resolve_output(
    settings: &Settings,
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
) -> (OutputFormat, Option<PathBuf>) {
    let format = format.unwrap_or(settings.output.format);
    let output = output.or_else(|| settings.output.path.as_ref().map(PathBuf::from));
    (format, output)
}

fn save_json<T: Serialize>(command: &'static str, result: &T, path: Option<&Path>) -> Result<()> {
    let envelope = Envelope {
        generated_at: chrono::Utc::now().to_rfc3339(),
        command,
        result,
    };
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_json(&envelope, BufWriter::new(file))?;
            tracing::info!(path = %path.display(), "JSON report written.");
        }
        None => write_json(&envelope, std::io::stdout().lock())?,
    }
    Ok(())
}

fn log_signal_mix(signals: &[Signal]) {
    let buys = signals.iter().filter(|s| **s == Signal::Buy).count();
    let sells = signals.iter().filter(|s| **s == Signal::Sell).count();
    tracing::info!(
        buys,
        sells,
        holds = signals.len() - buys - sells,
        "Generated trading signals."
    );
}

/// Helper function to print the training summary ahead of the backtest report.
fn print_training(outcome: &PipelineOutcome) {
    let summary = &outcome.training;
    println!("\n--- Training Summary ---");
    println!("Model:                 {}", summary.model);
    println!("Training Windows:      {}", summary.samples);
    println!("Epochs:                {}", summary.epochs);
    println!("Final Loss (scaled):   {:.6}", summary.final_loss);
    println!("Test Forecasts:        {}", outcome.predicted.len());
    println!(
        "Signals:               {} ({} position changes)",
        outcome.signals.len(),
        outcome.backtest.entries.len()
    );
}

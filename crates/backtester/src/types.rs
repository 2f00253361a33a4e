// In crates/backtester/src/types.rs

use analytics::{PerformanceReport, WinRateBasis};
use core_types::{Error, Position};
use forecast::TrainingSettings;
use serde::{Deserialize, Serialize};
use strategies::ThresholdSettings;

/// Everything the forecast-and-backtest pipeline needs, passed in explicitly.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PipelineConfig {
    #[serde(default = "default_train_fraction")]
    pub train_fraction: f64,
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Keep the legacy trailing trim that yields `len - window_size - 1` windows.
    #[serde(default = "default_true")]
    pub drop_last_window: bool,
    #[serde(default = "default_buy_threshold")]
    pub buy_threshold: f64,
    #[serde(default = "default_sell_threshold")]
    pub sell_threshold: f64,
    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,
    #[serde(default)]
    pub win_rate_basis: WinRateBasis,
    /// Scale every feature column, not only the price.
    #[serde(default)]
    pub scale_all_features: bool,
    #[serde(default)]
    pub training: TrainingSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            train_fraction: default_train_fraction(),
            window_size: default_window_size(),
            drop_last_window: true,
            buy_threshold: default_buy_threshold(),
            sell_threshold: default_sell_threshold(),
            initial_capital: default_initial_capital(),
            win_rate_basis: WinRateBasis::default(),
            scale_all_features: false,
            training: TrainingSettings::default(),
        }
    }
}

impl PipelineConfig {
    pub fn thresholds(&self) -> ThresholdSettings {
        ThresholdSettings {
            buy_threshold: self.buy_threshold,
            sell_threshold: self.sell_threshold,
        }
    }

    /// Checks ranges that the individual stages would otherwise reject mid-run.
    pub fn validate(&self) -> core_types::Result<()> {
        if !(self.train_fraction > 0.0 && self.train_fraction < 1.0) {
            return Err(Error::invalid(format!(
                "train_fraction must lie strictly between 0 and 1, got {}",
                self.train_fraction
            )));
        }
        if self.window_size == 0 {
            return Err(Error::invalid("window_size must be positive"));
        }
        if !self.initial_capital.is_finite() {
            return Err(Error::invalid("initial_capital must be a finite number"));
        }
        if self.training.batch_size == 0 {
            return Err(Error::invalid("training.batch_size must be positive"));
        }
        strategies::ThresholdStrategy::new(self.thresholds())?;
        Ok(())
    }
}

fn default_train_fraction() -> f64 {
    0.8
}
fn default_window_size() -> usize {
    60
}
fn default_true() -> bool {
    true
}
fn default_buy_threshold() -> f64 {
    0.03
}
fn default_sell_threshold() -> f64 {
    -0.03
}
fn default_initial_capital() -> f64 {
    1000.0
}

/// The simulation state carried from one step to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BacktestState {
    pub position: Position,
    pub capital: f64,
    /// Sum of step returns so far.
    pub cumulative_return: f64,
    /// Highest `cumulative_return` seen so far, starting at 0.
    pub running_max: f64,
}

impl BacktestState {
    pub fn new(initial_capital: f64) -> Self {
        Self {
            position: Position::Flat,
            capital: initial_capital,
            cumulative_return: 0.0,
            running_max: 0.0,
        }
    }

    /// Distance of the cumulative return below its running peak.
    pub fn drawdown(&self) -> f64 {
        self.running_max - self.cumulative_return
    }
}

/// A position change triggered by a non-hold signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub step: usize,
    pub position: i8,
    /// `capital * position` at the moment of the flip.
    pub invested_amount: f64,
}

/// One row of the backtest table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestRecord {
    pub step: usize,
    pub price: f64,
    /// The signal acted on during this step (0 at step 0).
    pub signal: i8,
    pub position: i8,
    pub returns: f64,
    pub cumulative_returns: f64,
    #[serde(rename = "drawdowns")]
    pub drawdown: f64,
    pub capital: f64,
    /// Broadcast scalar; empty when undefined.
    pub win_rate: Option<f64>,
    /// Broadcast scalar.
    pub max_drawdown: f64,
}

/// The full outcome of a backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BacktestResult {
    pub report: PerformanceReport,
    pub records: Vec<BacktestRecord>,
    pub entries: Vec<Entry>,
}

impl BacktestResult {
    pub fn returns(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.returns).collect()
    }

    pub fn cumulative_returns(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.cumulative_returns).collect()
    }

    pub fn drawdowns(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.drawdown).collect()
    }
}

/// How a finished run is presented.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown format '{other}', expected table, csv or json")),
        }
    }
}

// In crates/analytics/src/types.rs

use serde::{Deserialize, Serialize};

/// Which unit the headline win rate is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinRateBasis {
    /// Winning steps divided by entries. The two counts use different
    /// units, so the value can exceed 1.
    #[default]
    Legacy,
    /// Winning steps divided by steps spent in the market.
    PerStep,
    /// Profitable entries divided by entries.
    PerTrade,
}

/// The running curves derived from per-step returns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReturnCurves {
    pub cumulative_returns: Vec<f64>,
    pub drawdowns: Vec<f64>,
}

/// A summary of a strategy's performance over a backtest.
///
/// Win rates with a zero denominator are `None`: serialized as `null` in
/// JSON and as an empty cell in CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PerformanceReport {
    pub initial_capital: f64,
    pub final_capital: f64,
    pub net_pnl: f64,
    pub net_pnl_percentage: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
    pub profit_factor: Option<f64>,

    pub total_steps: usize,
    pub total_trades: usize,
    pub steps_in_market: usize,
    pub winning_steps: usize,
    pub winning_trades: usize,

    pub win_rate_basis: WinRateBasis,
    pub win_rate: Option<f64>,
    pub win_rate_legacy: Option<f64>,
    pub win_rate_per_step: Option<f64>,
    pub win_rate_per_trade: Option<f64>,
}

impl PerformanceReport {
    pub fn new() -> Self {
        Self::default()
    }
}

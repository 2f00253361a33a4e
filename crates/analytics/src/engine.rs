use crate::types::{PerformanceReport, ReturnCurves, WinRateBasis};
use core_types::{Position, Signal};

/// Running sum of per-step returns.
pub fn cumulative_returns(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(0.0, |total, r| {
            *total += r;
            Some(*total)
        })
        .collect()
}

/// Distance of each cumulative return below its running peak so far.
pub fn drawdowns(cumulative: &[f64]) -> Vec<f64> {
    cumulative
        .iter()
        .scan(f64::NEG_INFINITY, |peak, &value| {
            *peak = peak.max(value);
            Some(*peak - value)
        })
        .collect()
}

fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64)
}

/// The engine responsible for the post-simulation aggregates.
#[derive(Default)]
pub struct AnalyticsEngine {
    basis: WinRateBasis,
}

impl AnalyticsEngine {
    pub fn new(basis: WinRateBasis) -> Self {
        Self { basis }
    }

    /// Builds the report and curves from one simulated run.
    ///
    /// `returns[t]` and `positions[t]` describe step `t` (step 0 never trades);
    /// `signals[j]` is acted on at step `j + 1`.
    pub fn calculate(
        &self,
        initial_capital: f64,
        returns: &[f64],
        positions: &[Position],
        signals: &[Signal],
    ) -> (PerformanceReport, ReturnCurves) {
        let cumulative = cumulative_returns(returns);
        let drawdown = drawdowns(&cumulative);

        let mut report = PerformanceReport::new();
        report.win_rate_basis = self.basis;
        report.initial_capital = initial_capital;
        report.total_steps = returns.len();

        // --- P&L ---
        report.net_pnl = cumulative.last().copied().unwrap_or(0.0);
        report.final_capital = initial_capital + report.net_pnl;
        if initial_capital != 0.0 {
            report.net_pnl_percentage = report.net_pnl / initial_capital * 100.0;
        }

        // --- Drawdown ---
        report.max_drawdown = drawdown.iter().copied().fold(0.0, f64::max);

        // --- Win rates ---
        // Every non-hold signal is an entry, including a repeat of the current side.
        let entry_steps: Vec<usize> = signals
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_entry())
            .map(|(j, _)| j + 1)
            .collect();
        report.total_trades = entry_steps.len();
        report.winning_steps = returns.iter().filter(|r| **r > 0.0).count();
        report.steps_in_market = positions.iter().filter(|p| p.is_open()).count();
        report.winning_trades = entry_steps
            .iter()
            .enumerate()
            .filter(|(k, start)| {
                let end = entry_steps
                    .get(k + 1)
                    .copied()
                    .unwrap_or(returns.len())
                    .min(returns.len());
                let start = (**start).min(end);
                returns[start..end].iter().sum::<f64>() > 0.0
            })
            .count();

        report.win_rate_legacy = ratio(report.winning_steps, report.total_trades);
        report.win_rate_per_step = ratio(report.winning_steps, report.steps_in_market);
        report.win_rate_per_trade = ratio(report.winning_trades, report.total_trades);
        report.win_rate = match self.basis {
            WinRateBasis::Legacy => report.win_rate_legacy,
            WinRateBasis::PerStep => report.win_rate_per_step,
            WinRateBasis::PerTrade => report.win_rate_per_trade,
        };
        if report.win_rate.is_none() {
            tracing::warn!(basis = ?self.basis, "Win rate is undefined: no trades to measure.");
        }

        // --- Per-step ratios ---
        // Step 0 never carries a position, so it is left out of the sample.
        let step_returns = returns.get(1..).unwrap_or(&[]);
        if step_returns.len() > 1 {
            let n = step_returns.len() as f64;
            let mean = step_returns.iter().sum::<f64>() / n;
            let variance = step_returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
            let std_dev = variance.sqrt();
            report.sharpe_ratio = if std_dev > 0.0 { mean / std_dev } else { 0.0 };
        }

        let gross_profit: f64 = returns.iter().filter(|r| **r > 0.0).sum();
        let gross_loss: f64 = returns.iter().filter(|r| **r < 0.0).map(|r| r.abs()).sum();
        report.profit_factor = (gross_loss > 0.0).then(|| gross_profit / gross_loss);

        let curves = ReturnCurves {
            cumulative_returns: cumulative,
            drawdowns: drawdown,
        };
        (report, curves)
    }
}

pub mod error;
pub mod logger;
pub mod pipeline;
pub mod report;
pub mod types;

use analytics::{AnalyticsEngine, WinRateBasis};
use core_types::{Error as CoreError, Position, Signal};
use tracing::info;

pub use error::{Error, Result};
pub use logger::StepLog;
pub use pipeline::{evaluate, run_pipeline, PipelineOutcome};
pub use report::{print_report, render_report, write_csv, write_json, write_result};
pub use types::{
    BacktestRecord, BacktestResult, BacktestState, Entry, OutputFormat, PipelineConfig,
};

/// What a single step produced besides the new state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub step_return: f64,
    pub entry: Option<Entry>,
}

/// Advances the simulation by one step.
///
/// A non-hold `signal` replaces the position before the step is marked to
/// market; a hold carries it over. Capital and the cumulative return grow
/// additively by the step's P&L, and the running peak follows the latter.
pub fn step(
    state: BacktestState,
    signal: Signal,
    prev_price: f64,
    price: f64,
    t: usize,
) -> (BacktestState, StepOutcome) {
    let mut next = state;
    let entry = Position::from_signal(signal).map(|position| {
        next.position = position;
        Entry {
            step: t,
            position: position.direction() as i8,
            invested_amount: state.capital * position.direction(),
        }
    });

    let step_return = (price - prev_price) * next.position.direction();
    next.capital += step_return;
    next.cumulative_return += step_return;
    next.running_max = next.running_max.max(next.cumulative_return);

    (next, StepOutcome { step_return, entry })
}

/// The main engine for replaying a signal sequence against realized prices.
pub struct Backtester {
    initial_capital: f64,
    analytics: AnalyticsEngine,
}

impl Backtester {
    pub fn new(initial_capital: f64, win_rate_basis: WinRateBasis) -> core_types::Result<Self> {
        if !initial_capital.is_finite() {
            return Err(CoreError::invalid("initial capital must be a finite number"));
        }
        Ok(Self {
            initial_capital,
            analytics: AnalyticsEngine::new(win_rate_basis),
        })
    }

    /// Simulates `signals` (one per step transition) over `prices`.
    ///
    /// `signals[t - 1]` is acted on over the move from `prices[t - 1]` to
    /// `prices[t]`, so `signals` must be exactly one shorter than `prices`.
    pub fn run(&self, signals: &[Signal], prices: &[f64]) -> core_types::Result<BacktestResult> {
        let expected_signals = prices.len().saturating_sub(1);
        if signals.len() != expected_signals {
            return Err(CoreError::invalid(format!(
                "{} prices need {} signals, got {}",
                prices.len(),
                expected_signals,
                signals.len()
            )));
        }
        if let Some(t) = prices.iter().position(|p| !p.is_finite()) {
            return Err(CoreError::invalid(format!("price at step {t} is not finite")));
        }

        info!(
            steps = prices.len(),
            entries = signals.iter().filter(|s| s.is_entry()).count(),
            initial_capital = self.initial_capital,
            "Starting backtest."
        );

        let initial = (
            BacktestState::new(self.initial_capital),
            StepLog::new(self.initial_capital, prices.len()),
        );
        let (final_state, log) = signals
            .iter()
            .zip(prices.windows(2))
            .enumerate()
            .fold(initial, |(state, mut log), (j, (&signal, pair))| {
                let (next, outcome) = step(state, signal, pair[0], pair[1], j + 1);
                if let Some(entry) = outcome.entry {
                    log.record_entry(entry);
                }
                log.record_step(&next, outcome.step_return);
                (next, log)
            });

        let (report, curves) =
            self.analytics
                .calculate(self.initial_capital, &log.returns, &log.positions, signals);

        let records = prices
            .iter()
            .enumerate()
            .map(|(t, &price)| BacktestRecord {
                step: t,
                price,
                signal: t.checked_sub(1).map_or(0, |j| signals[j].value()),
                position: log.positions[t].direction() as i8,
                returns: log.returns[t],
                cumulative_returns: curves.cumulative_returns[t],
                drawdown: log.drawdowns[t],
                capital: log.capital[t],
                win_rate: report.win_rate,
                max_drawdown: report.max_drawdown,
            })
            .collect();

        info!(
            final_capital = final_state.capital,
            peak_return = final_state.running_max,
            net_pnl = report.net_pnl,
            max_drawdown = report.max_drawdown,
            win_rate = ?report.win_rate,
            "Backtest finished."
        );

        Ok(BacktestResult {
            report,
            records,
            entries: log.entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Signal::{Buy, Hold, Sell};

    fn backtester() -> Backtester {
        Backtester::new(1000.0, WinRateBasis::Legacy).unwrap()
    }

    #[test]
    fn test_buy_then_hold() {
        let result = backtester().run(&[Buy, Hold], &[100.0, 101.0, 100.0]).unwrap();

        assert_eq!(result.returns(), vec![0.0, 1.0, -1.0]);
        assert_eq!(result.cumulative_returns(), vec![0.0, 1.0, 0.0]);
        assert_eq!(result.drawdowns(), vec![0.0, 0.0, 1.0]);
        assert_eq!(result.report.max_drawdown, 1.0);
        assert_eq!(result.records[1].position, 1);
        assert_eq!(result.records[2].capital, 1000.0);
        // One winning step over one entry.
        assert_eq!(result.report.win_rate, Some(1.0));
    }

    #[test]
    fn test_short_profits_from_fall() {
        let result = backtester().run(&[Sell, Hold], &[10.0, 8.0, 7.0]).unwrap();
        assert_eq!(result.returns(), vec![0.0, 2.0, 1.0]);
        assert_eq!(result.report.final_capital, 1003.0);
    }

    #[test]
    fn test_flip_records_invested_amount() {
        let result = backtester().run(&[Buy, Sell], &[100.0, 110.0, 105.0]).unwrap();

        assert_eq!(result.returns(), vec![0.0, 10.0, 5.0]);
        assert_eq!(
            result.entries,
            vec![
                Entry { step: 1, position: 1, invested_amount: 1000.0 },
                Entry { step: 2, position: -1, invested_amount: -1010.0 },
            ]
        );
    }

    #[test]
    fn test_hold_before_first_entry_stays_flat() {
        let result = backtester().run(&[Hold, Buy], &[1.0, 5.0, 6.0]).unwrap();
        assert_eq!(result.returns(), vec![0.0, 0.0, 1.0]);
        assert_eq!(result.records[1].position, 0);
    }

    #[test]
    fn test_all_holds_leave_win_rate_undefined() {
        let result = backtester().run(&[Hold, Hold], &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(result.report.win_rate, None);
        assert!(result.records.iter().all(|r| r.win_rate.is_none()));
        assert_eq!(result.report.final_capital, 1000.0);
    }

    #[test]
    fn test_deterministic() {
        let signals = [Buy, Hold, Sell, Hold, Buy];
        let prices = [10.0, 11.0, 9.5, 9.0, 12.0, 12.5];
        let first = backtester().run(&signals, &prices).unwrap();
        let second = backtester().run(&signals, &prices).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_and_single_price() {
        let empty = backtester().run(&[], &[]).unwrap();
        assert!(empty.records.is_empty());
        assert_eq!(empty.report.max_drawdown, 0.0);

        let single = backtester().run(&[], &[42.0]).unwrap();
        assert_eq!(single.returns(), vec![0.0]);
        assert_eq!(single.report.win_rate, None);
    }

    #[test]
    fn test_length_mismatch_is_invalid() {
        let err = backtester().run(&[Buy, Buy, Buy], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
        assert!(backtester().run(&[Buy], &[]).is_err());
    }

    #[test]
    fn test_step_carries_running_peak() {
        let start = BacktestState::new(1000.0);
        let (up, _) = step(start, Buy, 100.0, 103.0, 1);
        let (down, _) = step(up, Hold, 103.0, 101.0, 2);
        let (flipped, outcome) = step(down, Sell, 101.0, 102.0, 3);

        assert_eq!(up.running_max, 3.0);
        assert_eq!(down.cumulative_return, 1.0);
        assert_eq!(down.running_max, 3.0);
        assert_eq!(down.drawdown(), 2.0);
        assert_eq!(outcome.step_return, -1.0);
        assert_eq!(flipped.drawdown(), 3.0);
        assert_eq!(flipped.capital, 1000.0);
    }

    #[test]
    fn test_fold_drawdowns_match_analytics_curves() {
        let signals = [Buy, Hold, Sell, Hold, Buy];
        let prices = [10.0, 11.0, 9.5, 9.0, 12.0, 12.5];
        let result = backtester().run(&signals, &prices).unwrap();

        let curve = analytics::drawdowns(&result.cumulative_returns());
        assert_eq!(result.drawdowns(), curve);
    }

    #[test]
    fn test_non_finite_capital_rejected() {
        assert!(Backtester::new(f64::NAN, WinRateBasis::Legacy).is_err());
    }
}

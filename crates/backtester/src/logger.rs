// In crates/backtester/src/logger.rs

use crate::types::{BacktestState, Entry};
use core_types::Position;

/// Accumulates what happens at every step of a backtest.
#[derive(Debug, Clone, PartialEq)]
pub struct StepLog {
    pub returns: Vec<f64>,
    pub positions: Vec<Position>,
    pub capital: Vec<f64>,
    pub drawdowns: Vec<f64>,
    pub entries: Vec<Entry>,
}

impl StepLog {
    /// Creates a log holding step 0: flat, no return, the starting capital.
    pub fn new(initial_capital: f64, steps: usize) -> Self {
        let mut log = Self {
            returns: Vec::with_capacity(steps),
            positions: Vec::with_capacity(steps),
            capital: Vec::with_capacity(steps),
            drawdowns: Vec::with_capacity(steps),
            entries: Vec::new(),
        };
        if steps > 0 {
            log.record_step(&BacktestState::new(initial_capital), 0.0);
        }
        log
    }

    /// Records the state after a step and the return earned over it.
    pub fn record_step(&mut self, state: &BacktestState, step_return: f64) {
        self.returns.push(step_return);
        self.positions.push(state.position);
        self.capital.push(state.capital);
        self.drawdowns.push(state.drawdown());
    }

    pub fn record_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }
}

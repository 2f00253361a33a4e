// In crates/strategies/src/types.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct ThresholdSettings {
    /// Expected rise above which we go long. Must be positive.
    pub buy_threshold: f64,
    /// Expected fall below which we go short. Must be negative.
    pub sell_threshold: f64,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            buy_threshold: 0.03,
            sell_threshold: -0.03,
        }
    }
}

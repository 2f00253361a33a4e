// In crates/strategies/src/lib.rs

use core_types::{Result, Signal};
pub mod threshold;
pub mod types;

pub use threshold::ThresholdStrategy;
pub use types::ThresholdSettings;

/// The universal interface for turning forecasts into trading decisions.
///
/// `predicted[t]` is the model's forecast for `actual[t]`. The returned
/// sequence is one shorter than the inputs: `signal[t]` is decided after
/// observing `actual[t]` and acted on over the step to `actual[t + 1]`.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    fn generate(&self, predicted: &[f64], actual: &[f64]) -> Result<Vec<Signal>>;
}

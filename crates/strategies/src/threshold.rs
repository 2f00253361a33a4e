// In crates/strategies/src/threshold.rs

use crate::types::ThresholdSettings;
use crate::Strategy;
use core_types::{Error, Result, Signal};

/// Buys when the forecast sits far enough above the last known price and
/// sells when it sits far enough below it.
#[derive(Debug, Clone)]
pub struct ThresholdStrategy {
    settings: ThresholdSettings,
}

impl ThresholdStrategy {
    /// Creates a strategy, rejecting a non-positive buy or non-negative sell threshold.
    pub fn new(settings: ThresholdSettings) -> Result<Self> {
        let ThresholdSettings {
            buy_threshold,
            sell_threshold,
        } = settings;
        if !(buy_threshold > 0.0 && buy_threshold.is_finite()) {
            return Err(Error::invalid(format!(
                "buy threshold must be positive, got {buy_threshold}"
            )));
        }
        if !(sell_threshold < 0.0 && sell_threshold.is_finite()) {
            return Err(Error::invalid(format!(
                "sell threshold must be negative, got {sell_threshold}"
            )));
        }
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &ThresholdSettings {
        &self.settings
    }

    fn classify(&self, delta: f64) -> Signal {
        if delta > self.settings.buy_threshold {
            Signal::Buy
        } else if delta < self.settings.sell_threshold {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}

impl Strategy for ThresholdStrategy {
    fn name(&self) -> &'static str {
        "threshold"
    }

    /// `delta[t] = predicted[t + 1] - actual[t]`: the next forecast measured
    /// against the last observed price, not against the previous forecast.
    fn generate(&self, predicted: &[f64], actual: &[f64]) -> Result<Vec<Signal>> {
        if predicted.len() != actual.len() {
            return Err(Error::invalid(format!(
                "predicted has {} values but actual has {}",
                predicted.len(),
                actual.len()
            )));
        }

        let signals: Vec<Signal> = predicted
            .iter()
            .skip(1)
            .zip(actual)
            .map(|(next_forecast, last_price)| self.classify(next_forecast - last_price))
            .collect();

        tracing::debug!(
            strategy = self.name(),
            signals = signals.len(),
            entries = signals.iter().filter(|s| s.is_entry()).count(),
            "Generated trading signals."
        );

        Ok(signals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy(buy: f64, sell: f64) -> ThresholdStrategy {
        ThresholdStrategy::new(ThresholdSettings {
            buy_threshold: buy,
            sell_threshold: sell,
        })
        .unwrap()
    }

    #[test]
    fn test_rising_forecast_buys() {
        let signals = strategy(0.5, -0.5)
            .generate(&[1.0, 2.0, 3.0, 4.0], &[1.0, 1.0, 1.0, 1.0])
            .unwrap();
        assert_eq!(signals, vec![Signal::Buy; 3]);
    }

    #[test]
    fn test_flat_forecast_holds() {
        let prices = [5.0, 5.0, 5.0, 5.0];
        let signals = strategy(0.03, -0.03).generate(&prices, &prices).unwrap();
        assert_eq!(signals, vec![Signal::Hold; 3]);
    }

    #[test]
    fn test_uses_next_forecast_against_last_actual() {
        // delta = [0.9 - 1.0, 1.2 - 1.1] = [-0.1, 0.1]
        let signals = strategy(0.05, -0.05)
            .generate(&[9.0, 0.9, 1.2], &[1.0, 1.1, 9.0])
            .unwrap();
        assert_eq!(signals, vec![Signal::Sell, Signal::Buy]);
    }

    #[test]
    fn test_thresholds_are_strict() {
        // A delta exactly on the threshold holds.
        let signals = strategy(0.5, -0.5)
            .generate(&[0.0, 1.5, 0.5], &[1.0, 1.0, 1.0])
            .unwrap();
        assert_eq!(signals, vec![Signal::Hold, Signal::Hold]);
    }

    #[test]
    fn test_short_inputs_give_no_signals() {
        let s = strategy(0.1, -0.1);
        assert!(s.generate(&[], &[]).unwrap().is_empty());
        assert!(s.generate(&[1.0], &[2.0]).unwrap().is_empty());
    }

    #[test]
    fn test_length_mismatch_is_invalid() {
        let err = strategy(0.1, -0.1).generate(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_rejects_bad_thresholds() {
        for (buy, sell) in [(0.0, -0.1), (-0.1, -0.1), (0.1, 0.0), (0.1, 0.2), (f64::NAN, -0.1)] {
            let result = ThresholdStrategy::new(ThresholdSettings {
                buy_threshold: buy,
                sell_threshold: sell,
            });
            assert!(matches!(result, Err(Error::InvalidArgument(_))), "{buy} {sell}");
        }
    }
}

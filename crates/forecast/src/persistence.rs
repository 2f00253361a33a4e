// In crates/forecast/src/persistence.rs

use crate::types::{TrainingSettings, TrainingSummary};
use crate::{mse, Error, Predictor, Result};
use dataset::Sequences;
use ndarray::ArrayView2;

/// Forecasts that the next price equals the last price in the window.
///
/// Needs no training, which makes it the reference any learned model has to beat.
#[derive(Debug, Default, Clone)]
pub struct Persistence;

impl Persistence {
    pub fn new() -> Self {
        Self
    }
}

impl Predictor for Persistence {
    fn name(&self) -> &'static str {
        "persistence"
    }

    fn fit(&mut self, train: &Sequences, _settings: &TrainingSettings) -> Result<TrainingSummary> {
        let predicted = self.predict_batch(&train.windows)?;
        Ok(TrainingSummary {
            model: self.name().to_string(),
            samples: train.len(),
            epochs: 0,
            final_loss: mse(&predicted, &train.labels),
        })
    }

    fn predict(&self, window: ArrayView2<'_, f64>) -> Result<f64> {
        let rows = window.nrows();
        if rows == 0 || window.ncols() == 0 {
            return Err(Error::ShapeMismatch {
                expected: (1, 1),
                found: window.dim(),
            });
        }
        Ok(window[[rows - 1, 0]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_predicts_last_price() {
        let model = Persistence::new();
        let window = array![[1.0, 7.0], [2.0, 8.0], [3.0, 9.0]];
        assert_eq!(model.predict(window.view()).unwrap(), 3.0);
    }

    #[test]
    fn test_fit_reports_baseline_loss() {
        let data = array![[1.0], [2.0], [3.0], [5.0], [5.0]];
        let train = dataset::Sequencer::new(2).unwrap().create_sequences(&data);

        let summary = Persistence::new()
            .fit(&train, &TrainingSettings::default())
            .unwrap();

        // Windows [1,2] -> 3 and [2,3] -> 5: errors 1 and 2.
        assert_eq!(summary.samples, 2);
        assert!((summary.final_loss - 2.5).abs() < 1e-12);
    }
}

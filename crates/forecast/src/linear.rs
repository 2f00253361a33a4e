// In crates/forecast/src/linear.rs

use crate::types::{TrainingSettings, TrainingSummary};
use crate::{mse, Error, Predictor, Result};
use core_types::Error as CoreError;
use dataset::Sequences;
use ndarray::{s, Array1, Array2, ArrayView2};

/// A linear autoregressive model over the window's price column.
///
/// `y = w . x + b`, fit by mini-batch gradient descent on mean squared error.
/// Batches are taken in time order; nothing is shuffled.
#[derive(Debug, Clone, Default)]
pub struct LinearAutoregressor {
    weights: Option<Array1<f64>>,
    bias: f64,
}

impl LinearAutoregressor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weights(&self) -> Option<&Array1<f64>> {
        self.weights.as_ref()
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    fn forward(&self, weights: &Array1<f64>, x: &ArrayView2<'_, f64>) -> Array1<f64> {
        x.dot(weights) + self.bias
    }
}

impl Predictor for LinearAutoregressor {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn fit(&mut self, train: &Sequences, settings: &TrainingSettings) -> Result<TrainingSummary> {
        if train.is_empty() {
            return Err(CoreError::InsufficientData {
                needed: 1,
                available: 0,
            }
            .into());
        }
        if settings.batch_size == 0 {
            return Err(CoreError::invalid("batch size must be positive").into());
        }
        if !(settings.learning_rate > 0.0 && settings.learning_rate.is_finite()) {
            return Err(CoreError::invalid(format!(
                "learning rate must be a positive number, got {}",
                settings.learning_rate
            ))
            .into());
        }

        let window_size = train.window_size();
        let x: Array2<f64> = train.windows.slice(s![.., .., 0]).to_owned();
        let y = &train.labels;
        let n = train.len();

        // Start from the persistence forecast so early epochs are already sensible.
        let mut weights = Array1::zeros(window_size);
        weights[window_size - 1] = 1.0;
        self.bias = 0.0;

        tracing::info!(
            model = self.name(),
            samples = n,
            window_size,
            epochs = settings.epochs,
            batch_size = settings.batch_size,
            "Training predictor."
        );

        let mut loss = mse(&self.forward(&weights, &x.view()), y);
        for epoch in 0..settings.epochs {
            for start in (0..n).step_by(settings.batch_size) {
                let end = (start + settings.batch_size).min(n);
                let xb = x.slice(s![start..end, ..]);
                let yb = y.slice(s![start..end]);

                let err = self.forward(&weights, &xb) - &yb;
                let scale = 2.0 * settings.learning_rate / (end - start) as f64;
                weights.scaled_add(-scale, &xb.t().dot(&err));
                self.bias -= scale * err.sum();
            }

            loss = mse(&self.forward(&weights, &x.view()), y);
            if !loss.is_finite() {
                return Err(Error::Diverged { epoch });
            }
            tracing::debug!(epoch, loss, "Epoch finished.");
        }

        tracing::info!(model = self.name(), final_loss = loss, "Training finished.");
        self.weights = Some(weights);

        Ok(TrainingSummary {
            model: self.name().to_string(),
            samples: n,
            epochs: settings.epochs,
            final_loss: loss,
        })
    }

    fn predict(&self, window: ArrayView2<'_, f64>) -> Result<f64> {
        let weights = self.weights.as_ref().ok_or(Error::NotTrained("linear"))?;
        if window.nrows() != weights.len() || window.ncols() == 0 {
            return Err(Error::ShapeMismatch {
                expected: (weights.len(), window.ncols().max(1)),
                found: window.dim(),
            });
        }
        Ok(window.column(0).dot(weights) + self.bias)
    }
}

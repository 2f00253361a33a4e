// In crates/forecast/src/lib.rs

use dataset::Sequences;
use ndarray::{Array1, Array3, ArrayView2};

pub mod error;
pub mod linear;
pub mod persistence;
pub mod types;

pub use error::{Error, Result};
pub use linear::LinearAutoregressor;
pub use persistence::Persistence;
pub use types::{ModelKind, TrainingSettings, TrainingSummary};

/// The universal interface for a next-step price model.
///
/// A predictor sees windows of `[window_size, features]` values in scaled
/// space and returns one scaled scalar per window: its forecast for the price
/// right after the window.
pub trait Predictor {
    /// The name of the model.
    fn name(&self) -> &'static str;

    /// Trains on `(window, label)` pairs taken from the training prefix.
    fn fit(&mut self, train: &Sequences, settings: &TrainingSettings) -> Result<TrainingSummary>;

    /// Forecasts the value following a single window.
    fn predict(&self, window: ArrayView2<'_, f64>) -> Result<f64>;

    /// Forecasts every window of a `[samples, window_size, features]` batch.
    fn predict_batch(&self, windows: &Array3<f64>) -> Result<Array1<f64>> {
        windows
            .outer_iter()
            .map(|window| self.predict(window))
            .collect::<Result<Vec<f64>>>()
            .map(Array1::from)
    }
}

/// Builds one of the built-in predictors.
pub fn create_predictor(kind: ModelKind) -> Box<dyn Predictor> {
    match kind {
        ModelKind::Persistence => Box::new(Persistence::new()),
        ModelKind::Linear => Box::new(LinearAutoregressor::new()),
    }
}

/// Mean squared error between two equally long vectors.
pub(crate) fn mse(predicted: &Array1<f64>, labels: &Array1<f64>) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }
    let diff = predicted - labels;
    diff.dot(&diff) / labels.len() as f64
}

// In crates/dataset/src/lib.rs

//! Turning a raw price table into supervised-learning examples.
//!
//! - `loader` reads a CSV file into a [`TimeSeries`] with the price column first.
//! - `split` cuts a series into a training prefix and a testing suffix.
//! - `scaler` maps values into a bounded range and back.
//! - `sequencer` builds sliding windows and next-step labels.

pub mod error;
pub mod loader;
pub mod scaler;
pub mod sequencer;
pub mod split;
pub mod types;

pub use core_types::TimeSeries;
pub use error::{Error, Result};
pub use loader::{load_csv, load_predictions_csv, PredictionPair};
pub use scaler::{MinMaxScaler, Scaler};
pub use sequencer::{Sequencer, Sequences};
pub use split::train_test_split;
pub use types::DataSettings;

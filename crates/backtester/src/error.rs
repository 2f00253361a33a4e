// In crates/backtester/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] core_types::Error),

    #[error("Data preparation failed: {0}")]
    Dataset(#[from] dataset::Error),

    #[error("Predictor failed: {0}")]
    Forecast(#[from] forecast::Error),

    #[error("Failed to write report: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to write CSV report: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to write JSON report: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

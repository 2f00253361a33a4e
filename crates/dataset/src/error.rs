// In crates/dataset/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] core_types::Error),

    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Column '{0}' not found in the CSV header")]
    MissingColumn(String),

    #[error("Row {row}, column '{column}': cannot parse '{value}' as a number")]
    ParseValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Scaler must be fitted before it can transform values")]
    ScalerNotFitted,

    #[error("Expected {expected} columns, got {found}")]
    ShapeMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

// In crates/core-types/src/error.rs

use thiserror::Error;

/// Errors shared by every stage of the forecasting pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Insufficient data: need at least {needed} rows, got {available}")]
    InsufficientData { needed: usize, available: usize },
}

impl Error {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

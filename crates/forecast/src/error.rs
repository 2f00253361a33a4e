// In crates/forecast/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] core_types::Error),

    #[error("Model '{0}' must be trained before it can predict")]
    NotTrained(&'static str),

    #[error("Window has shape {found:?}, model expects {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Training diverged at epoch {epoch}: loss is not finite")]
    Diverged { epoch: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

// In crates/forecast/src/types.rs

use serde::{Deserialize, Serialize};

/// Training parameters handed to a predictor's `fit`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TrainingSettings {
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            epochs: default_epochs(),
            batch_size: default_batch_size(),
            learning_rate: default_learning_rate(),
        }
    }
}

fn default_epochs() -> usize {
    750
}

fn default_batch_size() -> usize {
    32
}

fn default_learning_rate() -> f64 {
    0.01
}

/// What a training run reports back.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct TrainingSummary {
    pub model: String,
    pub samples: usize,
    pub epochs: usize,
    /// Mean squared error over the training set after the last epoch.
    pub final_loss: f64,
}

/// The built-in predictors selectable from the command line.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Persistence,
    #[default]
    Linear,
}

impl std::str::FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "persistence" => Ok(ModelKind::Persistence),
            "linear" => Ok(ModelKind::Linear),
            other => Err(format!("unknown model '{other}', expected 'persistence' or 'linear'")),
        }
    }
}

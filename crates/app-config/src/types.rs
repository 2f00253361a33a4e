// In crates/app-config/src/types.rs

use backtester::{OutputFormat, PipelineConfig};
use core_types::Error;
use dataset::DataSettings;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    /// Where the price table lives and which columns to use.
    #[serde(default)]
    pub data: DataSettings,
    /// Split, window, threshold, capital and training parameters.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    #[serde(default = "default_environment")]
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
    /// Report file. Stdout when unset.
    #[serde(default)]
    pub path: Option<String>,
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Settings {
    /// Rejects out-of-range values before any data is touched.
    pub fn validate(&self) -> core_types::Result<()> {
        if !LOG_LEVELS.contains(&self.app.log_level.to_ascii_lowercase().as_str()) {
            return Err(Error::invalid(format!(
                "app.log_level must be one of {LOG_LEVELS:?}, got '{}'",
                self.app.log_level
            )));
        }
        if self.data.price_column.is_empty() {
            return Err(Error::invalid("data.price_column must not be empty"));
        }
        self.pipeline.validate()
    }
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

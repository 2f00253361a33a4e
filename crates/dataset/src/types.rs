// In crates/dataset/src/types.rs

use serde::{Deserialize, Serialize};

/// Where the raw series comes from and how its columns map to features.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DataSettings {
    /// Path to the CSV file. Can be overridden on the command line.
    #[serde(default)]
    pub path: Option<String>,
    /// The column used for labels and backtesting. Moved to column 0.
    #[serde(default = "default_price_column")]
    pub price_column: String,
    /// Column skipped when `feature_columns` is empty.
    #[serde(default = "default_timestamp_column")]
    pub timestamp_column: String,
    /// Extra feature columns, in order. Empty means every non-timestamp column.
    #[serde(default)]
    pub feature_columns: Vec<String>,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: None,
            price_column: default_price_column(),
            timestamp_column: default_timestamp_column(),
            feature_columns: Vec::new(),
        }
    }
}

fn default_price_column() -> String {
    "close".to_string()
}

fn default_timestamp_column() -> String {
    "timestamp".to_string()
}

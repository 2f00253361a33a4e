// In crates/dataset/src/loader.rs

use crate::types::DataSettings;
use crate::{Error, Result};
use core_types::TimeSeries;
use csv::{Reader, StringRecord};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Loads a CSV price table into a [`TimeSeries`].
///
/// The configured price column always lands at index 0. Rows keep file order.
pub fn load_csv<P: AsRef<Path>>(path: P, settings: &DataSettings) -> Result<TimeSeries> {
    let file = File::open(&path)?;
    let mut reader = Reader::from_reader(file);
    let headers = reader.headers()?.clone();

    let columns = select_columns(&headers, settings)?;
    let indices: Vec<usize> = columns
        .iter()
        .map(|name| column_index(&headers, name))
        .collect::<Result<_>>()?;

    let mut flat = Vec::new();
    let mut rows = 0;
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        for (&idx, name) in indices.iter().zip(&columns) {
            flat.push(parse_cell(&record, idx, row, name)?);
        }
        rows += 1;
    }

    let values = Array2::from_shape_vec((rows, columns.len()), flat)
        .map_err(|e| core_types::Error::invalid(e.to_string()))?;

    tracing::info!(
        path = %path.as_ref().display(),
        rows,
        features = columns.len(),
        price_column = %settings.price_column,
        "Loaded price series."
    );

    Ok(TimeSeries::new(columns, values)?)
}

/// One externally produced forecast and the price it was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionPair {
    pub predicted: f64,
    pub actual: f64,
}

/// Loads `predicted,actual` rows written by an external model.
pub fn load_predictions_csv<P: AsRef<Path>>(path: P) -> Result<Vec<PredictionPair>> {
    let file = File::open(&path)?;
    let mut reader = Reader::from_reader(file);

    let pairs = reader
        .deserialize()
        .collect::<std::result::Result<Vec<PredictionPair>, csv::Error>>()?;

    tracing::info!(path = %path.as_ref().display(), rows = pairs.len(), "Loaded predictions.");
    Ok(pairs)
}

fn select_columns(headers: &StringRecord, settings: &DataSettings) -> Result<Vec<String>> {
    let mut columns = vec![settings.price_column.clone()];

    if settings.feature_columns.is_empty() {
        columns.extend(
            headers
                .iter()
                .filter(|h| *h != settings.price_column && *h != settings.timestamp_column)
                .map(str::to_string),
        );
    } else {
        columns.extend(
            settings
                .feature_columns
                .iter()
                .filter(|c| **c != settings.price_column)
                .cloned(),
        );
    }

    Ok(columns)
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| Error::MissingColumn(name.to_string()))
}

fn parse_cell(record: &StringRecord, idx: usize, row: usize, column: &str) -> Result<f64> {
    let raw = record.get(idx).unwrap_or("").trim();
    raw.parse::<f64>().map_err(|_| Error::ParseValue {
        row: row + 1,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_price_column_moves_first() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "btc.csv",
            "timestamp,open,close,volume\n1,10,11,100\n2,11,12,200\n",
        );

        let series = load_csv(&path, &DataSettings::default()).unwrap();

        assert_eq!(series.columns(), &["close", "open", "volume"]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.prices().to_vec(), vec![11.0, 12.0]);
        assert_eq!(series.values()[[1, 2]], 200.0);
    }

    #[test]
    fn test_explicit_feature_columns() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "btc.csv",
            "timestamp,open,close,volume\n1,10,11,100\n",
        );
        let settings = DataSettings {
            feature_columns: vec!["volume".into()],
            ..DataSettings::default()
        };

        let series = load_csv(&path, &settings).unwrap();
        assert_eq!(series.columns(), &["close", "volume"]);
    }

    #[test]
    fn test_missing_price_column() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "x.csv", "timestamp,open\n1,10\n");

        let err = load_csv(&path, &DataSettings::default()).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(ref c) if c == "close"));
    }

    #[test]
    fn test_unparseable_cell_names_row_and_column() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "x.csv", "close\n1.5\nn/a\n");

        let err = load_csv(&path, &DataSettings::default()).unwrap_err();
        match err {
            Error::ParseValue { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, "close");
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_predictions() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "pred.csv", "predicted,actual\n1.0,1.5\n2.0,2.5\n");

        let pairs = load_predictions_csv(&path).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1], PredictionPair { predicted: 2.0, actual: 2.5 });
    }
}

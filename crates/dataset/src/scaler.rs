// In crates/dataset/src/scaler.rs

use crate::{Error, Result};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// A reversible per-column transform fit on training data only.
pub trait Scaler {
    /// Learns the scaling parameters from `data`.
    fn fit(&mut self, data: &Array2<f64>) -> Result<()>;

    /// Applies the fitted parameters without refitting.
    fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>>;

    /// Maps scaled values back to the original range.
    fn inverse_transform(&self, data: &Array2<f64>) -> Result<Array2<f64>>;

    fn fit_transform(&mut self, data: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(data)?;
        self.transform(data)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct MinMaxParams {
    min: Array1<f64>,
    range: Array1<f64>,
}

/// Min-max scaling into `feature_range`, default `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    params: Option<MinMaxParams>,
    feature_range: (f64, f64),
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl MinMaxScaler {
    pub fn new() -> Self {
        Self {
            params: None,
            feature_range: (0.0, 1.0),
        }
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.feature_range = (min, max);
        self
    }

    pub fn is_fitted(&self) -> bool {
        self.params.is_some()
    }

    fn params(&self) -> Result<&MinMaxParams> {
        self.params.as_ref().ok_or(Error::ScalerNotFitted)
    }

    fn check_width(&self, data: &Array2<f64>) -> Result<&MinMaxParams> {
        let params = self.params()?;
        if data.ncols() != params.min.len() {
            return Err(Error::ShapeMismatch {
                expected: params.min.len(),
                found: data.ncols(),
            });
        }
        Ok(params)
    }

    /// Inverse-transforms values that all belong to column `col`.
    ///
    /// Used to map scaled price predictions back without padding a matrix.
    pub fn inverse_transform_column(&self, col: usize, values: &Array1<f64>) -> Result<Array1<f64>> {
        let params = self.params()?;
        if col >= params.min.len() {
            return Err(Error::ShapeMismatch {
                expected: params.min.len(),
                found: col + 1,
            });
        }
        let (out_min, out_max) = self.feature_range;
        let out_range = out_max - out_min;
        let (min, range) = (params.min[col], params.range[col]);
        Ok(values.mapv(|v| (v - out_min) / out_range * range + min))
    }
}

impl Scaler for MinMaxScaler {
    fn fit(&mut self, data: &Array2<f64>) -> Result<()> {
        if data.nrows() == 0 {
            return Err(core_types::Error::InsufficientData {
                needed: 1,
                available: 0,
            }
            .into());
        }
        let (out_min, out_max) = self.feature_range;
        if !(out_max > out_min) {
            return Err(core_types::Error::invalid(format!(
                "feature range ({out_min}, {out_max}) is empty"
            ))
            .into());
        }

        let min = data.fold_axis(Axis(0), f64::INFINITY, |&a, &b| a.min(b));
        let max = data.fold_axis(Axis(0), f64::NEG_INFINITY, |&a, &b| a.max(b));
        // A constant column keeps a unit range so it maps to `out_min`.
        let range = (&max - &min).mapv(|v| if v.abs() < 1e-10 { 1.0 } else { v });

        tracing::debug!(columns = data.ncols(), rows = data.nrows(), "Fitted min-max scaler.");
        self.params = Some(MinMaxParams { min, range });
        Ok(())
    }

    fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>> {
        let params = self.check_width(data)?;
        let (out_min, out_max) = self.feature_range;
        let out_range = out_max - out_min;

        let mut result = data.clone();
        for mut row in result.rows_mut() {
            row -= &params.min;
            row /= &params.range;
            row.mapv_inplace(|v| v * out_range + out_min);
        }
        Ok(result)
    }

    fn inverse_transform(&self, data: &Array2<f64>) -> Result<Array2<f64>> {
        let params = self.check_width(data)?;
        let (out_min, out_max) = self.feature_range;
        let out_range = out_max - out_min;

        let mut result = data.clone();
        for mut row in result.rows_mut() {
            row.mapv_inplace(|v| (v - out_min) / out_range);
            row *= &params.range;
            row += &params.min;
        }
        Ok(result)
    }
}

// In crates/core-types/src/types.rs

use ndarray::{s, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A discrete trading decision derived from a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Signal {
    Sell,
    #[default]
    Hold,
    Buy,
}

impl Signal {
    /// The numeric encoding used in reports: +1, 0 or -1.
    pub fn value(self) -> i8 {
        match self {
            Signal::Buy => 1,
            Signal::Hold => 0,
            Signal::Sell => -1,
        }
    }

    /// Whether this signal opens or flips a position.
    pub fn is_entry(self) -> bool {
        !matches!(self, Signal::Hold)
    }
}

/// Market exposure held by the simulated strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Position {
    Short,
    #[default]
    Flat,
    Long,
}

impl Position {
    /// The exposure multiplier applied to price changes.
    pub fn direction(self) -> f64 {
        match self {
            Position::Long => 1.0,
            Position::Flat => 0.0,
            Position::Short => -1.0,
        }
    }

    pub fn is_open(self) -> bool {
        !matches!(self, Position::Flat)
    }

    /// The position a signal moves us into, or `None` for a hold.
    pub fn from_signal(signal: Signal) -> Option<Self> {
        match signal {
            Signal::Buy => Some(Position::Long),
            Signal::Sell => Some(Position::Short),
            Signal::Hold => None,
        }
    }
}

/// An ordered multi-feature series. Rows are time steps, column 0 is the price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    columns: Vec<String>,
    values: Array2<f64>,
}

impl TimeSeries {
    pub fn new(columns: Vec<String>, values: Array2<f64>) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::invalid("a time series needs at least one column"));
        }
        if columns.len() != values.ncols() {
            return Err(Error::invalid(format!(
                "{} column names for a matrix with {} columns",
                columns.len(),
                values.ncols()
            )));
        }
        Ok(Self { columns, values })
    }

    /// Builds a single-column series from raw prices.
    pub fn from_prices(name: impl Into<String>, prices: &[f64]) -> Self {
        let values = Array2::from_shape_fn((prices.len(), 1), |(i, _)| prices[i]);
        Self {
            columns: vec![name.into()],
            values,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Number of time steps.
    pub fn len(&self) -> usize {
        self.values.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn n_features(&self) -> usize {
        self.values.ncols()
    }

    /// The price column (column 0).
    pub fn prices(&self) -> ArrayView1<'_, f64> {
        self.values.column(0)
    }

    /// Returns a copy with the given values, keeping the column names.
    pub fn with_values(&self, values: Array2<f64>) -> Result<Self> {
        Self::new(self.columns.clone(), values)
    }

    /// Splits into owned `[0, at)` and `[at, len)` halves.
    pub fn split_at(&self, at: usize) -> (Self, Self) {
        let at = at.min(self.len());
        let head = self.values.slice(s![..at, ..]).to_owned();
        let tail = self.values.slice(s![at.., ..]).to_owned();
        (
            Self {
                columns: self.columns.clone(),
                values: head,
            },
            Self {
                columns: self.columns.clone(),
                values: tail,
            },
        )
    }
}

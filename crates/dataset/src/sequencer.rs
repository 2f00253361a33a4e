// In crates/dataset/src/sequencer.rs

use core_types::Error;
use ndarray::{s, Array1, Array2, Array3, ArrayView2, Axis};

/// Sliding windows and the price that follows each of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequences {
    /// Shape `[samples, window_size, features]`.
    pub windows: Array3<f64>,
    /// One label per window: column 0 of the row right after it.
    pub labels: Array1<f64>,
}

impl Sequences {
    pub fn empty(window_size: usize, n_features: usize) -> Self {
        Self {
            windows: Array3::zeros((0, window_size, n_features)),
            labels: Array1::zeros(0),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn window_size(&self) -> usize {
        self.windows.shape()[1]
    }

    pub fn n_features(&self) -> usize {
        self.windows.shape()[2]
    }

    /// The `i`-th window as a `[window_size, features]` view.
    pub fn window(&self, i: usize) -> ArrayView2<'_, f64> {
        self.windows.index_axis(Axis(0), i)
    }
}

/// Builds `(window, label)` pairs from an ordered 2-D series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequencer {
    window_size: usize,
    drop_last_window: bool,
}

impl Sequencer {
    /// Creates a sequencer with the legacy trailing trim: a series of length
    /// `L` yields `L - window_size - 1` pairs, so the last valid pair is dropped.
    pub fn new(window_size: usize) -> core_types::Result<Self> {
        if window_size == 0 {
            return Err(Error::invalid("window size must be positive"));
        }
        Ok(Self {
            window_size,
            drop_last_window: true,
        })
    }

    /// `false` keeps every valid pair (`L - window_size` of them).
    pub fn with_drop_last_window(mut self, drop_last_window: bool) -> Self {
        self.drop_last_window = drop_last_window;
        self
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// How many pairs a series of `len` rows produces.
    pub fn count(&self, len: usize) -> usize {
        let trim = usize::from(self.drop_last_window);
        len.saturating_sub(self.window_size + trim)
    }

    /// Window `i` covers rows `[i, i + W)`; label `i` is row `i + W`, column 0.
    pub fn create_sequences(&self, data: &Array2<f64>) -> Sequences {
        let n_features = data.ncols();
        let n_sequences = self.count(data.nrows());

        if n_sequences == 0 {
            tracing::debug!(
                rows = data.nrows(),
                window_size = self.window_size,
                "Series too short to produce any window."
            );
            return Sequences::empty(self.window_size, n_features);
        }

        let mut windows = Array3::zeros((n_sequences, self.window_size, n_features));
        let mut labels = Array1::zeros(n_sequences);

        for i in 0..n_sequences {
            windows
                .index_axis_mut(Axis(0), i)
                .assign(&data.slice(s![i..i + self.window_size, ..]));
            labels[i] = data[[i + self.window_size, 0]];
        }

        Sequences { windows, labels }
    }
}

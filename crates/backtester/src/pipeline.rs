// In crates/backtester/src/pipeline.rs

use crate::types::{BacktestResult, PipelineConfig};
use crate::{Backtester, Result};
use core_types::{Error as CoreError, Signal, TimeSeries};
use dataset::{train_test_split, MinMaxScaler, Scaler, Sequencer};
use forecast::{Predictor, TrainingSummary};
use ndarray::{s, Array2};
use serde::Serialize;
use strategies::{Strategy, ThresholdStrategy};
use tracing::{info, warn};

/// Everything produced by one end-to-end run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    pub training: TrainingSummary,
    /// Forecasts for the test labels, back in price units.
    pub predicted: Vec<f64>,
    /// Realized test labels, back in price units.
    pub actual: Vec<f64>,
    pub signals: Vec<Signal>,
    pub backtest: BacktestResult,
}

/// Fits the scaler on the training half only, then applies it to both halves.
fn scale_halves(
    scaler: &mut MinMaxScaler,
    train: &TimeSeries,
    test: &TimeSeries,
    all_features: bool,
) -> Result<(Array2<f64>, Array2<f64>)> {
    if all_features {
        scaler.fit(train.values())?;
        return Ok((scaler.transform(train.values())?, scaler.transform(test.values())?));
    }

    scaler.fit(&train.values().slice(s![.., 0..1]).to_owned())?;
    let scale_price = |values: &Array2<f64>| -> Result<Array2<f64>> {
        let mut scaled = values.clone();
        let price = scaler.transform(&values.slice(s![.., 0..1]).to_owned())?;
        scaled.slice_mut(s![.., 0..1]).assign(&price);
        Ok(scaled)
    };
    Ok((scale_price(train.values())?, scale_price(test.values())?))
}

/// Runs split → scale → sequence → train → predict → signals → backtest.
///
/// An empty test set produces an empty backtest rather than an error; a
/// training set too short to fit the scaler or the model is an error.
pub fn run_pipeline(
    config: &PipelineConfig,
    series: &TimeSeries,
    predictor: &mut dyn Predictor,
) -> Result<PipelineOutcome> {
    config.validate()?;
    let strategy = ThresholdStrategy::new(config.thresholds())?;
    let backtester = Backtester::new(config.initial_capital, config.win_rate_basis)?;
    let sequencer =
        Sequencer::new(config.window_size)?.with_drop_last_window(config.drop_last_window);

    // --- 1. Split & scale ---
    let (train, test) = train_test_split(series, config.train_fraction)?;
    if train.is_empty() {
        return Err(CoreError::InsufficientData {
            needed: 1,
            available: 0,
        }
        .into());
    }
    let mut scaler = MinMaxScaler::new();
    let (train_scaled, test_scaled) =
        scale_halves(&mut scaler, &train, &test, config.scale_all_features)?;

    // --- 2. Sequence ---
    let train_seq = sequencer.create_sequences(&train_scaled);
    let test_seq = sequencer.create_sequences(&test_scaled);
    info!(
        train_windows = train_seq.len(),
        test_windows = test_seq.len(),
        window_size = config.window_size,
        "Built training and testing sequences."
    );
    if train_seq.is_empty() {
        return Err(CoreError::InsufficientData {
            needed: config.window_size + 1 + usize::from(config.drop_last_window),
            available: train.len(),
        }
        .into());
    }

    // --- 3. Train & predict ---
    let training = predictor.fit(&train_seq, &config.training)?;
    if test_seq.is_empty() {
        warn!(
            test_rows = test.len(),
            "Test set too short to produce any window; backtest will be empty."
        );
    }
    let predicted_scaled = predictor.predict_batch(&test_seq.windows)?;

    let predicted = scaler.inverse_transform_column(0, &predicted_scaled)?.to_vec();
    let actual = scaler.inverse_transform_column(0, &test_seq.labels)?.to_vec();

    // --- 4. Signals & backtest ---
    let signals = strategy.generate(&predicted, &actual)?;
    let backtest = backtester.run(&signals, &actual)?;

    Ok(PipelineOutcome {
        training,
        predicted,
        actual,
        signals,
        backtest,
    })
}

/// Generates signals from externally produced forecasts and backtests them.
pub fn evaluate(
    config: &PipelineConfig,
    predicted: &[f64],
    actual: &[f64],
) -> Result<(Vec<Signal>, BacktestResult)> {
    let strategy = ThresholdStrategy::new(config.thresholds())?;
    let backtester = Backtester::new(config.initial_capital, config.win_rate_basis)?;

    let signals = strategy.generate(predicted, actual)?;
    let backtest = backtester.run(&signals, actual)?;
    Ok((signals, backtest))
}

// In crates/dataset/src/split.rs

use core_types::{Error, TimeSeries};

/// Splits a series into a contiguous training prefix and testing suffix.
///
/// The prefix holds the first `floor(len * train_fraction)` rows. Order is
/// never shuffled. A short series may leave either half empty; that is left
/// for the caller to judge.
pub fn train_test_split(
    series: &TimeSeries,
    train_fraction: f64,
) -> core_types::Result<(TimeSeries, TimeSeries)> {
    if !(train_fraction > 0.0 && train_fraction < 1.0) {
        return Err(Error::invalid(format!(
            "train fraction must lie strictly between 0 and 1, got {train_fraction}"
        )));
    }

    let split_index = (series.len() as f64 * train_fraction).floor() as usize;
    let (train, test) = series.split_at(split_index);

    tracing::debug!(
        rows = series.len(),
        train_rows = train.len(),
        test_rows = test.len(),
        "Split series into train and test halves."
    );

    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_eighty_twenty() {
        let prices: Vec<f64> = (0..10).map(f64::from).collect();
        let series = TimeSeries::from_prices("close", &prices);

        let (train, test) = train_test_split(&series, 0.8).unwrap();

        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);
        assert_eq!(test.prices()[0], 8.0);
    }

    #[test]
    fn test_split_floors_the_index() {
        let series = TimeSeries::from_prices("close", &[1.0, 2.0, 3.0]);
        let (train, test) = train_test_split(&series, 0.5).unwrap();
        assert_eq!(train.len(), 1);
        assert_eq!(test.len(), 2);
    }

    #[test]
    fn test_short_series_gives_empty_prefix() {
        let series = TimeSeries::from_prices("close", &[1.0, 2.0]);
        let (train, test) = train_test_split(&series, 0.25).unwrap();
        assert!(train.is_empty());
        assert_eq!(test.len(), 2);
    }

    #[test]
    fn test_rejects_fraction_outside_unit_interval() {
        let series = TimeSeries::from_prices("close", &[1.0, 2.0]);
        for fraction in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            assert!(matches!(
                train_test_split(&series, fraction),
                Err(Error::InvalidArgument(_))
            ));
        }
    }
}

use analytics::{cumulative_returns, drawdowns, WinRateBasis};
use backtester::Backtester;
use core_types::{Position, Signal};
use proptest::prelude::*;

fn signal_strategy() -> impl Strategy<Value = Signal> {
    prop_oneof![Just(Signal::Buy), Just(Signal::Sell), Just(Signal::Hold)]
}

/// Prices plus a signal for every step transition.
fn run_inputs() -> impl Strategy<Value = (Vec<f64>, Vec<Signal>)> {
    prop::collection::vec(1.0f64..500.0, 1..60).prop_flat_map(|prices| {
        let n = prices.len() - 1;
        (Just(prices), prop::collection::vec(signal_strategy(), n))
    })
}

/// A straightforward loop that mutates its variables in place.
fn procedural_returns(signals: &[Signal], prices: &[f64], initial_capital: f64) -> (Vec<f64>, f64) {
    let mut returns = vec![0.0; prices.len()];
    let mut position = 0.0;
    let mut capital = initial_capital;
    for t in 1..prices.len() {
        if signals[t - 1] != Signal::Hold {
            position = f64::from(signals[t - 1].value());
        }
        returns[t] = (prices[t] - prices[t - 1]) * position;
        capital += returns[t];
    }
    (returns, capital)
}

proptest! {
    #[test]
    fn fold_matches_procedural_loop((prices, signals) in run_inputs()) {
        let result = Backtester::new(1000.0, WinRateBasis::Legacy)
            .unwrap()
            .run(&signals, &prices)
            .unwrap();
        let (returns, capital) = procedural_returns(&signals, &prices, 1000.0);

        prop_assert_eq!(result.returns(), returns.clone());
        prop_assert!((result.report.final_capital - capital).abs() < 1e-6);

        let cumulative = cumulative_returns(&returns);
        prop_assert_eq!(result.drawdowns(), drawdowns(&cumulative));
        let max_dd = drawdowns(&cumulative).into_iter().fold(0.0, f64::max);
        prop_assert_eq!(result.report.max_drawdown, max_dd);
    }

    #[test]
    fn position_only_changes_on_entries((prices, signals) in run_inputs()) {
        let result = Backtester::new(1000.0, WinRateBasis::Legacy)
            .unwrap()
            .run(&signals, &prices)
            .unwrap();

        let mut held = Position::Flat;
        for (t, record) in result.records.iter().enumerate().skip(1) {
            if let Some(next) = Position::from_signal(signals[t - 1]) {
                held = next;
            }
            prop_assert_eq!(record.position, held.direction() as i8);
        }
        prop_assert_eq!(result.entries.len(), signals.iter().filter(|s| s.is_entry()).count());
    }

    #[test]
    fn backtest_is_deterministic((prices, signals) in run_inputs()) {
        let backtester = Backtester::new(250.0, WinRateBasis::PerStep).unwrap();
        let first = backtester.run(&signals, &prices).unwrap();
        let second = backtester.run(&signals, &prices).unwrap();
        prop_assert_eq!(first, second);
    }
}

use std::fs;

use analytics::WinRateBasis;
use backtester::{write_result, BacktestResult, Backtester, OutputFormat};
use core_types::Signal;
use tempfile::tempdir;

fn sample_result() -> BacktestResult {
    Backtester::new(1000.0, WinRateBasis::Legacy)
        .unwrap()
        .run(
            &[Signal::Buy, Signal::Hold, Signal::Sell],
            &[100.0, 101.0, 100.0, 98.0],
        )
        .unwrap()
}

#[test]
fn json_report_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.json");
    let result = sample_result();

    write_result(&result, OutputFormat::Json, Some(&path)).unwrap();

    let loaded: BacktestResult = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded.records, result.records);
    assert_eq!(loaded.entries, result.entries);
    assert_eq!(loaded.report.total_trades, 2);
    assert_eq!(loaded.report.win_rate, Some(1.0));
}

#[test]
fn undefined_win_rate_is_null_in_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.json");
    let result = Backtester::new(1000.0, WinRateBasis::Legacy)
        .unwrap()
        .run(&[Signal::Hold], &[1.0, 2.0])
        .unwrap();

    write_result(&result, OutputFormat::Json, Some(&path)).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(value["report"]["win_rate"].is_null());
    assert_eq!(value["report"]["win_rate_basis"], "legacy");
}

#[test]
fn csv_report_has_one_row_per_step() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.csv");
    let result = sample_result();

    write_result(&result, OutputFormat::Csv, Some(&path)).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 4);

    // Step 3: short from 100 to 98 earns 2.
    let last = &rows[3];
    assert_eq!(&last[2], "-1");
    assert_eq!(&last[3], "-1");
    assert_eq!(&last[4], "2.0");
    assert_eq!(&last[5], "2.0");
}

#[test]
fn table_report_is_written_to_the_given_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.txt");
    let result = Backtester::new(1000.0, WinRateBasis::Legacy)
        .unwrap()
        .run(&[Signal::Hold], &[1.0, 2.0])
        .unwrap();

    write_result(&result, OutputFormat::Table, Some(&path)).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("--- Backtest Performance Report ---"));
    assert!(text.contains("Win Rate (Legacy):  undefined"));
}

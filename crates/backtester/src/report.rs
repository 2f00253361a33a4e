// In crates/backtester/src/report.rs

use crate::types::{BacktestResult, OutputFormat};
use crate::Result;
use analytics::PerformanceReport;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes one CSV row per step.
pub fn write_csv<W: Write>(result: &BacktestResult, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for record in &result.records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the report, the step table and the entries as pretty JSON.
pub fn write_json<W: Write, T: serde::Serialize>(value: &T, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}

/// Saves a result to `path` in the given format, or writes it to stdout.
pub fn write_result(result: &BacktestResult, format: OutputFormat, path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        match format {
            OutputFormat::Table => print_report(&result.report),
            OutputFormat::Csv => write_csv(result, std::io::stdout().lock())?,
            OutputFormat::Json => write_json(result, std::io::stdout().lock())?,
        }
        return Ok(());
    };

    let mut file = BufWriter::new(File::create(path)?);
    match format {
        OutputFormat::Table => {
            render_report(&result.report, &mut file)?;
            file.flush()?;
        }
        OutputFormat::Csv => write_csv(result, file)?,
        OutputFormat::Json => write_json(result, file)?,
    }
    tracing::info!(path = %path.display(), ?format, "Backtest report written.");
    Ok(())
}

fn fmt_rate(rate: Option<f64>) -> String {
    rate.map_or_else(|| "undefined".to_string(), |r| format!("{:.2}%", r * 100.0))
}

/// Renders the performance report as a readable table.
pub fn render_report<W: Write>(report: &PerformanceReport, mut out: W) -> std::io::Result<()> {
    writeln!(out, "\n--- Backtest Performance Report ---")?;
    writeln!(out, "-----------------------------------")?;
    writeln!(out, "Initial Capital:       ${:.2}", report.initial_capital)?;
    writeln!(out, "Final Capital:         ${:.2}", report.final_capital)?;
    writeln!(out, "Net P&L:               ${:.2} ({:.2}%)", report.net_pnl, report.net_pnl_percentage)?;
    writeln!(out, "Max Drawdown:          ${:.2}", report.max_drawdown)?;
    writeln!(out, "Sharpe Ratio (step):   {:.3}", report.sharpe_ratio)?;
    match report.profit_factor {
        Some(pf) => writeln!(out, "Profit Factor:         {pf:.2}")?,
        None => writeln!(out, "Profit Factor:         n/a (no losing steps)")?,
    }
    writeln!(out, "-----------------------------------")?;
    writeln!(out, "Steps:                 {}", report.total_steps)?;
    writeln!(out, "Steps In Market:       {}", report.steps_in_market)?;
    writeln!(out, "Total Trades:          {}", report.total_trades)?;
    writeln!(out, "Win Rate ({:?}):  {}", report.win_rate_basis, fmt_rate(report.win_rate))?;
    writeln!(out, "  - legacy:            {}", fmt_rate(report.win_rate_legacy))?;
    writeln!(out, "  - per step:          {}", fmt_rate(report.win_rate_per_step))?;
    writeln!(out, "  - per trade:         {}", fmt_rate(report.win_rate_per_trade))?;
    writeln!(out, "-----------------------------------")?;
    Ok(())
}

/// Helper function to print the performance report in a readable format.
pub fn print_report(report: &PerformanceReport) {
    if let Err(e) = render_report(report, std::io::stdout().lock()) {
        tracing::error!(error = %e, "Failed to print the backtest report.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Backtester;
    use analytics::WinRateBasis;
    use core_types::Signal;

    #[test]
    fn test_csv_columns() {
        let result = Backtester::new(1000.0, WinRateBasis::Legacy)
            .unwrap()
            .run(&[Signal::Hold], &[1.0, 2.0])
            .unwrap();

        let mut buf = Vec::new();
        write_csv(&result, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "step,price,signal,position,returns,cumulative_returns,drawdowns,capital,win_rate,max_drawdown"
        );
        // Undefined win rate is an empty cell.
        assert_eq!(lines.next().unwrap(), "0,1.0,0,0,0.0,0.0,0.0,1000.0,,0.0");
    }

    #[test]
    fn test_rendered_table_lists_every_rate() {
        let result = Backtester::new(1000.0, WinRateBasis::PerStep)
            .unwrap()
            .run(&[Signal::Buy, Signal::Hold], &[100.0, 101.0, 100.0])
            .unwrap();

        let mut buf = Vec::new();
        render_report(&result.report, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Final Capital:         $1000.00"));
        assert!(text.contains("Win Rate (PerStep):  50.00%"));
        assert!(text.contains("  - legacy:            100.00%"));
    }

    #[test]
    fn test_rate_formatting() {
        assert_eq!(fmt_rate(None), "undefined");
        assert_eq!(fmt_rate(Some(0.5)), "50.00%");
    }
}

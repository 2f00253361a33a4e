// In crates/analytics/src/lib.rs

pub mod engine;
pub mod types;

pub use engine::{cumulative_returns, drawdowns, AnalyticsEngine};
pub use types::{PerformanceReport, ReturnCurves, WinRateBasis};

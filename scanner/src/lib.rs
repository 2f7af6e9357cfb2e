//! Per-instrument trend scanning.
//!
//! For each symbol of a run the scanner:
//!   1. Fetches the trend window from the [`PriceHistoryStore`](history::PriceHistoryStore).
//!   2. Classifies it (up first, then down).
//!   3. Only for trending symbols, fetches daily closes and estimates volatility.
//!   4. Collects [`TrendResult`](market::TrendResult)s for the notification side.

pub mod engine;
pub mod types;

pub use engine::TrendScanner;
pub use types::{InstrumentOutcome, ScanReport, ScannerConfig, SkippedInstrument};

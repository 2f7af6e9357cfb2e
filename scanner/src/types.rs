//! Shared types used by the scanner.

use serde::Serialize;

use market::rounding::MAX_DECIMAL_PLACES;
use market::types::{Grouping, MAX_VOLATILITY_SAMPLES, MIN_TREND_DEPTH, TrendResult};

/// Configuration knobs for one scan.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Aggregation the trend window is read with.
    pub grouping: Grouping,

    /// Samples fetched per trend window. Only the newest three drive the
    /// classification; must be at least three.
    pub trend_depth: usize,

    /// Daily closes used for volatility, at most one year.
    pub volatility_lookback: usize,

    /// Truncation applied to volatility figures; `0` disables it.
    pub decimal_places: i32,

    /// Maximum number of instruments analysed at once.
    pub concurrency: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            grouping: Grouping::Day,
            trend_depth: MIN_TREND_DEPTH,
            volatility_lookback: MAX_VOLATILITY_SAMPLES,
            decimal_places: 2,
            concurrency: 8,
        }
    }
}

impl ScannerConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.trend_depth >= MIN_TREND_DEPTH,
            "trend depth must be at least {MIN_TREND_DEPTH}, got {}",
            self.trend_depth
        );
        anyhow::ensure!(
            (1..=MAX_VOLATILITY_SAMPLES).contains(&self.volatility_lookback),
            "volatility lookback must be within 1..={MAX_VOLATILITY_SAMPLES}, got {}",
            self.volatility_lookback
        );
        anyhow::ensure!(
            (0..=MAX_DECIMAL_PLACES as i32).contains(&self.decimal_places),
            "decimal places must be within 0..={MAX_DECIMAL_PLACES}, got {}",
            self.decimal_places
        );
        anyhow::ensure!(self.concurrency > 0, "concurrency must be positive");
        Ok(())
    }
}

/// What happened to a single instrument during a scan.
#[derive(Debug, Clone, PartialEq)]
pub enum InstrumentOutcome {
    Trending(TrendResult),
    NoTrend,
    /// Not enough history to judge; not the same as "no trend".
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedInstrument {
    pub symbol: String,
    pub reason: String,
}

/// Aggregate of one scan, handed to the notification side.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanReport {
    pub scanned: usize,
    pub trending: Vec<TrendResult>,
    pub skipped: Vec<SkippedInstrument>,
}

impl ScanReport {
    pub(crate) fn record(&mut self, symbol: &str, outcome: InstrumentOutcome) {
        self.scanned += 1;
        match outcome {
            InstrumentOutcome::Trending(result) => self.trending.push(result),
            InstrumentOutcome::NoTrend => {}
            InstrumentOutcome::Skipped { reason } => self.skipped.push(SkippedInstrument {
                symbol: symbol.to_string(),
                reason,
            }),
        }
    }
}

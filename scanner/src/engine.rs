//! The trend scanner.
//!
//! Classification is cheap and runs for every symbol; the one-year close
//! history is only loaded for symbols that trend.

use std::sync::Arc;

use anyhow::Context;
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{Instrument, debug, info, warn};

use common::{TraceId, run_span, symbol_span};
use history::PriceHistoryStore;
use market::error::AnalysisError;
use market::pulse::trend::detect_trend;
use market::pulse::volatility::estimate_volatility;
use market::types::{TrendResult, TrendWindow};

use super::types::{InstrumentOutcome, ScanReport, ScannerConfig};

pub struct TrendScanner<S: PriceHistoryStore + ?Sized> {
    cfg: ScannerConfig,
    store: Arc<S>,
}

impl<S: PriceHistoryStore + ?Sized> TrendScanner<S> {
    pub fn new(cfg: ScannerConfig, store: Arc<S>) -> anyhow::Result<Self> {
        cfg.validate().context("invalid scanner configuration")?;
        Ok(Self { cfg, store })
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.cfg
    }

    /// Scans `symbols` and aggregates the outcomes.
    ///
    /// Up to `concurrency` symbols are in flight at once; the report keeps
    /// input order. A storage failure aborts the whole run.
    pub async fn scan(&self, symbols: &[String]) -> anyhow::Result<ScanReport> {
        let trace_id = TraceId::new();
        let span = run_span(self.cfg.grouping.as_str(), &trace_id);

        async move {
            info!(
                instruments = symbols.len(),
                trend_depth = self.cfg.trend_depth,
                "checking for trends"
            );

            let outcomes: Vec<(&String, InstrumentOutcome)> = stream::iter(symbols)
                .map(|symbol| async move {
                    self.analyse(symbol)
                        .await
                        .map(|outcome| (symbol, outcome))
                })
                .buffered(self.cfg.concurrency)
                .try_collect()
                .await?;

            let mut report = ScanReport::default();
            for (symbol, outcome) in outcomes {
                report.record(symbol, outcome);
            }

            info!(
                scanned = report.scanned,
                trending = report.trending.len(),
                skipped = report.skipped.len(),
                "trend scan finished"
            );

            Ok::<_, anyhow::Error>(report)
        }
        .instrument(span)
        .await
    }

    /// Runs the trend screen and, on a hit, the volatility estimate for one
    /// symbol.
    pub async fn analyse(&self, symbol: &str) -> anyhow::Result<InstrumentOutcome> {
        self.analyse_inner(symbol)
            .instrument(symbol_span(symbol))
            .await
    }

    async fn analyse_inner(&self, symbol: &str) -> anyhow::Result<InstrumentOutcome> {
        let points = self
            .store
            .trend_window(symbol, self.cfg.grouping, self.cfg.trend_depth)
            .await
            .with_context(|| format!("failed to load trend window for {symbol}"))?;

        let window = match TrendWindow::new(points) {
            Ok(window) => window,
            Err(e) => return Ok(skip(e)),
        };

        let head = &window.points()[..3];
        debug!(
            closes = ?[head[0].close, head[1].close, head[2].close],
            volumes = ?[head[0].volume, head[1].volume, head[2].volume],
            "checking trend"
        );

        let Some(direction) = detect_trend(&window) else {
            return Ok(InstrumentOutcome::NoTrend);
        };

        info!(%direction, "trend detected");

        let closes = self
            .store
            .daily_closes(symbol, self.cfg.volatility_lookback)
            .await
            .with_context(|| format!("failed to load daily closes for {symbol}"))?;

        let volatility = match estimate_volatility(&closes, self.cfg.decimal_places) {
            Ok(v) => v,
            Err(e) => return Ok(skip(e)),
        };

        debug!(
            samples = closes.len(),
            volatility = volatility.volatility,
            volatility_percent = volatility.volatility_percent,
            "volatility estimated"
        );

        Ok(InstrumentOutcome::Trending(TrendResult::new(
            symbol, direction, volatility,
        )))
    }
}

fn skip(err: AnalysisError) -> InstrumentOutcome {
    match &err {
        AnalysisError::InsufficientData { .. } => debug!(error = %err, "skipping instrument"),
        AnalysisError::InvalidInput(_) => warn!(error = %err, "skipping instrument"),
    }
    InstrumentOutcome::Skipped {
        reason: err.to_string(),
    }
}

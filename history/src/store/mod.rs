pub mod sqlite_store;

use market::types::{Grouping, PricePoint};

/// Source of per-instrument price history.
///
/// Implementations own ordering, limiting and day-grouping; callers pass the
/// returned rows to the pulses untouched.
#[async_trait::async_trait]
pub trait PriceHistoryStore: Send + Sync {
    /// Up to `depth` samples aggregated by `grouping`, newest first.
    async fn trend_window(
        &self,
        symbol: &str,
        grouping: Grouping,
        depth: usize,
    ) -> anyhow::Result<Vec<PricePoint>>;

    /// At most one close per calendar day for the most recent `limit` days,
    /// oldest first so the final element is the latest close.
    async fn daily_closes(&self, symbol: &str, limit: usize) -> anyhow::Result<Vec<f64>>;
}

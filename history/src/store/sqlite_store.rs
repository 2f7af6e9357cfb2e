//! SQLitePriceHistoryStore
//! -----------------------
//! SQLite-backed implementation of [`PriceHistoryStore`]. Snapshots live in
//! the `st_data` table, one row per instrument per sampling tick:
//!
//!  - `day` is the calendar day (`YYYY-MM-DD`), `hour`/`minute` the tick
//!  - `id` grows with insertion order and doubles as the recency index
//!  - the daily close is the snapshot taken at `close_hour:snapshot_minute`
//!
//! This store only reads price rows. Ingestion belongs to the quote feed.
use std::str::FromStr;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use super::PriceHistoryStore;
use market::types::{Grouping, PricePoint};

/// Hour of the snapshot treated as the daily close.
pub const DEFAULT_CLOSE_HOUR: u32 = 17;

/// Minute within each hour at which snapshots are sampled.
pub const DEFAULT_SNAPSHOT_MINUTE: u32 = 15;

pub struct SQLitePriceHistoryStore {
    pool: SqlitePool,
    close_hour: u32,
    snapshot_minute: u32,
}

impl SQLitePriceHistoryStore {
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            close_hour: DEFAULT_CLOSE_HOUR,
            snapshot_minute: DEFAULT_SNAPSHOT_MINUTE,
        }
    }

    /// Connect to `url` (created if missing) and ensure the schema exists.
    pub async fn new(url: &str) -> anyhow::Result<Self> {
        let opts = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid sqlite url `{url}`"))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(opts)
            .await
            .with_context(|| format!("could not connect to `{url}`"))?;

        let store = Self::from_pool(pool);
        store.migrate().await?;

        Ok(store)
    }

    /// Override which snapshot counts as the daily close.
    pub fn with_snapshot(mut self, close_hour: u32, snapshot_minute: u32) -> Self {
        self.close_hour = close_hour;
        self.snapshot_minute = snapshot_minute;
        self
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS st_data (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                symbol TEXT NOT NULL,
                day TEXT NOT NULL,
                hour INTEGER NOT NULL,
                minute INTEGER NOT NULL,
                close REAL NOT NULL,
                volume REAL NOT NULL
            );
        "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(r#"CREATE INDEX IF NOT EXISTS idx_st_data_symbol_day ON st_data(symbol, day);"#)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Distinct symbols with at least one stored snapshot, sorted.
    pub async fn symbols(&self) -> anyhow::Result<Vec<String>> {
        let rows = sqlx::query("SELECT DISTINCT symbol FROM st_data ORDER BY symbol")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|r| r.try_get::<String, _>("symbol").map_err(Into::into))
            .collect()
    }
}

#[async_trait]
impl PriceHistoryStore for SQLitePriceHistoryStore {
    async fn trend_window(
        &self,
        symbol: &str,
        grouping: Grouping,
        depth: usize,
    ) -> anyhow::Result<Vec<PricePoint>> {
        let limit = usize_to_i64(depth)?;

        let rows = match grouping {
            Grouping::Day => {
                sqlx::query(
                    r#"
SELECT id, close, volume
FROM st_data
WHERE symbol = ? AND hour = ? AND minute = ?
ORDER BY id DESC
LIMIT ?;
"#,
                )
                .bind(symbol)
                .bind(self.close_hour as i64)
                .bind(self.snapshot_minute as i64)
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            Grouping::Hour => {
                sqlx::query(
                    r#"
SELECT id, close, volume
FROM st_data
WHERE symbol = ? AND minute = ?
ORDER BY id DESC
LIMIT ?;
"#,
                )
                .bind(symbol)
                .bind(self.snapshot_minute as i64)
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .with_context(|| format!("trend window query failed for {symbol}"))?;

        let points = rows
            .iter()
            .map(row_to_point)
            .collect::<anyhow::Result<Vec<_>>>()?;

        tracing::trace!(symbol, %grouping, rows = points.len(), "loaded trend window");

        Ok(points)
    }

    async fn daily_closes(&self, symbol: &str, limit: usize) -> anyhow::Result<Vec<f64>> {
        let limit = usize_to_i64(limit)?;

        // Last snapshot of each day, most recent `limit` days, oldest first.
        let rows = sqlx::query(
            r#"
SELECT s.close AS close
FROM st_data s
JOIN (
    SELECT day, MAX(id) AS last_id
    FROM st_data
    WHERE symbol = ?
    GROUP BY day
    ORDER BY day DESC
    LIMIT ?
) d ON s.id = d.last_id
ORDER BY d.day ASC;
"#,
        )
        .bind(symbol)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("daily close query failed for {symbol}"))?;

        rows.iter()
            .map(|r| {
                r.try_get::<f64, _>("close")
                    .context("malformed close column")
            })
            .collect()
    }
}

/* =========================
Row mapping + conversions
========================= */

fn row_to_point(r: &SqliteRow) -> anyhow::Result<PricePoint> {
    Ok(PricePoint {
        sequence_index: r.try_get::<i64, _>("id").context("malformed id column")?,
        close: r.try_get::<f64, _>("close").context("malformed close column")?,
        volume: r.try_get::<f64, _>("volume").context("malformed volume column")?,
    })
}

fn usize_to_i64(v: usize) -> anyhow::Result<i64> {
    i64::try_from(v).with_context(|| format!("limit too large for sqlite: {v}"))
}

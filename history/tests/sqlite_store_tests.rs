use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

use history::store::PriceHistoryStore;
use history::store::sqlite_store::SQLitePriceHistoryStore;
use market::types::Grouping;

/// Single-connection in-memory database; every connection to
/// `sqlite::memory:` would otherwise see its own empty database.
async fn setup_store() -> anyhow::Result<(SQLitePriceHistoryStore, SqlitePool)> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    let store = SQLitePriceHistoryStore::from_pool(pool.clone());
    store.migrate().await?;

    Ok((store, pool))
}

async fn insert(
    pool: &SqlitePool,
    symbol: &str,
    day: &str,
    hour: i64,
    minute: i64,
    close: f64,
    volume: f64,
) -> anyhow::Result<()> {
    sqlx::query(
        "INSERT INTO st_data (symbol, day, hour, minute, close, volume) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(symbol)
    .bind(day)
    .bind(hour)
    .bind(minute)
    .bind(close)
    .bind(volume)
    .execute(pool)
    .await?;
    Ok(())
}

#[tokio::test]
async fn daily_trend_window_reads_close_snapshots_newest_first() -> anyhow::Result<()> {
    let (store, pool) = setup_store().await?;

    insert(&pool, "GOOG", "2026-10-12", 17, 15, 100.0, 310.0).await?;
    insert(&pool, "GOOG", "2026-10-13", 10, 15, 90.0, 1.0).await?; // intraday, ignored
    insert(&pool, "GOOG", "2026-10-13", 17, 15, 102.0, 280.0).await?;
    insert(&pool, "GOOG", "2026-10-14", 17, 15, 105.0, 300.0).await?;
    insert(&pool, "AAPL", "2026-10-14", 17, 15, 1.0, 1.0).await?; // other symbol

    let points = store.trend_window("GOOG", Grouping::Day, 3).await?;

    let closes: Vec<f64> = points.iter().map(|p| p.close).collect();
    let volumes: Vec<f64> = points.iter().map(|p| p.volume).collect();
    assert_eq!(closes, vec![105.0, 102.0, 100.0]);
    assert_eq!(volumes, vec![300.0, 280.0, 310.0]);
    assert!(points[0].sequence_index > points[1].sequence_index);
    assert!(points[1].sequence_index > points[2].sequence_index);

    Ok(())
}

#[tokio::test]
async fn trend_window_is_limited_to_depth() -> anyhow::Result<()> {
    let (store, pool) = setup_store().await?;

    for (i, day) in ["2026-10-10", "2026-10-11", "2026-10-12", "2026-10-13"]
        .iter()
        .enumerate()
    {
        insert(&pool, "MSFT", day, 17, 15, 10.0 + i as f64, 100.0).await?;
    }

    let points = store.trend_window("MSFT", Grouping::Day, 2).await?;
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].close, 13.0);

    Ok(())
}

#[tokio::test]
async fn hourly_trend_window_includes_intraday_snapshots() -> anyhow::Result<()> {
    let (store, pool) = setup_store().await?;

    insert(&pool, "TSLA", "2026-10-14", 15, 15, 200.0, 10.0).await?;
    insert(&pool, "TSLA", "2026-10-14", 15, 45, 999.0, 10.0).await?; // off-minute
    insert(&pool, "TSLA", "2026-10-14", 16, 15, 201.0, 11.0).await?;
    insert(&pool, "TSLA", "2026-10-14", 17, 15, 202.0, 12.0).await?;

    let hourly = store.trend_window("TSLA", Grouping::Hour, 5).await?;
    let closes: Vec<f64> = hourly.iter().map(|p| p.close).collect();
    assert_eq!(closes, vec![202.0, 201.0, 200.0]);

    let daily = store.trend_window("TSLA", Grouping::Day, 5).await?;
    assert_eq!(daily.len(), 1);

    Ok(())
}

#[tokio::test]
async fn custom_snapshot_changes_daily_close() -> anyhow::Result<()> {
    let (store, pool) = setup_store().await?;
    let store = store.with_snapshot(16, 0);

    insert(&pool, "IBM", "2026-10-14", 16, 0, 50.0, 1.0).await?;
    insert(&pool, "IBM", "2026-10-14", 17, 15, 51.0, 1.0).await?;

    let points = store.trend_window("IBM", Grouping::Day, 3).await?;
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].close, 50.0);

    Ok(())
}

#[tokio::test]
async fn daily_closes_keep_last_snapshot_per_day_oldest_first() -> anyhow::Result<()> {
    let (store, pool) = setup_store().await?;

    insert(&pool, "GOOG", "2026-10-12", 10, 15, 9.0, 1.0).await?;
    insert(&pool, "GOOG", "2026-10-12", 17, 15, 10.0, 1.0).await?;
    insert(&pool, "GOOG", "2026-10-13", 17, 15, 9.0, 1.0).await?;
    insert(&pool, "GOOG", "2026-10-14", 11, 15, 9.1, 1.0).await?;
    insert(&pool, "GOOG", "2026-10-14", 17, 15, 9.5, 1.0).await?;

    let closes = store.daily_closes("GOOG", 365).await?;
    assert_eq!(closes, vec![10.0, 9.0, 9.5]);

    Ok(())
}

#[tokio::test]
async fn daily_closes_take_the_most_recent_days() -> anyhow::Result<()> {
    let (store, pool) = setup_store().await?;

    insert(&pool, "GOOG", "2026-10-10", 17, 15, 1.0, 1.0).await?;
    insert(&pool, "GOOG", "2026-10-11", 17, 15, 2.0, 1.0).await?;
    insert(&pool, "GOOG", "2026-10-12", 17, 15, 3.0, 1.0).await?;

    let closes = store.daily_closes("GOOG", 2).await?;
    assert_eq!(closes, vec![2.0, 3.0]);

    Ok(())
}

#[tokio::test]
async fn unknown_symbol_yields_empty_history() -> anyhow::Result<()> {
    let (store, _pool) = setup_store().await?;

    assert!(store.trend_window("NOPE", Grouping::Day, 3).await?.is_empty());
    assert!(store.daily_closes("NOPE", 365).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn symbols_are_distinct_and_sorted() -> anyhow::Result<()> {
    let (store, pool) = setup_store().await?;

    insert(&pool, "MSFT", "2026-10-14", 17, 15, 1.0, 1.0).await?;
    insert(&pool, "AAPL", "2026-10-14", 17, 15, 1.0, 1.0).await?;
    insert(&pool, "MSFT", "2026-10-15", 17, 15, 1.0, 1.0).await?;

    assert_eq!(store.symbols().await?, vec!["AAPL".to_string(), "MSFT".to_string()]);

    Ok(())
}

#[tokio::test]
async fn new_creates_database_file_and_schema() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("trendwatch-{}.db", Uuid::new_v4()));
    let url = format!("sqlite://{}", path.display());

    let store = SQLitePriceHistoryStore::new(&url).await?;
    assert!(store.symbols().await?.is_empty());
    assert!(path.exists());

    drop(store);
    let _ = std::fs::remove_file(&path);

    Ok(())
}

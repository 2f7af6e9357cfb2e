pub mod cli;
pub mod config;

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use cli::Cli;
use common::init_logger;
use config::AppConfig;
use history::SQLitePriceHistoryStore;
use scanner::TrendScanner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let cfg = args.apply(AppConfig::from_env()?);

    init_logger("trendwatch", cfg.json_logs);

    info!(
        database_url = %cfg.database_url,
        grouping = %cfg.scanner.grouping,
        "starting trendwatch"
    );

    let store = Arc::new(SQLitePriceHistoryStore::new(&cfg.database_url).await?);

    let symbols = if args.symbols.is_empty() {
        store.symbols().await?
    } else {
        args.symbols.clone()
    };

    if symbols.is_empty() {
        warn!("no symbols to scan");
    }

    let scanner = TrendScanner::new(cfg.scanner, store)?;
    let report = scanner.scan(&symbols).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

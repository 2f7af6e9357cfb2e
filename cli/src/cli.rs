use clap::{Parser, ValueEnum};

use crate::config::AppConfig;
use market::types::Grouping;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GroupingCli {
    Day,
    Hour,
}

/// Flags instruments trending over their most recent snapshots and
/// annotates them with volatility.
///
/// Every flag overrides the matching environment variable.
#[derive(Debug, Parser)]
#[clap(name = "trendwatch", version)]
pub struct Cli {
    /// SQLite database holding the price snapshots
    #[clap(long)]
    pub database_url: Option<String>,

    /// Symbols to scan (comma-separated); all stored symbols when omitted
    #[clap(long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Snapshot aggregation used for the trend window
    #[clap(long, value_enum)]
    pub grouping: Option<GroupingCli>,

    /// Samples fetched per trend window (at least 3)
    #[clap(long)]
    pub trend_depth: Option<usize>,

    /// Daily closes used for volatility (1 to 365)
    #[clap(long)]
    pub lookback_days: Option<usize>,

    /// Decimal places volatility figures are truncated to; 0 disables truncation
    #[clap(long)]
    pub decimal_places: Option<i32>,

    /// Instruments analysed concurrently
    #[clap(long)]
    pub concurrency: Option<usize>,

    /// Emit JSON log lines
    #[clap(long)]
    pub json_logs: bool,
}

/// Convert CLI grouping selection → internal Grouping enum
pub(crate) fn cli_to_grouping(g: GroupingCli) -> Grouping {
    match g {
        GroupingCli::Day => Grouping::Day,
        GroupingCli::Hour => Grouping::Hour,
    }
}

impl Cli {
    /// Layers explicit flags over `cfg`.
    pub fn apply(&self, mut cfg: AppConfig) -> AppConfig {
        if let Some(url) = &self.database_url {
            cfg.database_url = url.clone();
        }
        if let Some(g) = self.grouping {
            cfg.scanner.grouping = cli_to_grouping(g);
        }
        if let Some(depth) = self.trend_depth {
            cfg.scanner.trend_depth = depth;
        }
        if let Some(days) = self.lookback_days {
            cfg.scanner.volatility_lookback = days;
        }
        if let Some(places) = self.decimal_places {
            cfg.scanner.decimal_places = places;
        }
        if let Some(n) = self.concurrency {
            cfg.scanner.concurrency = n;
        }
        cfg.json_logs |= self.json_logs;
        cfg
    }
}

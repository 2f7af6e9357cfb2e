use std::fmt::Display;
use std::str::FromStr;

use anyhow::anyhow;

use market::types::Grouping;
use scanner::ScannerConfig;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://trendwatch.db";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// SQLite database holding the `st_data` snapshots.
    pub database_url: String,

    /// Emit JSON log lines instead of human-readable ones.
    ///
    /// Defaults to on when `APP_ENV=production`.
    pub json_logs: bool,

    // =========================
    // Scan configuration
    // =========================
    /// Trend grouping, depth, volatility lookback, truncation and
    /// concurrency for the run.
    pub scanner: ScannerConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Unset keys fall back
    /// to defaults; malformed values are errors naming the key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = ScannerConfig::default();

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let json_logs = lookup("APP_ENV").is_some_and(|v| v == "production");

        let scanner = ScannerConfig {
            grouping: parse_var(&lookup, "TREND_GROUPING", defaults.grouping)?,
            trend_depth: parse_var(&lookup, "TREND_DEPTH", defaults.trend_depth)?,
            volatility_lookback: parse_var(
                &lookup,
                "VOLATILITY_LOOKBACK_DAYS",
                defaults.volatility_lookback,
            )?,
            decimal_places: parse_var(
                &lookup,
                "VOLATILITY_DECIMAL_PLACES",
                defaults.decimal_places,
            )?,
            concurrency: parse_var(&lookup, "SCAN_CONCURRENCY", defaults.concurrency)?,
        };

        Ok(Self {
            database_url,
            json_logs,
            scanner,
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("invalid value `{raw}` for {key}: {e}")),
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// The classifier inspects exactly three positions: newest, middle, oldest.
pub const MIN_TREND_DEPTH: usize = 3;

/// One year of daily closes.
pub const MAX_VOLATILITY_SAMPLES: usize = 365;

/// One sampled observation for an instrument at a discrete time bucket.
///
/// `sequence_index` encodes recency as emitted by the data source (higher is
/// newer); the pulses rely on slice position, not on this field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub close: f64,
    pub volume: f64,
    pub sequence_index: i64,
}

impl PricePoint {
    pub fn new(close: f64, volume: f64, sequence_index: i64) -> Self {
        Self {
            close,
            volume,
            sequence_index,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket size the storage layer aggregated the trend window with.
///
/// The classifier is grouping-agnostic; this only tells the store which
/// aggregation to read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    #[default]
    Day,
    Hour,
}

impl Grouping {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grouping::Day => "day",
            Grouping::Hour => "hour",
        }
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grouping {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Grouping::Day),
            "hour" => Ok(Grouping::Hour),
            other => Err(AnalysisError::InvalidInput(format!(
                "unknown grouping `{other}` (expected `day` or `hour`)"
            ))),
        }
    }
}

/// Recent price/volume samples for one instrument, newest first.
///
/// Always holds at least [`MIN_TREND_DEPTH`] points.
#[derive(Clone, Debug, PartialEq)]
pub struct TrendWindow {
    points: Vec<PricePoint>,
}

// Never empty once constructed.
#[allow(clippy::len_without_is_empty)]
impl TrendWindow {
    pub fn new(points: Vec<PricePoint>) -> AnalysisResult<Self> {
        if points.len() < MIN_TREND_DEPTH {
            return Err(AnalysisError::InsufficientData {
                required: MIN_TREND_DEPTH,
                actual: points.len(),
            });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn newest(&self) -> &PricePoint {
        &self.points[0]
    }
}

/// Daily closing prices used for dispersion estimation.
///
/// Order matters only for normalisation: the last element is the denominator
/// of the percentage figure.
#[derive(Clone, Debug, PartialEq)]
pub struct VolatilityWindow {
    closes: Vec<f64>,
}

#[allow(clippy::len_without_is_empty)]
impl VolatilityWindow {
    pub fn new(closes: Vec<f64>) -> AnalysisResult<Self> {
        if closes.is_empty() {
            return Err(AnalysisError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        if closes.len() > MAX_VOLATILITY_SAMPLES {
            return Err(AnalysisError::InvalidInput(format!(
                "volatility window holds {} closes, at most {MAX_VOLATILITY_SAMPLES} allowed",
                closes.len()
            )));
        }
        if let Some(pos) = closes.iter().position(|c| !c.is_finite()) {
            return Err(AnalysisError::InvalidInput(format!(
                "close at position {pos} is not a finite number"
            )));
        }
        Ok(Self { closes })
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn last_close(&self) -> f64 {
        self.closes[self.closes.len() - 1]
    }
}

/// Absolute and relative dispersion of a close series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Volatility {
    pub volatility: f64,
    pub volatility_percent: f64,
}

/// An instrument that passed the trend screen, annotated with volatility.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub symbol: String,
    pub direction: Direction,
    pub volatility: f64,
    pub volatility_percent: f64,
}

impl TrendResult {
    pub fn new(symbol: impl Into<String>, direction: Direction, volatility: Volatility) -> Self {
        Self {
            symbol: symbol.into(),
            direction,
            volatility: volatility.volatility,
            volatility_percent: volatility.volatility_percent,
        }
    }
}

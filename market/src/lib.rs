//! Trend classification and volatility estimation over price history.
//!
//! Everything in this crate is a pure function over in-memory data: no I/O,
//! no logging, no shared state. Callers fetch the windows, run the pulses and
//! decide what to do with [`AnalysisError`]s.

pub mod error;
pub mod pulse;
pub mod rounding;
pub mod types;

pub use error::{AnalysisError, AnalysisResult};
pub use pulse::trend::{check_trend, classify_trend, detect_trend};
pub use pulse::volatility::estimate_volatility;
pub use types::{
    Direction, Grouping, PricePoint, TrendResult, TrendWindow, Volatility, VolatilityWindow,
};

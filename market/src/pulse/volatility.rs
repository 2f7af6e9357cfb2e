//! Volatility Pulse.
//!
//! Population standard deviation of a daily close series, plus the same
//! figure as a percentage of the series' last close:
//!
//! ```text
//! mean               = Σc / N
//! variance           = Σ(c - mean)² / N
//! volatility         = √variance
//! volatility_percent = volatility / closes[N - 1] * 100
//! ```
//!
//! The denominator is the last element *as supplied*. Callers put the most
//! recent close last; reversing the series changes the percentage but not
//! the absolute figure.
//!
//! With `decimal_places > 0` both figures are truncated via
//! [`round_down`](crate::rounding::round_down); `0` leaves them untouched.

use crate::error::{AnalysisError, AnalysisResult};
use crate::rounding::{MAX_DECIMAL_PLACES, round_down};
use crate::types::{Volatility, VolatilityWindow};

/// Estimates volatility over `closes`.
///
/// Errors:
/// - empty `closes` → `InsufficientData`
/// - negative or oversized `decimal_places` → `InvalidInput`
/// - non-finite close, or a zero last close → `InvalidInput`
pub fn estimate_volatility(closes: &[f64], decimal_places: i32) -> AnalysisResult<Volatility> {
    let places = validate_places(decimal_places)?;
    let window = VolatilityWindow::new(closes.to_vec())?;
    compute(&window, places)
}

impl VolatilityWindow {
    pub fn estimate(&self, decimal_places: i32) -> AnalysisResult<Volatility> {
        let places = validate_places(decimal_places)?;
        compute(self, places)
    }
}

fn validate_places(decimal_places: i32) -> AnalysisResult<u32> {
    match u32::try_from(decimal_places) {
        Ok(p) if p <= MAX_DECIMAL_PLACES => Ok(p),
        _ => Err(AnalysisError::InvalidInput(format!(
            "decimal places must be within 0..={MAX_DECIMAL_PLACES}, got {decimal_places}"
        ))),
    }
}

fn compute(window: &VolatilityWindow, places: u32) -> AnalysisResult<Volatility> {
    let denominator = window.last_close();
    if denominator == 0.0 {
        return Err(AnalysisError::InvalidInput(
            "last close is zero, percentage volatility is undefined".to_string(),
        ));
    }

    // Summed in sorted order so the absolute figure is independent of input order.
    let mut sorted = window.closes().to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len() as f64;
    let mean = sorted.iter().sum::<f64>() / n;
    let variance = sorted.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / n;

    let volatility = variance.sqrt();
    let volatility_percent = (volatility / denominator) * 100.0;

    if !volatility.is_finite() || !volatility_percent.is_finite() {
        return Err(AnalysisError::InvalidInput(
            "close series overflows volatility computation".to_string(),
        ));
    }

    if places == 0 {
        return Ok(Volatility {
            volatility,
            volatility_percent,
        });
    }

    Ok(Volatility {
        volatility: round_down(volatility, places),
        volatility_percent: round_down(volatility_percent, places),
    })
}

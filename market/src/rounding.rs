//! Controlled truncation of derived figures.
//!
//! Volatility figures are always rounded *down*: `floor(v * 10^p) / 10^p`.
//! Standard or banker's rounding would overstate the figure half the time.

/// Beyond this, `10^p` no longer scales an f64 price meaningfully.
pub const MAX_DECIMAL_PLACES: u32 = 15;

/// Truncates `value` at `places` decimal places, never rounding up.
///
/// Exact floor semantics: `round_down(0.29, 2)` is `0.28`, since the f64
/// nearest `0.29` sits just below it.
pub fn round_down(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let scale = 10f64.powi(places.min(MAX_DECIMAL_PLACES) as i32);
    let floored = (value * scale).floor();
    let truncated = floored / scale;

    // `value * scale` can round up onto the next grid point.
    if truncated > value {
        (floored - 1.0) / scale
    } else {
        truncated
    }
}

//! Trend Pulse.
//!
//! Flags instruments whose three most recent closes move strictly in one
//! direction while the latest volume supports the move.
//!
//! ## Trend definition
//!
//! With index 0 the newest sample:
//!
//! ```text
//! up   = close[0] > close[1] > close[2]
//! down = close[0] < close[1] < close[2]
//! volume_support = volume[0] > volume[2] || volume[0] > volume[1]
//! ```
//!
//! A direction holds only together with `volume_support`. Volume support is
//! "latest volume beats at least one of the two before it", not a monotonic
//! volume increase. Samples beyond the third are ignored.
//!
//! ## Design properties
//! - Deterministic, three comparisons per direction
//! - Grouping-agnostic (daily and hourly windows use the same rule)
//! - Windows shorter than three samples cannot be constructed

use crate::error::AnalysisResult;
use crate::types::{Direction, PricePoint, TrendWindow};

/// Returns whether `window` trends in `direction`.
pub fn classify_trend(window: &TrendWindow, direction: Direction) -> bool {
    let p = window.points();
    let (newest, middle, oldest) = (&p[0], &p[1], &p[2]);

    let price_moves = match direction {
        Direction::Up => newest.close > middle.close && middle.close > oldest.close,
        Direction::Down => newest.close < middle.close && middle.close < oldest.close,
    };

    price_moves && volume_support(newest, middle, oldest)
}

/// Tests `Up` first, then `Down`.
pub fn detect_trend(window: &TrendWindow) -> Option<Direction> {
    [Direction::Up, Direction::Down]
        .into_iter()
        .find(|d| classify_trend(window, *d))
}

/// Slice form of [`classify_trend`]; fails with `InsufficientData` below
/// three samples.
pub fn check_trend(points: &[PricePoint], direction: Direction) -> AnalysisResult<bool> {
    let window = TrendWindow::new(points.to_vec())?;
    Ok(classify_trend(&window, direction))
}

fn volume_support(newest: &PricePoint, middle: &PricePoint, oldest: &PricePoint) -> bool {
    newest.volume > oldest.volume || newest.volume > middle.volume
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    /// Builds a newest-first window from parallel close/volume slices.
    fn window(closes: &[f64], volumes: &[f64]) -> TrendWindow {
        let n = closes.len() as i64;
        let points = closes
            .iter()
            .zip(volumes)
            .enumerate()
            .map(|(i, (&c, &v))| PricePoint::new(c, v, n - i as i64))
            .collect();
        TrendWindow::new(points).unwrap()
    }

    #[test]
    fn rising_closes_with_volume_support_trend_up() {
        // 300 > 310 fails, 300 > 280 holds.
        let w = window(&[105.0, 102.0, 100.0], &[300.0, 280.0, 310.0]);

        assert!(classify_trend(&w, Direction::Up));
        assert!(!classify_trend(&w, Direction::Down));
        assert_eq!(detect_trend(&w), Some(Direction::Up));
    }

    #[test]
    fn falling_closes_with_volume_support_trend_down() {
        let w = window(&[98.0, 102.0, 105.0], &[500.0, 400.0, 450.0]);

        assert!(classify_trend(&w, Direction::Down));
        assert!(!classify_trend(&w, Direction::Up));
        assert_eq!(detect_trend(&w), Some(Direction::Down));
    }

    #[test]
    fn falling_closes_without_volume_support_do_not_trend() {
        let w = window(&[98.0, 102.0, 105.0], &[100.0, 400.0, 450.0]);

        assert!(!classify_trend(&w, Direction::Down));
        assert_eq!(detect_trend(&w), None);
    }

    #[test]
    fn equal_closes_never_trend() {
        let w = window(&[100.0, 100.0, 99.0], &[1_000.0, 1.0, 1.0]);
        assert!(!classify_trend(&w, Direction::Up));
        assert!(!classify_trend(&w, Direction::Down));

        let w = window(&[101.0, 100.0, 100.0], &[1_000.0, 1.0, 1.0]);
        assert_eq!(detect_trend(&w), None);
    }

    #[test]
    fn volume_support_needs_only_one_prior_sample() {
        // Beats the oldest only.
        let w = window(&[3.0, 2.0, 1.0], &[50.0, 60.0, 40.0]);
        assert!(classify_trend(&w, Direction::Up));

        // Beats neither.
        let w = window(&[3.0, 2.0, 1.0], &[50.0, 60.0, 70.0]);
        assert!(!classify_trend(&w, Direction::Up));

        // Ties are not support.
        let w = window(&[3.0, 2.0, 1.0], &[50.0, 50.0, 50.0]);
        assert!(!classify_trend(&w, Direction::Up));
    }

    #[test]
    fn samples_beyond_the_third_are_ignored() {
        let w = window(
            &[105.0, 102.0, 100.0, 500.0, 1.0],
            &[300.0, 280.0, 310.0, 0.0, 9_999.0],
        );
        assert_eq!(detect_trend(&w), Some(Direction::Up));
    }

    #[test]
    fn check_trend_rejects_short_slices() {
        let points = [PricePoint::new(2.0, 10.0, 2), PricePoint::new(1.0, 5.0, 1)];

        assert_eq!(
            check_trend(&points, Direction::Up),
            Err(AnalysisError::InsufficientData {
                required: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn check_trend_matches_window_form() {
        let points = [
            PricePoint::new(105.0, 300.0, 3),
            PricePoint::new(102.0, 280.0, 2),
            PricePoint::new(100.0, 310.0, 1),
        ];
        assert_eq!(check_trend(&points, Direction::Up), Ok(true));
        assert_eq!(check_trend(&points, Direction::Down), Ok(false));
    }
}

use tracing::Span;

use super::TraceId;

/// Root span for one analysis run.
pub fn run_span(grouping: &str, trace_id: &TraceId) -> Span {
    tracing::info_span!(
        "trend_scan",
        trace_id = %trace_id,
        grouping = %grouping,
    )
}

/// Child span for a single instrument; inherits the run's trace id.
pub fn symbol_span(symbol: &str) -> Span {
    tracing::debug_span!("instrument", symbol = %symbol)
}

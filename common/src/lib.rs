//! Shared plumbing for the trendwatch workspace: tracing bootstrap and
//! correlation ids for analysis runs.

pub mod logger;

pub use logger::{TraceId, init_logger, run_span, symbol_span};

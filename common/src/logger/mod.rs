mod init;
mod span;
mod trace_id;

pub use init::init_logger;
pub use span::{run_span, symbol_span};
pub use trace_id::TraceId;

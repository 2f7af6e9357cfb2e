//! Read access to stored price history.
//!
//! The analysis core never touches storage; callers fetch windows through
//! [`store::PriceHistoryStore`] and hand them to the pulses.

pub mod store;

pub use store::PriceHistoryStore;
pub use store::sqlite_store::SQLitePriceHistoryStore;

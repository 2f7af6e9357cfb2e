//! Market pulses.
//!
//! A pulse is a side-effect-free observer that derives a single market signal
//! from an already-fetched window of history. Pulses never fetch, log or
//! retain state between calls.

pub mod trend;
pub mod volatility;

// er301-rs/er301/src/utils/mod.rs

//! Small helpers shared across the crate: hex rendering for logs and
//! key parsing, and the deadline used by every poll loop.

/// Hex formatting and parsing
pub mod hex;
/// Pauses and deadlines
pub mod timeout;

pub use hex::*;
pub use timeout::*;

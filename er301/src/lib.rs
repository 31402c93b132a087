// er301-rs/er301/src/lib.rs

//! er301
//!
//! Pure Rust driver for the ER301 serial Mifare reader: frame codec,
//! command tables, block addressing and a card read engine that reports
//! through host callbacks.
#![warn(missing_docs)]

/// Selected cards, addressing, sessions and readouts
pub mod card;
/// Engine settings
pub mod config;
/// Protocol constants
pub mod constants;
/// Reader handle with one method per command
pub mod device;
/// Crate error type
pub mod error;
/// Common imports
pub mod prelude;
/// Frame codec, command and response tables
pub mod protocol;
/// Card read engine
pub mod reader;
/// Fakes for hardware-free tests
pub mod test_support;
/// Byte transports: serial port and mock
pub mod transport;
/// Protocol value types
pub mod types;
/// Hex and timing helpers
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;

// er301-rs/er301/src/transport/mod.rs

/// In-memory transport for tests
pub mod mock;
/// Serial port transport
#[cfg(feature = "serial")]
pub mod serial;
/// Transport trait
pub mod traits;

pub use mock::MockTransport;
#[cfg(feature = "serial")]
pub use serial::{SerialSettings, SerialTransport};
pub use traits::Transport;

// er301-rs/er301/src/protocol/mod.rs

/// XOR checksum
pub mod checksum;
/// Command to frame and frame to reply
pub mod codec;
/// Command and response code tables
pub mod codes;
/// Typed commands and their payloads
pub mod commands;
/// Wire frames
pub mod frame;
/// Bounds-checked field readers
pub mod parser;
/// Typed replies
pub mod responses;

pub use checksum::checksum;
pub use codes::{CommandCode, ResponseCode};
pub use commands::Command;
pub use frame::Frame;
pub use responses::{Reply, Response, ResponseHeader};

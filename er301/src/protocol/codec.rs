// er301-rs/er301/src/protocol/codec.rs

use crate::Result;
use crate::types::NodeId;

use super::Frame;
use super::codes::CommandCode;
use super::commands::Command;
use super::responses::{Reply, decode_reply};

/// Encode a Command into a full wire frame (magic, length, escaping, XOR).
pub fn encode_command_frame(node: NodeId, cmd: &Command) -> Result<Vec<u8>> {
    Frame::new(node, cmd.command_code(), &cmd.encode()).encode()
}

/// Decode a full reader frame and parse the contained reply for the
/// expected command.
pub fn decode_response_frame(expected: CommandCode, frame: &[u8]) -> Result<Reply> {
    let frame = Frame::decode_response(frame)?;
    decode_reply(expected, &frame)
}

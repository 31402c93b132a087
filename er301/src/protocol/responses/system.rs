// er301-rs/er301/src/protocol/responses/system.rs

use crate::constants::{DEVICE_NAME_OFFSET, PAYLOAD_OFFSET, RESPONSE_CODE_OFFSET};
use crate::protocol::parser;
use crate::types::NodeId;
use crate::Result;

/// Decode a READ_DEVICE_MODE reply.
/// Layout: response_code(1) + mode(1) + name(n), NUL padded
pub fn decode_device_mode(data: &[u8]) -> Result<String> {
    let start = DEVICE_NAME_OFFSET - RESPONSE_CODE_OFFSET;
    parser::ensure_len(data, start)?;
    let name = &data[start..];
    let end = name
        .iter()
        .rposition(|&b| b != 0)
        .map(|i| i + 1)
        .unwrap_or(0);
    let name = &name[..end];
    let start = name.iter().position(|&b| b != 0).unwrap_or(end);
    Ok(String::from_utf8_lossy(&name[start..]).into_owned())
}

/// Decode a GET_DEVICE_NODE_NO reply.
/// Layout: response_code(1) + node(2, LE)
pub fn decode_node_number(data: &[u8]) -> Result<NodeId> {
    Ok(NodeId::new(parser::le_u16_at(data, PAYLOAD_OFFSET - RESPONSE_CODE_OFFSET)?))
}

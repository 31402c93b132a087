// er301-rs/er301/src/protocol/commands/mifare.rs

use crate::types::{AuthMode, BlockData, RequestCode, SectorKey, SerialNumber};

/// MIFARE_REQUEST parameters: request code(1)
pub fn encode_request(code: RequestCode) -> Vec<u8> {
    vec![code as u8]
}

/// MIFARE_SELECT parameters: serial number(4) in the order anticollision
/// returned it
pub fn encode_select(serial: SerialNumber) -> Vec<u8> {
    serial.to_wire_bytes().to_vec()
}

/// MIFARE_AUTHENTICATION2 parameters: mode(1) + block(1) + key(6)
pub fn encode_authenticate(mode: AuthMode, block: u8, key: &SectorKey) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + 6);
    out.push(mode as u8);
    out.push(block);
    out.extend_from_slice(key.as_bytes());
    out
}

/// MIFARE_READ / MIFARE_READBALANCE parameters: block(1)
pub fn encode_block(block: u8) -> Vec<u8> {
    vec![block]
}

/// MIFARE_WRITE parameters: block(1) + data(16)
pub fn encode_write(block: u8, data: &BlockData) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + 16);
    out.push(block);
    out.extend_from_slice(data.as_bytes());
    out
}

/// Value block operations: block(1) + value(4, LE)
pub fn encode_value(block: u8, value: [u8; 4]) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + 4);
    out.push(block);
    out.extend_from_slice(&value);
    out
}

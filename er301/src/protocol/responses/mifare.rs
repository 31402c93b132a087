// er301-rs/er301/src/protocol/responses/mifare.rs

use crate::constants::{PAYLOAD_OFFSET, RESPONSE_CODE_OFFSET};
use crate::protocol::parser;
use crate::types::{BlockData, CardType, SerialNumber};
use crate::Result;

/// Payload start inside the reply data, which begins at the response code
const PAYLOAD: usize = PAYLOAD_OFFSET - RESPONSE_CODE_OFFSET;

/// Decode a MIFARE_REQUEST reply.
/// Layout: response_code(1) + card_type(2, LE)
pub fn decode_card_type(data: &[u8]) -> Result<CardType> {
    Ok(CardType::from_u16(parser::le_u16_at(data, PAYLOAD)?))
}

/// Decode a MIFARE_ANTICOLLISION reply.
/// Layout: response_code(1) + serial(4), kept in wire order
pub fn decode_serial(data: &[u8]) -> Result<SerialNumber> {
    parser::serial_at(data, PAYLOAD)
}

/// Decode a MIFARE_SELECT reply.
/// Layout: response_code(1) + sak(1)
pub fn decode_sak(data: &[u8]) -> Result<u8> {
    parser::byte_at(data, PAYLOAD)
}

/// Decode a MIFARE_READ reply.
/// Layout: response_code(1) + block(16)
pub fn decode_block(data: &[u8]) -> Result<BlockData> {
    parser::block_at(data, PAYLOAD)
}

/// Decode a MIFARE_READBALANCE reply.
/// Layout: response_code(1) + value(4, LE, signed)
pub fn decode_balance(data: &[u8]) -> Result<i32> {
    Ok(parser::le_u32_at(data, PAYLOAD)? as i32)
}

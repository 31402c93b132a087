// er301-rs/er301/src/constants.rs
//! Common protocol constants used across the crate

/// Frame start marker as it appears on the wire: 0xAA 0xBB
pub const MAGIC_BYTES: [u8; 2] = [0xAA, 0xBB];

/// Byte value that must be stuffed inside the variable region of a frame.
/// Every occurrence is sent as `ESCAPE_BYTE, ESCAPE_FILL`.
pub const ESCAPE_BYTE: u8 = 0xAA;
/// Byte sent after every stuffed escape byte
pub const ESCAPE_FILL: u8 = 0x00;

/// Broadcast node id, used for single-reader setups
pub const NODE_BROADCAST: u16 = 0x0000;

/// Magic(2) + length(2)
pub const FRAME_HEADER_LEN: usize = 4;

/// Offsets inside an inbound frame, starting with the node id
pub const NODE_ID_OFFSET: usize = 4;
/// Echoed command code
pub const COMMAND_OFFSET: usize = 6;
/// Response code byte
pub const RESPONSE_CODE_OFFSET: usize = 8;
/// First payload byte
pub const PAYLOAD_OFFSET: usize = 9;
/// The device name reply carries one extra byte before the name itself
pub const DEVICE_NAME_OFFSET: usize = 10;

/// Smallest reply the decoder accepts: header + node + command + response code
pub const MIN_RESPONSE_LEN: usize = RESPONSE_CODE_OFFSET + 1;

/// Node id(2) + command(2) + checksum(1) counted by an outbound length field
pub const LENGTH_OVERHEAD: usize = 5;

/// Mifare block size in bytes
pub const BLOCK_SIZE: usize = 16;

/// Mifare sector key length in bytes
pub const KEY_LEN: usize = 6;

/// Number of init-port writes before bring-up is declared failed
pub const INIT_REQUEST_RETRY_COUNT: usize = 5;

/// Default serial link speed (8-N-1)
pub const DEFAULT_BAUD: u32 = 115_200;

/// Receive buffer size; the largest reply (device name) fits comfortably
pub const MAX_FRAME_LEN: usize = 64;

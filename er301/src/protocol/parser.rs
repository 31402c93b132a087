// er301-rs/er301/src/protocol/parser.rs

use crate::types::{BlockData, SerialNumber};
use crate::{Error, Result};

/// Ensure the slice has at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(Error::FrameTooShort {
            expected: min,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Read a little-endian u16 at given index, with bounds checking.
pub fn le_u16_at(data: &[u8], idx: usize) -> Result<u16> {
    ensure_len(data, idx + 2)?;
    Ok(u16::from_le_bytes([data[idx], data[idx + 1]]))
}

/// Read a little-endian u32 at given index, with bounds checking.
pub fn le_u32_at(data: &[u8], idx: usize) -> Result<u32> {
    let s = slice_at(data, idx, 4)?;
    Ok(u32::from_le_bytes([s[0], s[1], s[2], s[3]]))
}

/// Return a subslice with bounds checking.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> Result<&[u8]> {
    ensure_len(data, idx + len)?;
    Ok(&data[idx..idx + len])
}

/// Read a single byte at `idx` with bounds checking.
pub fn byte_at(data: &[u8], idx: usize) -> Result<u8> {
    ensure_len(data, idx + 1)?;
    Ok(data[idx])
}

/// Parse a wire-order serial number (4 bytes) at `start`.
pub fn serial_at(data: &[u8], start: usize) -> Result<SerialNumber> {
    Ok(SerialNumber::from_wire(le_u32_at(data, start)?))
}

/// Parse a 16-byte block at `start`.
pub fn block_at(data: &[u8], start: usize) -> Result<BlockData> {
    BlockData::try_from(slice_at(data, start, 16)?)
}

// er301-rs/er301/src/utils/hex.rs

//! Hexadecimal helpers for frame tracing, key display and key parsing.

use std::fmt::Write;

use crate::constants::KEY_LEN;
use crate::types::SectorKey;
use crate::{Error, Result};

/// Lowercase hex without separators: `&[0xde, 0xad]` -> `"dead"`
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // writing to a String cannot fail
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

/// Lowercase hex with one space between bytes: `&[0xde, 0xad]` -> `"de ad"`
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 {
            s.push(' ');
        }
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

/// Parse a hex string into bytes. ASCII whitespace is ignored.
pub fn parse_hex(s: &str) -> Result<Vec<u8>> {
    let cleaned: Vec<u8> = s.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    if cleaned.len() % 2 != 0 {
        return Err(Error::FrameFormat(format!(
            "hex string '{}' has odd length",
            s
        )));
    }

    cleaned
        .chunks(2)
        .map(|pair| {
            let text = std::str::from_utf8(pair).unwrap_or("??");
            u8::from_str_radix(text, 16)
                .map_err(|e| Error::FrameFormat(format!("invalid hex pair '{}': {}", text, e)))
        })
        .collect()
}

/// Parse a 6-byte sector key written as 12 hex digits, e.g. `"ffffffffffff"`
/// or `"a0 a1 a2 a3 a4 a5"`.
pub fn parse_key(s: &str) -> Result<SectorKey> {
    let bytes = parse_hex(s)?;
    if bytes.len() != KEY_LEN {
        return Err(Error::FrameFormat(format!(
            "key must be {} bytes, got {}",
            KEY_LEN,
            bytes.len()
        )));
    }
    SectorKey::try_from(bytes.as_slice())
}

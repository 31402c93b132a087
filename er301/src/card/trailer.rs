// er301-rs/er301/src/card/trailer.rs

use std::ops::Range;

use crate::types::{BlockData, SectorKey};

/// Key A slot of a sector trailer block
pub const KEY_A_BYTES: Range<usize> = 0..6;
/// Access condition bytes, passed through as read
pub const ACCESS_BITS: Range<usize> = 6..10;
/// Key B slot
pub const KEY_B_BYTES: Range<usize> = 10..16;

/// Overwrite the key slots of a trailer block. Cards never return their
/// keys, so the reader answers zeros there; the access bits stay as read.
pub fn substitute_trailer_keys(
    block: &mut BlockData,
    key_a: Option<&SectorKey>,
    key_b: Option<&SectorKey>,
) {
    let bytes = block.as_bytes_mut();
    if let Some(key) = key_a {
        bytes[KEY_A_BYTES].copy_from_slice(key.as_bytes());
    }
    if let Some(key) = key_b {
        bytes[KEY_B_BYTES].copy_from_slice(key.as_bytes());
    }
}

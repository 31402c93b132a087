// er301-rs/er301/src/protocol/checksum.rs

/// XOR checksum over `bytes[start..end)`.
///
/// Out-of-range bounds are clamped to the slice, so the function never fails.
pub fn checksum(bytes: &[u8], start: usize, end: usize) -> u8 {
    let end = end.min(bytes.len());
    let start = start.min(end);
    xor(&bytes[start..end])
}

/// XOR checksum over a whole slice
pub fn xor(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc ^ b)
}

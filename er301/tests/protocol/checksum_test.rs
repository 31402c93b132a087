use er301::protocol::checksum::{checksum, xor};

#[test]
fn init_port_capture_checksum() {
    // AA BB 06 00 00 00 01 01 07 | 07
    let frame = [0xAA, 0xBB, 0x06, 0x00, 0x00, 0x00, 0x01, 0x01, 0x07];
    assert_eq!(checksum(&frame, 4, frame.len()), 0x07);
}

#[test]
fn checksum_is_self_inverse() {
    let bytes = [0x12u8, 0x34, 0x56, 0x78, 0x9a];
    let c = checksum(&bytes, 0, bytes.len());
    assert_eq!(c ^ c, 0);
    let mut with_checksum = bytes.to_vec();
    with_checksum.push(c);
    assert_eq!(xor(&with_checksum), 0);
}

#[test]
fn single_byte_corruption_changes_checksum() {
    let bytes = [0x00u8, 0x00, 0x08, 0x02, 0x00, 0x5a];
    let base = checksum(&bytes, 0, bytes.len());
    for i in 0..bytes.len() {
        let mut corrupted = bytes;
        corrupted[i] ^= 0x40;
        assert_ne!(checksum(&corrupted, 0, corrupted.len()), base, "byte {}", i);
    }
}

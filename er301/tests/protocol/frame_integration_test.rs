#[path = "../common/mod.rs"]
mod common;

use er301::Error;
use er301::protocol::frame::{Frame, is_complete};
use er301::protocol::{CommandCode, ResponseCode};
use er301::test_support::response_frame;
use er301::types::NodeId;

#[test]
fn read_reply_carries_code_and_block() {
    let block = common::fixtures::sample_block();
    let bytes = common::fixtures::read_frame(block.as_bytes());
    let frame = Frame::decode_response(&bytes).expect("frame decode");
    assert_eq!(frame.command_code().unwrap(), CommandCode::MifareRead);
    assert_eq!(frame.node_id, NodeId::BROADCAST);
    assert_eq!(frame.data[0], ResponseCode::Ok.as_u8());
    assert_eq!(&frame.data[1..], block.as_bytes());
}

#[test]
fn corrupted_reply_reports_both_checksums() {
    let mut bytes = response_frame(CommandCode::MifareHalt, ResponseCode::Ok, &[]);
    let last = bytes.len() - 1;
    let good = bytes[last];
    bytes[last] ^= 0x01;
    match Frame::decode_response(&bytes) {
        Err(Error::ChecksumMismatch { expected, actual }) => {
            assert_eq!(expected, good);
            assert_eq!(actual, good ^ 0x01);
        }
        other => panic!("expected ChecksumMismatch, got {:?}", other),
    }
}

#[test]
fn length_counting_the_checksum_is_rejected() {
    // AA BB 06 00 | 00 00 04 02 00 | xor: the checksum lands inside the
    // declared region and the byte after it never comes
    let region = [0x00u8, 0x00, 0x04, 0x02, 0x00];
    let x = region.iter().fold(0u8, |a, b| a ^ b);
    let mut bytes = vec![0xAA, 0xBB, 0x06, 0x00];
    bytes.extend_from_slice(&region);
    bytes.push(x);
    assert!(!is_complete(&bytes));
    assert!(matches!(
        Frame::decode_response(&bytes),
        Err(Error::FrameTooShort { .. })
    ));
}

#[test]
fn partial_reply_is_not_complete() {
    let bytes = common::fixtures::init_ok_frame();
    assert!(!is_complete(&bytes[..3]));
    assert!(!is_complete(&bytes[..6]));
    // region present, checksum byte missing
    assert!(!is_complete(&bytes[..bytes.len() - 1]));
    assert!(is_complete(&bytes));
}

#[test]
fn host_frame_roundtrip_with_escapes() {
    let payload = [0x61, 0x04, 0xAA, 0xAA, 0x01, 0x02, 0x03, 0x04];
    let frame = Frame::new(NodeId::new(0x00AA), CommandCode::MifareAuthenticate, &payload);
    let bytes = frame.encode().unwrap();

    // node low byte plus two key bytes are stuffed
    assert_eq!(bytes.len(), 4 + 4 + payload.len() + 3 + 1);
    assert_eq!(u16::from_le_bytes([bytes[2], bytes[3]]) as usize, payload.len() + 5);

    let back = Frame::decode_command(&bytes).unwrap();
    assert_eq!(back, frame);
}

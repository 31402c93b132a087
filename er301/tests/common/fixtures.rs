// fixtures.rs — commonly used reader replies and card data

use er301::protocol::{CommandCode, ResponseCode};
use er301::test_support::response_frame;
use er301::types::{BlockData, CardType};

/// Serial as the reader sends it in the anticollision reply
pub const WIRE_SERIAL: u32 = 0x1234_5678;
/// The same serial in natural order
pub const REPORTED_SERIAL: u32 = 0x7856_3412;

pub fn ok_frame(command: CommandCode) -> Vec<u8> {
    response_frame(command, ResponseCode::Ok, &[])
}

pub fn init_ok_frame() -> Vec<u8> {
    ok_frame(CommandCode::InitPort)
}

pub fn device_mode_frame(name: &str) -> Vec<u8> {
    let mut payload = vec![0x01];
    payload.extend_from_slice(name.as_bytes());
    payload.extend_from_slice(&[0, 0]);
    response_frame(CommandCode::ReadDeviceMode, ResponseCode::Ok, &payload)
}

pub fn request_frame(card_type: CardType) -> Vec<u8> {
    response_frame(
        CommandCode::MifareRequest,
        ResponseCode::Ok,
        &card_type.as_u16().to_le_bytes(),
    )
}

pub fn no_card_frame() -> Vec<u8> {
    response_frame(CommandCode::MifareRequest, ResponseCode::NoCard, &[])
}

pub fn anticollision_frame(wire_serial: u32) -> Vec<u8> {
    response_frame(
        CommandCode::MifareAnticollision,
        ResponseCode::Ok,
        &wire_serial.to_le_bytes(),
    )
}

pub fn select_frame(sak: u8) -> Vec<u8> {
    response_frame(CommandCode::MifareSelect, ResponseCode::Ok, &[sak])
}

pub fn read_frame(data: &[u8; 16]) -> Vec<u8> {
    response_frame(CommandCode::MifareRead, ResponseCode::Ok, data)
}

pub fn sample_block() -> BlockData {
    BlockData::from_bytes([
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
        0xee, 0xff,
    ])
}

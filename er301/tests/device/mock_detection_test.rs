#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use er301::Error;
use er301::protocol::{CommandCode, ResponseCode};
use er301::test_support::response_frame;
use er301::types::{CardType, RequestCode, SerialNumber};

#[test]
fn detection_sequence() {
    let mut dev = common::initialized_mock_device(vec![
        fixtures::no_card_frame(),
        fixtures::request_frame(CardType::Classic1K),
        fixtures::anticollision_frame(fixtures::WIRE_SERIAL),
        fixtures::select_frame(0x08),
    ]);

    assert_eq!(dev.request(RequestCode::AllTypeA).unwrap(), None);
    assert_eq!(
        dev.request(RequestCode::AllTypeA).unwrap(),
        Some(CardType::Classic1K)
    );
    let serial = dev.anticollision().unwrap();
    assert_eq!(serial.reported(), fixtures::REPORTED_SERIAL);
    assert_eq!(dev.select(serial).unwrap(), 0x08);
}

#[test]
fn anticollision_without_card_is_response_error() {
    let mut dev = common::initialized_mock_device(vec![response_frame(
        CommandCode::MifareAnticollision,
        ResponseCode::NoCard,
        &[],
    )]);
    assert!(matches!(
        dev.anticollision(),
        Err(Error::Response {
            command: CommandCode::MifareAnticollision,
            code: ResponseCode::NoCard,
        })
    ));
}

#[test]
fn select_failure_carries_serial() {
    let mut dev = common::initialized_mock_device(vec![response_frame(
        CommandCode::MifareSelect,
        ResponseCode::NoCard,
        &[],
    )]);
    let serial = SerialNumber::from_wire(fixtures::WIRE_SERIAL);
    match dev.select(serial) {
        Err(Error::Select { serial: s, code }) => {
            assert_eq!(s, serial);
            assert_eq!(code, ResponseCode::NoCard);
        }
        other => panic!("expected Select error, got {:?}", other),
    }
}

#[test]
fn device_name_and_node_number() {
    let mut dev = common::initialized_mock_device(vec![
        fixtures::device_mode_frame("ER301 V2"),
        response_frame(
            CommandCode::GetDeviceNodeNumber,
            ResponseCode::Ok,
            &[0x34, 0x12],
        ),
    ]);
    assert_eq!(dev.read_device_mode().unwrap(), "ER301 V2");
    assert_eq!(dev.get_node_number().unwrap().as_u16(), 0x1234);
}

use er301::protocol::codec::encode_command_frame;
use er301::protocol::{Command, CommandCode, Frame};
use er301::types::{
    AuthMode, BaudRate, BeepDuration, LedColor, NodeId, RequestCode, SectorKey, SerialNumber,
};

fn roundtrip(cmd: &Command) -> Frame {
    let bytes = encode_command_frame(NodeId::BROADCAST, cmd).unwrap();
    Frame::decode_command(&bytes).unwrap()
}

#[test]
fn init_port_matches_capture() {
    let bytes = encode_command_frame(
        NodeId::BROADCAST,
        &Command::InitPort {
            baud: BaudRate::Baud115200,
        },
    )
    .unwrap();
    assert_eq!(
        bytes,
        vec![0xAA, 0xBB, 0x06, 0x00, 0x00, 0x00, 0x01, 0x01, 0x07, 0x07]
    );
}

#[test]
fn every_command_survives_the_codec() {
    let cmds = [
        Command::ReadDeviceMode,
        Command::Beep {
            duration: BeepDuration::Long,
        },
        Command::SetLed {
            color: LedColor::Blue,
        },
        Command::Request {
            code: RequestCode::IdleCard,
        },
        Command::Anticollision,
        Command::Select {
            serial: SerialNumber::from_wire(0x1234_5678),
        },
        Command::Halt,
        Command::Authenticate {
            mode: AuthMode::KeyA,
            block: 60,
            key: SectorKey::from_bytes([0xA0, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5]),
        },
        Command::Read { block: 63 },
        Command::Increment { block: 9, value: 1 },
    ];
    for cmd in cmds.iter() {
        let frame = roundtrip(cmd);
        assert_eq!(frame.command_code().unwrap(), cmd.command_code());
        assert_eq!(frame.data, cmd.encode(), "{:?}", cmd);
    }
}

#[test]
fn authenticate_frame_layout() {
    let cmd = Command::Authenticate {
        mode: AuthMode::KeyB,
        block: 4,
        key: SectorKey::DEFAULT,
    };
    let bytes = encode_command_frame(NodeId::BROADCAST, &cmd).unwrap();
    assert_eq!(&bytes[6..8], &CommandCode::MifareAuthenticate.to_le_bytes());
    assert_eq!(&bytes[8..10], &[0x61, 0x04]);
    assert_eq!(&bytes[10..16], &[0xff; 6]);
}

#[path = "../common/mod.rs"]
mod common;

use er301::protocol::CommandCode;
use er301::test_support::SimulatedReader;
use er301::transport::Transport;
use er301::transport::mock::MockTransport;
use er301::types::CardType;

#[test]
fn mock_releases_one_reply_per_write() {
    let mut m = MockTransport::new();
    common::seed_init_and_frames(&mut m, vec![vec![0x01, 0x02]]);

    m.send(&[0x00]).unwrap();
    let first = m.receive(64).unwrap();
    assert_eq!(first, common::fixtures::init_ok_frame());

    assert_eq!(m.bytes_available().unwrap(), 0);
    m.send(&[0x00]).unwrap();
    assert_eq!(m.receive(64).unwrap(), vec![0x01, 0x02]);
}

#[test]
fn clear_input_drops_pending_bytes() {
    let mut m = MockTransport::new();
    m.push_response(vec![1, 2, 3]);
    m.send(&[]).unwrap();
    m.clear_input().unwrap();
    assert_eq!(m.bytes_available().unwrap(), 0);
}

#[test]
fn simulated_reader_answers_init() {
    let sim = SimulatedReader::with_card(CardType::Classic1K, 1);
    let mut t = sim.boxed();
    let frame = er301::protocol::codec::encode_command_frame(
        er301::types::NodeId::BROADCAST,
        &er301::protocol::Command::InitPort {
            baud: er301::types::BaudRate::Baud115200,
        },
    )
    .unwrap();
    t.send(&frame).unwrap();
    assert!(t.bytes_available().unwrap() > 0);
    assert_eq!(sim.count(CommandCode::InitPort), 1);
    assert_eq!(t.name(), "simulated");
}

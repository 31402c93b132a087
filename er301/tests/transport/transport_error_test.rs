#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use er301::Error;
use er301::device::Device;
use er301::protocol::CommandCode;
use er301::test_support::SimulatedReader;
use er301::transport::Transport;
use er301::transport::mock::MockTransport;
use er301::types::CardType;

#[test]
fn garbage_write_is_rejected_by_simulator() {
    let mut sim = SimulatedReader::with_card(CardType::Classic1K, 1);
    assert!(sim.send(&[0x00, 0x01, 0x02]).is_err());
    assert_eq!(sim.bytes_available().unwrap(), 0);
}

#[test]
fn silent_reader_times_out() {
    let cfg = common::config().with_response_timeout(Duration::from_millis(20));
    let mut m = MockTransport::new();
    common::seed_init_and_frames(&mut m, vec![]);
    let mut dev = Device::new_with_transport(Box::new(m), cfg)
        .initialize()
        .unwrap();
    match dev.read_block(0) {
        Err(Error::Timeout { command, waited_ms }) => {
            assert_eq!(command, CommandCode::MifareRead);
            assert!(waited_ms >= 20);
        }
        other => panic!("expected Timeout, got {:?}", other),
    }
}

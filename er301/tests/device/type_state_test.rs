#[path = "../common/mod.rs"]
mod common;

use er301::Error;
use er301::device::{Device, DeviceBuilder};
use er301::transport::mock::MockTransport;
use er301::types::NodeId;

#[test]
fn initialize_transitions_and_keeps_config() {
    let mut m = MockTransport::new();
    common::seed_init_and_frames(&mut m, vec![]);

    let device = DeviceBuilder::new()
        .with_transport(Box::new(m))
        .with_config(common::config().with_node(NodeId::new(0x0102)))
        .build_uninitialized()
        .unwrap();
    assert_eq!(device.node(), NodeId::new(0x0102));

    let initialized = device.initialize().unwrap();
    assert_eq!(initialized.node(), NodeId::new(0x0102));
    assert_eq!(initialized.transport_name(), "mock");
}

#[test]
fn unanswered_bring_up_is_a_connection_error() {
    let device = Device::new_with_transport(
        Box::new(MockTransport::new()),
        common::config().with_init_attempts(5),
    );
    match device.initialize() {
        Err(Error::Connection(msg)) => assert!(msg.contains("5 attempts"), "{}", msg),
        Err(other) => panic!("expected Connection, got {:?}", other),
        Ok(_) => panic!("bring-up should fail"),
    }
}

#[test]
fn late_answer_within_retry_budget() {
    let mut m = MockTransport::new();
    for _ in 0..4 {
        m.push_response(Vec::new());
    }
    common::seed_init_and_frames(&mut m, vec![]);
    let device = Device::new_with_transport(Box::new(m), common::config());
    assert!(device.initialize().is_ok());
}

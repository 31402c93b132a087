#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use er301::Error;
use er301::protocol::{CommandCode, ResponseCode};
use er301::reader::{CycleOutcome, MifareReader, ReaderState};
use er301::test_support::{Event, RecordingCallback, SimulatedReader, response_frame};
use er301::transport::mock::MockTransport;
use er301::types::{AuthMode, CardType, SectorKey};

fn alarm_tail(sim: &SimulatedReader) -> Vec<u16> {
    let commands = sim.commands();
    commands[commands.len() - 3..].to_vec()
}

#[test]
fn wrong_key_a_aborts_before_any_read() {
    let sim = SimulatedReader::with_card(CardType::Classic1K, fixtures::WIRE_SERIAL);
    sim.state()
        .key_a
        .insert(0, SectorKey::from_bytes([0xA0, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5]));
    let mut cb = RecordingCallback::new();
    let mut reader = common::open_reader(&sim, &mut cb);

    let outcome = reader.run_once();
    match outcome {
        CycleOutcome::Failed(Error::Auth {
            sector, mode, code, ..
        }) => {
            assert_eq!(sector, 0);
            assert_eq!(mode, AuthMode::KeyA);
            assert_eq!(code, ResponseCode::AuthFailure);
        }
        other => panic!("expected auth failure, got {:?}", other),
    }
    assert_eq!(reader.state(), ReaderState::Detecting);
    drop(reader);

    assert_eq!(sim.count(CommandCode::MifareRead), 0);
    // detection plus the idle request after the failed authentication
    assert_eq!(sim.count(CommandCode::MifareRequest), 2);
    assert_eq!(cb.error_count(), 1);
    assert!(cb.successes().is_empty());

    let status = cb
        .statuses()
        .into_iter()
        .find(|s| s.contains("sector 0"))
        .expect("auth failure status");
    assert!(status.contains("key A"));

    assert_eq!(
        alarm_tail(&sim),
        vec![
            CommandCode::SetLedColor.as_u16(),
            CommandCode::SetBuzzerBeep.as_u16(),
            CommandCode::SetLedColor.as_u16(),
        ]
    );
}

#[test]
fn failure_status_precedes_error_event() {
    let sim = SimulatedReader::with_card(CardType::Classic1K, 1);
    sim.state().key_a.insert(2, SectorKey::from_bytes([0; 6]));
    let mut cb = RecordingCallback::new();
    let mut reader = common::open_reader(&sim, &mut cb);
    assert!(matches!(reader.run_once(), CycleOutcome::Failed(Error::Auth { sector: 2, .. })));
    drop(reader);

    // sectors 0 and 1 were read before the failure
    assert_eq!(sim.blocks_read().len(), 8);
    let n = cb.events.len();
    assert_eq!(cb.events[n - 1], Event::Error);
    assert!(matches!(&cb.events[n - 2], Event::Status(s) if s.contains("sector 2")));
}

#[test]
fn missing_key_b_is_reported() {
    let sim = SimulatedReader::with_card(CardType::Classic1K, 1);
    let mut cb = RecordingCallback::new();
    cb.use_b = true;
    let mut reader = common::open_reader(&sim, &mut cb);

    match reader.run_once() {
        CycleOutcome::Failed(Error::KeyUnavailable { sector, mode }) => {
            assert_eq!(sector, 0);
            assert_eq!(mode, AuthMode::KeyB);
        }
        other => panic!("expected missing key, got {:?}", other),
    }
    drop(reader);

    // key A for sector 0 went through first
    assert_eq!(sim.count(CommandCode::MifareAuthenticate), 1);
    assert_eq!(sim.count(CommandCode::MifareRead), 0);
    assert_eq!(cb.error_count(), 1);
}

#[test]
fn no_enabled_key_slot_fails_without_authenticating() {
    let sim = SimulatedReader::with_card(CardType::Classic1K, 1);
    let mut cb = RecordingCallback::new();
    cb.use_a = false;
    let mut reader = common::open_reader(&sim, &mut cb);

    assert!(matches!(
        reader.run_once(),
        CycleOutcome::Failed(Error::NoAuthMode)
    ));
    drop(reader);

    assert_eq!(sim.count(CommandCode::MifareAuthenticate), 0);
    assert!(cb.key_requests.is_empty());
    assert_eq!(cb.error_count(), 1);
}

#[test]
fn select_rejection_fails_the_cycle() {
    let mut mock = MockTransport::new();
    common::seed_init_and_frames(
        &mut mock,
        vec![
            fixtures::device_mode_frame("ER301"),
            fixtures::ok_frame(CommandCode::SetLedColor),
            fixtures::ok_frame(CommandCode::SetLedColor),
            fixtures::request_frame(CardType::Classic1K),
            fixtures::ok_frame(CommandCode::SetLedColor),
            fixtures::anticollision_frame(fixtures::WIRE_SERIAL),
            response_frame(CommandCode::MifareSelect, ResponseCode::General, &[]),
            fixtures::ok_frame(CommandCode::SetLedColor),
            fixtures::ok_frame(CommandCode::SetBuzzerBeep),
            fixtures::ok_frame(CommandCode::SetLedColor),
        ],
    );
    let mut cb = RecordingCallback::new();
    let mut reader =
        MifareReader::open(Box::new(mock), &mut cb, common::config()).expect("bring-up");

    match reader.run_once() {
        CycleOutcome::Failed(Error::Select { serial, code }) => {
            assert_eq!(serial.reported(), fixtures::REPORTED_SERIAL);
            assert_eq!(code, ResponseCode::General);
        }
        other => panic!("expected select failure, got {:?}", other),
    }
    drop(reader);

    assert_eq!(cb.error_count(), 1);
    assert!(cb.blocks().is_empty());
    assert!(cb.statuses().iter().any(|s| s.contains("failed to select card")));
}

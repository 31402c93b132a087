#[path = "../common/mod.rs"]
mod common;

use std::thread;
use std::time::Duration;

use er301::protocol::CommandCode;
use er301::reader::{CycleOutcome, ReaderState};
use er301::test_support::{RecordingCallback, SimulatedReader};
use er301::types::CardType;

const INTERRUPTED: &str = "Reading of card interrupted by user!";

#[test]
fn cancel_mid_card_stops_at_block_boundary() {
    let sim = SimulatedReader::with_card(CardType::Classic1K, 1);
    let mut cb = RecordingCallback::new();
    let mut reader = common::open_reader(&sim, &mut cb);
    sim.state().cancel_after_reads = Some((5, reader.cancel_token()));

    assert!(matches!(reader.run_once(), CycleOutcome::Cancelled));
    assert_eq!(reader.state(), ReaderState::Detecting);
    drop(reader);

    assert_eq!(sim.blocks_read(), vec![0, 1, 2, 3, 4]);
    assert_eq!(sim.count(CommandCode::MifareHalt), 0);
    assert_eq!(cb.blocks().len(), 5);
    assert!(cb.successes().is_empty());
    assert_eq!(cb.error_count(), 0);
    assert_eq!(cb.statuses().last().copied(), Some(INTERRUPTED));
}

#[test]
fn cancel_before_detection_sends_no_request() {
    let sim = SimulatedReader::with_card(CardType::Classic1K, 1);
    let mut cb = RecordingCallback::new();
    let mut reader = common::open_reader(&sim, &mut cb);
    reader.cancel_token().cancel();

    assert!(matches!(reader.run_once(), CycleOutcome::Cancelled));
    drop(reader);

    assert_eq!(sim.count(CommandCode::MifareRequest), 0);
    assert_eq!(cb.error_count(), 0);
}

#[test]
fn cancel_from_another_thread_ends_detection() {
    let sim = SimulatedReader::empty();
    let mut cb = RecordingCallback::new();
    let mut reader = common::open_reader(&sim, &mut cb);
    let token = reader.cancel_token();

    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        token.cancel();
    });
    let outcome = reader.run_once();
    canceller.join().expect("canceller thread");

    assert!(matches!(outcome, CycleOutcome::Cancelled));
    drop(reader);
    assert!(sim.count(CommandCode::MifareRequest) >= 1);
    assert_eq!(sim.count(CommandCode::MifareAnticollision), 0);
    assert_eq!(cb.error_count(), 0);
}

#[test]
fn run_loop_returns_after_cancel() {
    let sim = SimulatedReader::with_card(CardType::Classic1K, 1);
    let mut cb = RecordingCallback::new();
    let mut reader = common::open_reader(&sim, &mut cb);
    // the halted card is woken again by ALL_TYPE_A and read a second time
    sim.state().cancel_after_reads = Some((64 + 6, reader.cancel_token()));

    reader.run().expect("cancel ends the loop cleanly");
    drop(reader);

    assert_eq!(cb.successes().len(), 1);
    assert_eq!(sim.count(CommandCode::MifareHalt), 1);
    assert_eq!(sim.blocks_read().len(), 70);
    assert_eq!(cb.error_count(), 0);
}

#[test]
fn reset_token_allows_next_cycle() {
    let sim = SimulatedReader::with_card(CardType::Classic1K, 1);
    let mut cb = RecordingCallback::new();
    let mut reader = common::open_reader(&sim, &mut cb);
    let token = reader.cancel_token();

    token.cancel();
    assert!(matches!(reader.run_once(), CycleOutcome::Cancelled));
    token.reset();
    assert!(matches!(reader.run_once(), CycleOutcome::Completed(_)));
}

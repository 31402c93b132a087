#[path = "../common/mod.rs"]
mod common;

use er301::Error;
use er301::protocol::CommandCode;
use er301::reader::{CycleOutcome, ReaderState};
use er301::test_support::{Event, RecordingCallback, SimulatedReader};
use er301::types::{CardType, SectorKey};

#[test]
fn run_loop_survives_corrupted_read() {
    let sim = SimulatedReader::with_card(CardType::Classic1K, 1);
    sim.state().corrupt_read = Some(5);
    let mut cb = RecordingCallback::new();
    let mut reader = common::open_reader(&sim, &mut cb);
    // 6 reads in the broken cycle, 64 in the next; stop once that one ends
    sim.state().cancel_after_reads = Some((6 + 64, reader.cancel_token()));

    reader.run().expect("per-card failures do not end the loop");
    drop(reader);

    assert_eq!(cb.error_count(), 1);
    assert_eq!(cb.successes().len(), 1);
    assert_eq!(sim.blocks_read().len(), 70);
    assert_eq!(sim.count(CommandCode::MifareHalt), 1);
    assert!(cb.statuses().iter().any(|s| s.starts_with("checksum mismatch")));

    // the failed cycle delivered blocks 0..5 before the error
    let error_at = cb
        .events
        .iter()
        .position(|e| *e == Event::Error)
        .expect("error event");
    let before: Vec<usize> = cb.events[..error_at]
        .iter()
        .filter_map(|e| match e {
            Event::Block(i, _) => Some(*i),
            _ => None,
        })
        .collect();
    assert_eq!(before, vec![0, 1, 2, 3, 4]);
}

#[test]
fn failed_cycle_returns_to_detection() {
    let sim = SimulatedReader::with_card(CardType::Classic1K, 1);
    sim.state().key_a.insert(0, SectorKey::from_bytes([0x11; 6]));
    let mut cb = RecordingCallback::new();
    let mut reader = common::open_reader(&sim, &mut cb);

    assert!(matches!(reader.run_once(), CycleOutcome::Failed(Error::Auth { .. })));
    assert_eq!(reader.state(), ReaderState::Detecting);

    // the card gets its default key back and the next cycle reads it
    sim.state().key_a.clear();
    assert!(matches!(reader.run_once(), CycleOutcome::Completed(_)));
    assert_eq!(reader.state(), ReaderState::Success);
}

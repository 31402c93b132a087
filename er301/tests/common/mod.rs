// Shared helpers for the integration test crates.
#![allow(dead_code, unused_imports)]

pub mod fixtures;

use er301::config::ReaderConfig;
use er301::device::{Device, Initialized};
use er301::transport::mock::MockTransport;
use er301::reader::MifareReader;
use er301::test_support::{RecordingCallback, SimulatedReader, fast_config};

/// Queue an OK INIT_PORT reply followed by `frames` on a MockTransport.
pub fn seed_init_and_frames(mock: &mut MockTransport, frames: Vec<Vec<u8>>) {
    mock.push_response(fixtures::init_ok_frame());
    for f in frames {
        mock.push_response(f);
    }
}

/// An initialized device answering with `frames` after bring-up.
pub fn initialized_mock_device(frames: Vec<Vec<u8>>) -> Device<Initialized> {
    let mut mock = MockTransport::new();
    seed_init_and_frames(&mut mock, frames);
    Device::new_with_transport(Box::new(mock), config())
        .initialize()
        .expect("mock bring-up")
}

pub fn config() -> ReaderConfig {
    fast_config()
}

/// Bring up a read engine on a simulated reader.
pub fn open_reader<'a>(
    sim: &SimulatedReader,
    callback: &'a mut RecordingCallback,
) -> MifareReader<&'a mut RecordingCallback> {
    MifareReader::open(sim.boxed(), callback, config()).expect("simulated bring-up")
}

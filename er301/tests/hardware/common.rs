#![cfg(feature = "serial")]

//! 共通: 実機テスト用ヘルパー
//!
//! The reader's port is taken from `ER301_PORT`. Without it the helpers
//! return `Ok(None)` so the tests pass on machines without a reader.

use er301::config::ReaderConfig;
use er301::device::{Device, Initialized};
use er301::transport::{SerialSettings, SerialTransport};
use er301::Result;

pub const PORT_VAR: &str = "ER301_PORT";

pub fn port() -> Option<String> {
    std::env::var(PORT_VAR).ok().filter(|p| !p.is_empty())
}

/// Open the configured port and bring the reader up.
pub fn open_and_initialize_device() -> Result<Option<Device<Initialized>>> {
    let Some(path) = port() else {
        return Ok(None);
    };
    let transport = SerialTransport::open(&path, &SerialSettings::default())?;
    let device = Device::new_with_transport(Box::new(transport), ReaderConfig::default());
    Ok(Some(device.initialize()?))
}

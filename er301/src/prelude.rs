// er301-rs/er301/src/prelude.rs

pub use crate::card::{Card, CardReadout};
pub use crate::config::ReaderConfig;
pub use crate::device::{Device, DeviceBuilder, Initialized, Uninitialized};
pub use crate::protocol::{Command, CommandCode, Reply, Response, ResponseCode};
pub use crate::reader::{CancelToken, CycleOutcome, MifareReader, ReadCallback, ReaderState};
pub use crate::transport::{MockTransport, Transport};
#[cfg(feature = "serial")]
pub use crate::transport::{SerialSettings, SerialTransport};
pub use crate::{
    AuthMode, BaudRate, BeepDuration, BlockData, CardType, Error, LedColor, NodeId, RequestCode,
    Result, SectorKey, SerialNumber,
};

pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, ms, parse_hex, parse_key};

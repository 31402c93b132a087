// er301-rs/er301/src/error.rs

use thiserror::Error;

use crate::protocol::codes::{CommandCode, ResponseCode};
use crate::types::{AuthMode, SectorKey, SerialNumber};

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// Port could not be opened or the reader never answered bring-up.
    /// Fatal to the whole engine instance.
    #[error("connection error: {0}")]
    Connection(String),

    // serialport はオプション依存なので feature で切り替える
    /// The serial port reported an error
    #[cfg(feature = "serial")]
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// I/O on the transport failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// `expected` is the value computed over the received bytes, `actual`
    /// the checksum byte carried by the frame.
    #[error("checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    ChecksumMismatch {
        /// Computed checksum
        expected: u8,
        /// Checksum byte in the frame
        actual: u8,
    },

    /// A frame or payload ended before the expected byte count
    #[error("frame too short: expected at least {expected} bytes, got {actual}")]
    FrameTooShort {
        /// Minimum length needed
        expected: usize,
        /// Bytes present
        actual: usize,
    },

    /// Bad magic, bad escape sequence or a malformed value
    #[error("frame format error: {0}")]
    FrameFormat(String),

    /// Command code outside the ER301 table
    #[error("unknown command code {0:#06x}")]
    UnknownCommand(u16),

    /// The reply belongs to a different command
    #[error("reply echoes {actual} while {expected} was sent")]
    UnexpectedCommand {
        /// Command sent
        expected: CommandCode,
        /// Command echoed
        actual: CommandCode,
    },

    /// A typed operation got a non-OK response code
    #[error("{command} failed: {code}")]
    Response {
        /// Command sent
        command: CommandCode,
        /// Code the reader answered
        code: ResponseCode,
    },

    /// The reader rejected the key for a sector
    #[error("failed to authorize sector {sector} with {mode} {key}: {code}")]
    Auth {
        /// Sector being authorized
        sector: usize,
        /// Key kind used
        mode: AuthMode,
        /// Key tried
        key: SectorKey,
        /// Code the reader answered
        code: ResponseCode,
    },

    /// The card did not accept SELECT
    #[error("failed to select card {serial}: {code}")]
    Select {
        /// Card serial
        serial: SerialNumber,
        /// Code the reader answered
        code: ResponseCode,
    },

    /// The host has no key of this kind for the sector
    #[error("no {mode} available for sector {sector}")]
    KeyUnavailable {
        /// Sector needing the key
        sector: usize,
        /// Key kind requested
        mode: AuthMode,
    },

    /// The host enabled neither key A nor key B
    #[error("neither key A nor key B authentication is enabled")]
    NoAuthMode,

    /// The cancel token was set
    #[error("reading of card interrupted by user")]
    Cancelled,

    /// No whole reply arrived within the response timeout
    #[error("no reply to {command} within {waited_ms} ms")]
    Timeout {
        /// Command awaiting a reply
        command: CommandCode,
        /// Time waited
        waited_ms: u64,
    },
}

impl Error {
    /// Only a failed bring-up ends the engine; everything else is scoped to
    /// one exchange or one card cycle.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Connection(_))
    }
}

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, Error>;

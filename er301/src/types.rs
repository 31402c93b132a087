// er301-rs/er301/src/types.rs

use std::convert::TryFrom;
use std::fmt;

use derive_more::Display;

use crate::Error;
use crate::constants::{BLOCK_SIZE, KEY_LEN, NODE_BROADCAST};

/// Protocol-level reader address (2 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(u16);

impl NodeId {
    /// Node id every reader answers to
    pub const BROADCAST: Self = Self(NODE_BROADCAST);

    /// Node id from its numeric value
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Numeric node id
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Node id in wire byte order
    pub fn to_le_bytes(&self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::BROADCAST
    }
}

/// Card serial number as returned by anticollision (4 バイト).
///
/// The value is kept in wire order, i.e. the little-endian reading of the
/// four bytes the reader sends. `select` must be sent this exact value;
/// hosts are shown the byte-reversed [`SerialNumber::reported`] form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SerialNumber(u32);

impl SerialNumber {
    /// Serial as decoded from anticollision bytes (little-endian)
    pub const fn from_wire(value: u32) -> Self {
        Self(value)
    }

    /// Serial from the four anticollision bytes
    pub fn from_wire_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }

    /// Value in wire order
    pub fn wire(&self) -> u32 {
        self.0
    }

    /// Bytes as SELECT expects them
    pub fn to_wire_bytes(&self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// Serial number in natural numeric order, as displayed and reported.
    pub fn reported(&self) -> u32 {
        self.0.swap_bytes()
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reported())
    }
}

/// Mifare sector key (6 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectorKey([u8; KEY_LEN]);

impl SectorKey {
    /// Factory default transport key
    pub const DEFAULT: Self = Self([0xff; KEY_LEN]);

    /// Key from its six bytes
    pub const fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// The six key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Display for SectorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::utils::bytes_to_hex(&self.0))
    }
}

impl TryFrom<&[u8]> for SectorKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; KEY_LEN] = bytes.try_into().map_err(|_| {
            Error::FrameFormat(format!(
                "sector key must be {} bytes, got {}",
                KEY_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }
}

/// BlockData (16 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockData([u8; BLOCK_SIZE]);

impl BlockData {
    /// Block from its sixteen bytes
    pub fn from_bytes(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }

    /// The sixteen block bytes
    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }

    /// Mutable access to the block bytes
    pub fn as_bytes_mut(&mut self) -> &mut [u8; BLOCK_SIZE] {
        &mut self.0
    }

    /// Lowercase hex without separators
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_spaced(self.as_bytes())
    }

    /// Printable ASCII, other bytes shown as `.`
    pub fn to_ascii_safe(&self) -> String {
        self.0
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                }
            })
            .collect()
    }
}

impl TryFrom<&[u8]> for BlockData {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() < BLOCK_SIZE {
            return Err(Error::FrameTooShort {
                expected: BLOCK_SIZE,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; BLOCK_SIZE];
        arr.copy_from_slice(&bytes[..BLOCK_SIZE]);
        Ok(Self(arr))
    }
}

/// Mifare card family reported by the request command
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardType {
    /// Mifare Ultralight
    #[display(fmt = "Ultralight")]
    Ultralight,
    /// 16 sectors of 4 blocks
    #[display(fmt = "Mifare Classic 1K (S50)")]
    Classic1K,
    /// 40 sectors: 32 of 4 blocks followed by 8 of 16 blocks
    #[display(fmt = "Mifare Classic 4K (S70)")]
    Classic4K,
    /// Mifare DESFire
    #[display(fmt = "DESFire")]
    Desfire,
    /// Mifare Pro
    #[display(fmt = "Mifare Pro")]
    Pro,
    /// Mifare ProX
    #[display(fmt = "Mifare ProX")]
    ProX,
    /// Type code outside the table; read as 64 blocks
    #[display(fmt = "unknown card type {:#06x}", _0)]
    Unknown(u16),
}

impl CardType {
    /// Map the two-byte type code of a request reply
    pub fn from_u16(code: u16) -> Self {
        match code {
            0x0044 => Self::Ultralight,
            0x0004 => Self::Classic1K,
            0x0002 => Self::Classic4K,
            0x0344 => Self::Desfire,
            0x0008 => Self::Pro,
            0x0304 => Self::ProX,
            other => Self::Unknown(other),
        }
    }

    /// Two-byte type code
    pub fn as_u16(&self) -> u16 {
        match self {
            Self::Ultralight => 0x0044,
            Self::Classic1K => 0x0004,
            Self::Classic4K => 0x0002,
            Self::Desfire => 0x0344,
            Self::Pro => 0x0008,
            Self::ProX => 0x0304,
            Self::Unknown(v) => *v,
        }
    }

    /// Number of addressable 16-byte blocks read from this card.
    pub fn block_count(&self) -> usize {
        crate::card::addressing::block_count(*self)
    }
}

/// Key slot used for sector authentication
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AuthMode {
    /// Authenticate with key A
    #[display(fmt = "key A")]
    KeyA = 0x60,
    /// Authenticate with key B
    #[display(fmt = "key B")]
    KeyB = 0x61,
}

/// LED state of the reader
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum LedColor {
    /// LED off
    #[display(fmt = "off")]
    Off = 0x00,
    /// LED blue
    #[display(fmt = "blue")]
    Blue = 0x01,
    /// LED red
    #[display(fmt = "red")]
    Red = 0x02,
}

/// Buzzer duration, sent in units of 10 ms
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum BeepDuration {
    /// Short beep (60ms)
    #[display(fmt = "60ms")]
    Short = 6,
    /// Medium beep (200ms)
    #[display(fmt = "200ms")]
    Medium = 20,
    /// Long beep (600ms)
    #[display(fmt = "600ms")]
    Long = 60,
}

/// Antenna power
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum AntennaStatus {
    /// Field off
    #[display(fmt = "closed")]
    Closed = 0x00,
    /// Field on
    #[display(fmt = "open")]
    Open = 0x01,
}

/// UART speed selector sent with INIT_PORT; the byte is the variant index
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaudRate {
    /// 4800 baud
    #[display(fmt = "4800")]
    Baud4800 = 0,
    /// 9600 baud
    #[display(fmt = "9600")]
    Baud9600 = 1,
    /// 14400 baud
    #[display(fmt = "14400")]
    Baud14400 = 2,
    /// 19200 baud
    #[display(fmt = "19200")]
    Baud19200 = 3,
    /// 28800 baud
    #[display(fmt = "28800")]
    Baud28800 = 4,
    /// 38400 baud
    #[display(fmt = "38400")]
    Baud38400 = 5,
    /// 57600 baud
    #[display(fmt = "57600")]
    Baud57600 = 6,
    /// 115200 baud
    #[display(fmt = "115200")]
    Baud115200 = 7,
}

impl BaudRate {
    /// Line speed this selector stands for
    pub fn bits_per_second(&self) -> u32 {
        match self {
            Self::Baud4800 => 4_800,
            Self::Baud9600 => 9_600,
            Self::Baud14400 => 14_400,
            Self::Baud19200 => 19_200,
            Self::Baud28800 => 28_800,
            Self::Baud38400 => 38_400,
            Self::Baud57600 => 57_600,
            Self::Baud115200 => 115_200,
        }
    }
}

impl Default for BaudRate {
    fn default() -> Self {
        BaudRate::Baud115200
    }
}

/// Request code for card detection
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RequestCode {
    /// Halted cards do not answer
    #[display(fmt = "IDLE_CARD")]
    IdleCard = 0x26,
    /// Wakes halted cards as well
    #[display(fmt = "ALL_TYPE_A")]
    AllTypeA = 0x52,
}

impl Default for RequestCode {
    fn default() -> Self {
        RequestCode::AllTypeA
    }
}

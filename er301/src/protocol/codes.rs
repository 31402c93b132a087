// er301-rs/er301/src/protocol/codes.rs
//! Command and response code tables of the ER301 protocol.

use derive_more::Display;

use crate::Error;

/// Two-byte command codes. The reader echoes the code in its reply.
#[repr(u16)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandCode {
    /// Open the link at a baud rate
    #[display(fmt = "INIT_PORT")]
    InitPort = 0x0101,
    /// Store a node id in the reader
    #[display(fmt = "SET_DEVICE_NODE_NO")]
    SetDeviceNodeNumber = 0x0102,
    /// Query the stored node id
    #[display(fmt = "GET_DEVICE_NODE_NO")]
    GetDeviceNodeNumber = 0x0103,
    /// Query the reader name
    #[display(fmt = "READ_DEVICE_MODE")]
    ReadDeviceMode = 0x0104,
    /// Sound the buzzer
    #[display(fmt = "SET_BUZZER_BEEP")]
    SetBuzzerBeep = 0x0106,
    /// Switch the LED
    #[display(fmt = "SET_LED_COLOR")]
    SetLedColor = 0x0107,
    /// Switch the RF field
    #[display(fmt = "SET_ANTENNA_STATUS")]
    SetAntennaStatus = 0x010c,
    /// Look for a card in the field
    #[display(fmt = "MIFARE_REQUEST")]
    MifareRequest = 0x0201,
    /// Fetch the serial of a card in the field
    #[display(fmt = "MIFARE_ANTICOLLISION")]
    MifareAnticollision = 0x0202,
    /// Activate a card by serial
    #[display(fmt = "MIFARE_SELECT")]
    MifareSelect = 0x0203,
    /// Put the active card to sleep
    #[display(fmt = "MIFARE_HLTA")]
    MifareHalt = 0x0204,
    /// Open a sector with a key
    #[display(fmt = "MIFARE_AUTHENTICATION2")]
    MifareAuthenticate = 0x0207,
    /// Read a block
    #[display(fmt = "MIFARE_READ")]
    MifareRead = 0x0208,
    /// Write a block
    #[display(fmt = "MIFARE_WRITE")]
    MifareWrite = 0x0209,
    /// Format a block as a value block
    #[display(fmt = "MIFARE_INITVAL")]
    MifareInitValue = 0x020a,
    /// Read a value block
    #[display(fmt = "MIFARE_READBALANCE")]
    MifareReadBalance = 0x020b,
    /// Subtract from a value block
    #[display(fmt = "MIFARE_DECREMENT")]
    MifareDecrement = 0x020c,
    /// Add to a value block
    #[display(fmt = "MIFARE_INCREMENT")]
    MifareIncrement = 0x020d,
}

impl CommandCode {
    /// Every command code, in table order
    pub const ALL: [CommandCode; 18] = [
        Self::InitPort,
        Self::SetDeviceNodeNumber,
        Self::GetDeviceNodeNumber,
        Self::ReadDeviceMode,
        Self::SetBuzzerBeep,
        Self::SetLedColor,
        Self::SetAntennaStatus,
        Self::MifareRequest,
        Self::MifareAnticollision,
        Self::MifareSelect,
        Self::MifareHalt,
        Self::MifareAuthenticate,
        Self::MifareRead,
        Self::MifareWrite,
        Self::MifareInitValue,
        Self::MifareReadBalance,
        Self::MifareDecrement,
        Self::MifareIncrement,
    ];

    /// Code as sent on the wire
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Code in wire byte order
    pub fn to_le_bytes(self) -> [u8; 2] {
        self.as_u16().to_le_bytes()
    }
}

impl TryFrom<u16> for CommandCode {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_u16() == value)
            .ok_or(Error::UnknownCommand(value))
    }
}

/// Single-byte status carried by every reply.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    /// Command succeeded
    #[display(fmt = "OK")]
    Ok,
    /// Unsupported baud rate
    #[display(fmt = "ERR_BAUD_RATE")]
    BaudRate,
    /// Port disconnected
    #[display(fmt = "ERR_PORT_DISCONNECT")]
    PortDisconnect,
    /// Unspecified failure
    #[display(fmt = "ERR_GENERAL")]
    General,
    /// Command not defined for this reader
    #[display(fmt = "ERR_UNDEFINED")]
    Undefined,
    /// Bad command parameter
    #[display(fmt = "ERR_COMMAND_PARAMETER")]
    CommandParameter,
    /// No card in the field
    #[display(fmt = "ERR_NO_CARD")]
    NoCard,
    /// REQA/WUPA failed
    #[display(fmt = "ERR_REQUEST_FAILURE")]
    RequestFailure,
    /// Card reset failed
    #[display(fmt = "ERR_RESET_FAILURE")]
    ResetFailure,
    /// Key rejected
    #[display(fmt = "ERR_AUTH_FAILURE")]
    AuthFailure,
    /// Block read failed
    #[display(fmt = "ERR_READ_BLOCK_FAILURE")]
    ReadBlockFailure,
    /// Block write failed
    #[display(fmt = "ERR_WRITE_BLOCK_FAILURE")]
    WriteBlockFailure,
    /// Write address rejected
    #[display(fmt = "ERR_WRITE_ADDRESS_FAILURE")]
    WriteAddressFailure,
    /// Write address rejected (second stage)
    #[display(fmt = "ERR_WRITE_ADDRESS_FAILURE2")]
    WriteAddressFailure2,
    /// Code outside the table
    #[display(fmt = "unknown response code {:#04x}", _0)]
    Unknown(u8),
}

impl ResponseCode {
    /// Map a wire byte; unlisted values become [`ResponseCode::Unknown`]
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Ok,
            1 => Self::BaudRate,
            2 => Self::PortDisconnect,
            10 => Self::General,
            11 => Self::Undefined,
            12 => Self::CommandParameter,
            13 => Self::NoCard,
            20 => Self::RequestFailure,
            21 => Self::ResetFailure,
            22 => Self::AuthFailure,
            23 => Self::ReadBlockFailure,
            24 => Self::WriteBlockFailure,
            25 => Self::WriteAddressFailure,
            26 => Self::WriteAddressFailure2,
            other => Self::Unknown(other),
        }
    }

    /// Byte as sent on the wire
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::BaudRate => 1,
            Self::PortDisconnect => 2,
            Self::General => 10,
            Self::Undefined => 11,
            Self::CommandParameter => 12,
            Self::NoCard => 13,
            Self::RequestFailure => 20,
            Self::ResetFailure => 21,
            Self::AuthFailure => 22,
            Self::ReadBlockFailure => 23,
            Self::WriteBlockFailure => 24,
            Self::WriteAddressFailure => 25,
            Self::WriteAddressFailure2 => 26,
            Self::Unknown(v) => v,
        }
    }

    /// True for [`ResponseCode::Ok`]
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

impl From<u8> for ResponseCode {
    fn from(value: u8) -> Self {
        Self::from_u8(value)
    }
}

// er301-rs/er301/src/protocol/commands/mod.rs

/// Payload encoders for card commands
pub mod mifare;
/// Payload encoders for reader commands
pub mod system;

pub use mifare::{
    encode_authenticate, encode_block, encode_request, encode_select, encode_value, encode_write,
};
pub use system::{encode_antenna, encode_beep, encode_init_port, encode_led, encode_set_node_number};

use crate::protocol::codes::CommandCode;
use crate::types::{
    AntennaStatus, AuthMode, BaudRate, BeepDuration, BlockData, LedColor, NodeId, RequestCode,
    SectorKey, SerialNumber,
};

/// High-level Command enum. New commands should be added here and
/// their parameter encoder placed in `protocol::commands::<area>.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the link at `baud`
    InitPort {
        /// Link speed
        baud: BaudRate,
    },
    /// Store `node` as the reader node id
    SetNodeNumber {
        /// Node id
        node: NodeId,
    },
    /// Query the node id
    GetNodeNumber,
    /// Query the reader name
    ReadDeviceMode,
    /// Sound the buzzer
    Beep {
        /// Beep length
        duration: BeepDuration,
    },
    /// Switch the LED
    SetLed {
        /// LED state
        color: LedColor,
    },
    /// Switch the RF field
    SetAntenna {
        /// Field state
        status: AntennaStatus,
    },
    /// Look for a card
    Request {
        /// Request mode
        code: RequestCode,
    },
    /// Fetch the serial of the card in the field
    Anticollision,
    /// Activate the card with `serial`
    Select {
        /// Card serial
        serial: SerialNumber,
    },
    /// Put the active card to sleep
    Halt,
    /// Open the sector holding `block` with `key`
    Authenticate {
        /// Key kind
        mode: AuthMode,
        /// Any block of the sector
        block: u8,
        /// Sector key
        key: SectorKey,
    },
    /// Read one block
    Read {
        /// Absolute block number
        block: u8,
    },
    /// Write one block
    Write {
        /// Absolute block number
        block: u8,
        /// Block contents
        data: BlockData,
    },
    /// Format `block` as a value block holding `value`
    InitValue {
        /// Absolute block number
        block: u8,
        /// Amount
        value: i32,
    },
    /// Read a value block
    ReadBalance {
        /// Absolute block number
        block: u8,
    },
    /// Subtract `value` from a value block
    Decrement {
        /// Absolute block number
        block: u8,
        /// Amount
        value: u32,
    },
    /// Add `value` to a value block
    Increment {
        /// Absolute block number
        block: u8,
        /// Amount
        value: u32,
    },
}

impl Command {
    /// Return the command code as defined by the ER301 protocol.
    pub fn command_code(&self) -> CommandCode {
        match self {
            Self::InitPort { .. } => CommandCode::InitPort,
            Self::SetNodeNumber { .. } => CommandCode::SetDeviceNodeNumber,
            Self::GetNodeNumber => CommandCode::GetDeviceNodeNumber,
            Self::ReadDeviceMode => CommandCode::ReadDeviceMode,
            Self::Beep { .. } => CommandCode::SetBuzzerBeep,
            Self::SetLed { .. } => CommandCode::SetLedColor,
            Self::SetAntenna { .. } => CommandCode::SetAntennaStatus,
            Self::Request { .. } => CommandCode::MifareRequest,
            Self::Anticollision => CommandCode::MifareAnticollision,
            Self::Select { .. } => CommandCode::MifareSelect,
            Self::Halt => CommandCode::MifareHalt,
            Self::Authenticate { .. } => CommandCode::MifareAuthenticate,
            Self::Read { .. } => CommandCode::MifareRead,
            Self::Write { .. } => CommandCode::MifareWrite,
            Self::InitValue { .. } => CommandCode::MifareInitValue,
            Self::ReadBalance { .. } => CommandCode::MifareReadBalance,
            Self::Decrement { .. } => CommandCode::MifareDecrement,
            Self::Increment { .. } => CommandCode::MifareIncrement,
        }
    }

    /// Encode the command parameters (the bytes following the command code).
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::InitPort { baud } => encode_init_port(*baud),
            Self::SetNodeNumber { node } => encode_set_node_number(*node),
            Self::GetNodeNumber
            | Self::ReadDeviceMode
            | Self::Anticollision
            | Self::Halt => Vec::new(),
            Self::Beep { duration } => encode_beep(*duration),
            Self::SetLed { color } => encode_led(*color),
            Self::SetAntenna { status } => encode_antenna(*status),
            Self::Request { code } => encode_request(*code),
            Self::Select { serial } => encode_select(*serial),
            Self::Authenticate { mode, block, key } => encode_authenticate(*mode, *block, key),
            Self::Read { block } | Self::ReadBalance { block } => encode_block(*block),
            Self::Write { block, data } => encode_write(*block, data),
            Self::InitValue { block, value } => encode_value(*block, value.to_le_bytes()),
            Self::Decrement { block, value } | Self::Increment { block, value } => {
                encode_value(*block, value.to_le_bytes())
            }
        }
    }
}

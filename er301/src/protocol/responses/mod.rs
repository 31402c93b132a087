// er301-rs/er301/src/protocol/responses/mod.rs

/// Decoders for card command replies
pub mod mifare;
/// Decoders for reader command replies
pub mod system;

pub use mifare::{decode_balance, decode_block, decode_card_type, decode_sak, decode_serial};
pub use system::{decode_device_mode, decode_node_number};

use crate::protocol::codes::{CommandCode, ResponseCode};
use crate::protocol::frame::Frame;
use crate::protocol::parser;
use crate::types::{BlockData, CardType, NodeId, SerialNumber};
use crate::{Error, Result};

/// Fields every reader reply carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHeader {
    /// Node that answered
    pub node_id: NodeId,
    /// Command the reply echoes
    pub command: CommandCode,
    /// Status of the command
    pub code: ResponseCode,
}

/// High-level Response enum. Per-command decoders live in
/// `protocol::responses::<area>.rs` and are dispatched here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Replies without a payload, and every reply with a non-OK code
    Status,
    /// Reader name
    DeviceMode {
        /// Name string
        name: String,
    },
    /// Card family found by a request
    CardType(CardType),
    /// Serial from anticollision, in wire order
    Serial(SerialNumber),
    /// Select acknowledge byte
    Select {
        /// Select acknowledge
        sak: u8,
    },
    /// Block contents
    Block(BlockData),
    /// Stored node id
    NodeNumber(NodeId),
    /// Value block balance
    Balance(i32),
}

/// A decoded reply: header plus typed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Node, echoed command and response code
    pub header: ResponseHeader,
    /// Typed body; [`Response::Status`] for non-OK replies
    pub response: Response,
}

impl Reply {
    /// True when the response code is OK
    pub fn is_ok(&self) -> bool {
        self.header.code.is_ok()
    }

    /// Turn a non-OK reply into [`Error::Response`].
    pub fn ok_or_error(self) -> Result<Self> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(Error::Response {
                command: self.header.command,
                code: self.header.code,
            })
        }
    }
}

impl Response {
    /// Decode a response payload (response code first) for the given
    /// expected command. Payloads of non-OK replies are not inspected.
    pub fn decode(expected: CommandCode, data: &[u8]) -> Result<Self> {
        let code = ResponseCode::from(parser::byte_at(data, 0)?);
        if !code.is_ok() {
            return Ok(Self::Status);
        }

        match expected {
            CommandCode::ReadDeviceMode => Ok(Self::DeviceMode {
                name: decode_device_mode(data)?,
            }),
            CommandCode::GetDeviceNodeNumber => Ok(Self::NodeNumber(decode_node_number(data)?)),
            CommandCode::MifareRequest => Ok(Self::CardType(decode_card_type(data)?)),
            CommandCode::MifareAnticollision => Ok(Self::Serial(decode_serial(data)?)),
            CommandCode::MifareSelect => Ok(Self::Select {
                sak: decode_sak(data)?,
            }),
            CommandCode::MifareRead => Ok(Self::Block(decode_block(data)?)),
            CommandCode::MifareReadBalance => Ok(Self::Balance(decode_balance(data)?)),
            _ => Ok(Self::Status),
        }
    }
}

/// Decode a full reply for `expected`, checking the echoed command.
pub fn decode_reply(expected: CommandCode, frame: &Frame) -> Result<Reply> {
    let actual = frame.command_code()?;
    if actual != expected {
        return Err(Error::UnexpectedCommand { expected, actual });
    }
    let code = ResponseCode::from(parser::byte_at(&frame.data, 0)?);
    let response = Response::decode(expected, &frame.data)?;
    Ok(Reply {
        header: ResponseHeader {
            node_id: frame.node_id,
            command: actual,
            code,
        },
        response,
    })
}

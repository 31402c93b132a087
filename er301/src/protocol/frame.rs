// er301-rs/er301/src/protocol/frame.rs

use crate::constants::{
    COMMAND_OFFSET, ESCAPE_BYTE, ESCAPE_FILL, FRAME_HEADER_LEN, LENGTH_OVERHEAD, MAGIC_BYTES,
    MIN_RESPONSE_LEN, NODE_ID_OFFSET, RESPONSE_CODE_OFFSET,
};
use crate::protocol::checksum::{checksum, xor};
use crate::protocol::codes::CommandCode;
use crate::protocol::parser;
use crate::types::NodeId;
use crate::{Error, Result};

/// ER301 frame helper. Provides encode/decode of the wire frame
/// Format: [Magic(2)] [Len(2)] [NodeId(2)] [Command(2)] [Data(n)] [XOR(1)]
/// Magic: 0xAA 0xBB
///
/// Host frames stuff every 0xAA inside NodeId..Data as 0xAA 0x00 and the
/// XOR covers the stuffed bytes. Reader frames are taken as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Addressed or answering node
    pub node_id: NodeId,
    /// Raw command code; see [`Frame::command_code`]
    pub command: u16,
    /// Command parameters for host frames; response code followed by the
    /// response payload for reader frames.
    pub data: Vec<u8>,
}

impl Frame {
    /// Host frame for `command`
    pub fn new(node_id: NodeId, command: CommandCode, data: &[u8]) -> Self {
        Self {
            node_id,
            command: command.as_u16(),
            data: data.to_vec(),
        }
    }

    /// Encode a host frame. The length field counts the unescaped bytes.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let declared = self.data.len() + LENGTH_OVERHEAD;
        if declared > u16::MAX as usize {
            return Err(Error::FrameFormat(format!(
                "payload of {} bytes does not fit the length field",
                self.data.len()
            )));
        }

        let mut body = Vec::with_capacity(4 + self.data.len());
        body.extend_from_slice(&self.node_id.to_le_bytes());
        body.extend_from_slice(&self.command.to_le_bytes());
        body.extend_from_slice(&self.data);
        let escaped = escape(&body);

        let mut out = Vec::with_capacity(FRAME_HEADER_LEN + escaped.len() + 1);
        out.extend_from_slice(&MAGIC_BYTES);
        out.extend_from_slice(&(declared as u16).to_le_bytes());
        out.extend_from_slice(&escaped);
        out.push(xor(&escaped));
        Ok(out)
    }

    /// Decode a frame received from the reader.
    ///
    /// The checksum byte sits at `4 + length` and covers `[4, 4 + length)`.
    /// Bytes after the checksum are ignored.
    pub fn decode_response(frame: &[u8]) -> Result<Frame> {
        let length = declared_len(frame)?;
        let data_end = FRAME_HEADER_LEN + length;
        if data_end < MIN_RESPONSE_LEN || frame.len() <= data_end {
            return Err(Error::FrameTooShort {
                expected: (data_end + 1).max(MIN_RESPONSE_LEN + 1),
                actual: frame.len(),
            });
        }
        let received = frame[data_end];

        let computed = checksum(frame, NODE_ID_OFFSET, data_end);
        if computed != received {
            return Err(Error::ChecksumMismatch {
                expected: computed,
                actual: received,
            });
        }

        Ok(Frame {
            node_id: NodeId::new(parser::le_u16_at(frame, NODE_ID_OFFSET)?),
            command: parser::le_u16_at(frame, COMMAND_OFFSET)?,
            data: frame[RESPONSE_CODE_OFFSET..data_end].to_vec(),
        })
    }

    /// Decode a host frame (as produced by [`Frame::encode`]), undoing the
    /// byte stuffing. Used by fake readers and for inspecting sent traffic.
    pub fn decode_command(frame: &[u8]) -> Result<Frame> {
        let length = declared_len(frame)?;
        // node(2) + command(2) + checksum(1)
        if frame.len() < FRAME_HEADER_LEN + LENGTH_OVERHEAD {
            return Err(Error::FrameTooShort {
                expected: FRAME_HEADER_LEN + LENGTH_OVERHEAD,
                actual: frame.len(),
            });
        }

        let checksum_at = frame.len() - 1;
        let escaped = &frame[FRAME_HEADER_LEN..checksum_at];
        let received = frame[checksum_at];
        let computed = xor(escaped);
        if computed != received {
            return Err(Error::ChecksumMismatch {
                expected: computed,
                actual: received,
            });
        }

        let body = unescape(escaped)?;
        if body.len() + 1 != length {
            return Err(Error::FrameFormat(format!(
                "length field says {} but frame carries {} bytes",
                length,
                body.len() + 1
            )));
        }

        Ok(Frame {
            node_id: NodeId::new(parser::le_u16_at(&body, 0)?),
            command: parser::le_u16_at(&body, 2)?,
            data: body[4..].to_vec(),
        })
    }

    /// Typed command code, if the frame carries a known one
    pub fn command_code(&self) -> Result<CommandCode> {
        CommandCode::try_from(self.command)
    }
}

/// Read and validate magic + length of a frame.
pub fn declared_len(frame: &[u8]) -> Result<usize> {
    if frame.len() < FRAME_HEADER_LEN {
        return Err(Error::FrameTooShort {
            expected: FRAME_HEADER_LEN,
            actual: frame.len(),
        });
    }
    if frame[..2] != MAGIC_BYTES {
        return Err(Error::FrameFormat(format!(
            "invalid magic {:02x} {:02x}",
            frame[0], frame[1]
        )));
    }
    Ok(parser::le_u16_at(frame, 2)? as usize)
}

/// Size of a reader frame on the wire: header, declared region and the
/// trailing checksum byte.
pub fn response_len(frame: &[u8]) -> Result<usize> {
    Ok(FRAME_HEADER_LEN + declared_len(frame)? + 1)
}

/// True once the buffer holds a whole reader frame, checksum included.
/// Buffers with a broken header are reported complete so the decoder can
/// surface the error instead of waiting for more bytes.
pub fn is_complete(buf: &[u8]) -> bool {
    match response_len(buf) {
        Ok(len) => buf.len() >= len,
        Err(Error::FrameTooShort { .. }) => false,
        Err(_) => true,
    }
}

/// Replace every escape byte by the two-byte escape sequence.
pub fn escape(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() + 4);
    for &b in bytes {
        out.push(b);
        if b == ESCAPE_BYTE {
            out.push(ESCAPE_FILL);
        }
    }
    out
}

/// Inverse of [`escape`]. A dangling or malformed escape sequence is a
/// format error.
pub fn unescape(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut iter = bytes.iter().copied();
    while let Some(b) = iter.next() {
        out.push(b);
        if b == ESCAPE_BYTE {
            match iter.next() {
                Some(ESCAPE_FILL) => {}
                other => {
                    return Err(Error::FrameFormat(format!(
                        "bad escape sequence after 0xaa: {:02x?}",
                        other
                    )));
                }
            }
        }
    }
    Ok(out)
}

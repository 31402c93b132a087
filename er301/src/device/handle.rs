// er301-rs/er301/src/device/handle.rs

use std::marker::PhantomData;

use log::{debug, info, trace};

use crate::card::addressing::sector_of;
use crate::config::ReaderConfig;
use crate::constants::{COMMAND_OFFSET, MAX_FRAME_LEN};
use crate::protocol::codec;
use crate::protocol::frame::{is_complete, response_len};
use crate::protocol::parser;
use crate::protocol::{Command, CommandCode, Reply, Response};
use crate::transport::Transport;
use crate::types::{
    AntennaStatus, AuthMode, BeepDuration, BlockData, CardType, LedColor, NodeId, RequestCode,
    SectorKey, SerialNumber,
};
use crate::utils::{Deadline, bytes_to_hex_spaced, pause};
use crate::{Error, Result};

/// Marker: only INIT_PORT may be sent
pub struct Uninitialized;
/// Marker: INIT_PORT was answered with OK
pub struct Initialized;

/// Device handle that enforces initialization state at compile time.
///
/// Only INIT_PORT can be sent before [`Device::initialize`] succeeds.
pub struct Device<State = Uninitialized> {
    transport: Box<dyn Transport>,
    config: ReaderConfig,
    _state: PhantomData<State>,
}

impl<S> Device<S> {
    /// Settings this device runs with
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Node id put into every request
    pub fn node(&self) -> NodeId {
        self.config.node
    }

    /// Name of the underlying transport, for messages
    pub fn transport_name(&self) -> String {
        self.transport.name()
    }

    /// Collect the reply to `command`. Polls `bytes_available` every poll
    /// interval until a whole frame (checksum included) is buffered or the
    /// response timeout runs out. Frames echoing another command are late
    /// replies to an earlier exchange and are dropped.
    fn read_frame(&mut self, command: CommandCode) -> Result<Vec<u8>> {
        let deadline = Deadline::after(self.config.response_timeout);
        let mut buf = Vec::with_capacity(MAX_FRAME_LEN);
        loop {
            let available = self.transport.bytes_available()?;
            if available > 0 {
                let chunk = self.transport.receive(available.min(MAX_FRAME_LEN))?;
                buf.extend_from_slice(&chunk);
                while is_complete(&buf) {
                    let Ok(len) = response_len(&buf) else {
                        // broken header: the decoder reports it
                        trace!("<- {}", bytes_to_hex_spaced(&buf));
                        return Ok(buf);
                    };
                    let frame: Vec<u8> = buf.drain(..len).collect();
                    trace!("<- {}", bytes_to_hex_spaced(&frame));
                    if echoed_command(&frame) == Some(command.as_u16()) {
                        return Ok(frame);
                    }
                    debug!("dropping stale reply while waiting for {}", command);
                }
            }
            if deadline.expired() {
                return Err(Error::Timeout {
                    command,
                    waited_ms: deadline.elapsed_ms(),
                });
            }
            pause(self.config.poll_interval);
        }
    }

    /// One request/response round trip. Input left over from an earlier
    /// exchange is discarded before the request goes out.
    fn exchange(&mut self, cmd: &Command) -> Result<Reply> {
        let code = cmd.command_code();
        let bytes = codec::encode_command_frame(self.config.node, cmd)?;
        self.transport.clear_input()?;
        trace!("-> {} {}", code, bytes_to_hex_spaced(&bytes));
        self.transport.send(&bytes)?;
        let raw = self.read_frame(code)?;
        codec::decode_response_frame(code, &raw)
    }
}

fn echoed_command(frame: &[u8]) -> Option<u16> {
    parser::le_u16_at(frame, COMMAND_OFFSET).ok()
}

impl Device<Uninitialized> {
    /// Create a Device from an existing Transport instance.
    pub fn new_with_transport(transport: Box<dyn Transport>, config: ReaderConfig) -> Self {
        Self {
            transport,
            config,
            _state: PhantomData,
        }
    }

    /// Send INIT_PORT until the reader answers, then require an OK reply.
    /// Returns an initialized Device on success; any failure here is a
    /// [`Error::Connection`].
    pub fn initialize(mut self) -> Result<Device<Initialized>> {
        let cmd = Command::InitPort {
            baud: self.config.baud_rate,
        };
        let bytes = codec::encode_command_frame(self.config.node, &cmd)?;
        self.transport.clear_input()?;

        let mut answered = false;
        for attempt in 1..=self.config.init_attempts {
            trace!("-> {} {}", CommandCode::InitPort, bytes_to_hex_spaced(&bytes));
            self.transport.send(&bytes)?;
            pause(self.config.init_settle);
            if self.transport.bytes_available()? > 0 {
                answered = true;
                break;
            }
            debug!("INIT_PORT attempt {} unanswered", attempt);
        }
        if !answered {
            return Err(Error::Connection(format!(
                "reader on {} did not answer INIT_PORT after {} attempts",
                self.transport.name(),
                self.config.init_attempts
            )));
        }

        let raw = self.read_frame(CommandCode::InitPort)?;
        let reply = codec::decode_response_frame(CommandCode::InitPort, &raw)?;
        if !reply.is_ok() {
            return Err(Error::Connection(format!(
                "INIT_PORT rejected: {}",
                reply.header.code
            )));
        }
        info!(
            "reader on {} initialized at {} baud",
            self.transport.name(),
            self.config.baud_rate.bits_per_second()
        );

        Ok(Device {
            transport: self.transport,
            config: self.config,
            _state: PhantomData,
        })
    }
}

impl Device<Initialized> {
    /// Execute a command and return the parsed reply, whatever its code.
    pub fn execute(&mut self, cmd: Command) -> Result<Reply> {
        self.exchange(&cmd)
    }

    /// Execute a command and fail with [`Error::Response`] unless it is OK.
    fn execute_ok(&mut self, cmd: Command) -> Result<Response> {
        Ok(self.exchange(&cmd)?.ok_or_error()?.response)
    }

    /// Reader name as reported by READ_DEVICE_MODE
    pub fn read_device_mode(&mut self) -> Result<String> {
        match self.execute_ok(Command::ReadDeviceMode)? {
            Response::DeviceMode { name } => Ok(name),
            other => Err(unexpected(CommandCode::ReadDeviceMode, &other)),
        }
    }

    /// Switch the reader LED
    pub fn set_led(&mut self, color: LedColor) -> Result<()> {
        self.execute_ok(Command::SetLed { color }).map(drop)
    }

    /// Sound the buzzer
    pub fn beep(&mut self, duration: BeepDuration) -> Result<()> {
        self.execute_ok(Command::Beep { duration }).map(drop)
    }

    /// Switch the RF field on or off
    pub fn set_antenna(&mut self, status: AntennaStatus) -> Result<()> {
        self.execute_ok(Command::SetAntenna { status }).map(drop)
    }

    /// Change the reader's node number. The handle keeps addressing the
    /// node it was configured with.
    pub fn set_node_number(&mut self, node: NodeId) -> Result<()> {
        self.execute_ok(Command::SetNodeNumber { node }).map(drop)
    }

    /// Node id stored in the reader
    pub fn get_node_number(&mut self) -> Result<NodeId> {
        match self.execute_ok(Command::GetNodeNumber)? {
            Response::NodeNumber(node) => Ok(node),
            other => Err(unexpected(CommandCode::GetDeviceNodeNumber, &other)),
        }
    }

    /// One detection attempt. `None` when no card answered.
    pub fn request(&mut self, code: RequestCode) -> Result<Option<CardType>> {
        let reply = self.execute(Command::Request { code })?;
        match reply.response {
            Response::CardType(card_type) if reply.header.code.is_ok() => Ok(Some(card_type)),
            _ => Ok(None),
        }
    }

    /// Serial number of the card in the field, in wire order.
    pub fn anticollision(&mut self) -> Result<SerialNumber> {
        match self.execute_ok(Command::Anticollision)? {
            Response::Serial(serial) => Ok(serial),
            other => Err(unexpected(CommandCode::MifareAnticollision, &other)),
        }
    }

    /// Select the card by its wire-order serial. Returns the SAK byte.
    pub fn select(&mut self, serial: SerialNumber) -> Result<u8> {
        let reply = self.execute(Command::Select { serial })?;
        if !reply.is_ok() {
            return Err(Error::Select {
                serial,
                code: reply.header.code,
            });
        }
        match reply.response {
            Response::Select { sak } => Ok(sak),
            other => Err(unexpected(CommandCode::MifareSelect, &other)),
        }
    }

    /// Put the selected card into the halt state
    pub fn halt(&mut self) -> Result<()> {
        self.execute_ok(Command::Halt).map(drop)
    }

    /// Authenticate the sector owning `block`.
    pub fn authenticate(&mut self, mode: AuthMode, block: u8, key: &SectorKey) -> Result<()> {
        let reply = self.execute(Command::Authenticate {
            mode,
            block,
            key: *key,
        })?;
        if !reply.is_ok() {
            return Err(Error::Auth {
                sector: sector_of(block as usize),
                mode,
                key: *key,
                code: reply.header.code,
            });
        }
        Ok(())
    }

    /// Read one block of the authorized sector
    pub fn read_block(&mut self, block: u8) -> Result<BlockData> {
        match self.execute_ok(Command::Read { block })? {
            Response::Block(data) => Ok(data),
            other => Err(unexpected(CommandCode::MifareRead, &other)),
        }
    }

    /// Write one block of the authorized sector
    pub fn write_block(&mut self, block: u8, data: &BlockData) -> Result<()> {
        self.execute_ok(Command::Write { block, data: *data })
            .map(drop)
    }

    /// Format `block` as a value block holding `value`.
    pub fn init_value(&mut self, block: u8, value: i32) -> Result<()> {
        self.execute_ok(Command::InitValue { block, value }).map(drop)
    }

    /// Balance of a value block
    pub fn read_balance(&mut self, block: u8) -> Result<i32> {
        match self.execute_ok(Command::ReadBalance { block })? {
            Response::Balance(value) => Ok(value),
            other => Err(unexpected(CommandCode::MifareReadBalance, &other)),
        }
    }

    /// Add `value` to a value block
    pub fn increment(&mut self, block: u8, value: u32) -> Result<()> {
        self.execute_ok(Command::Increment { block, value }).map(drop)
    }

    /// Subtract `value` from a value block
    pub fn decrement(&mut self, block: u8, value: u32) -> Result<()> {
        self.execute_ok(Command::Decrement { block, value }).map(drop)
    }
}

fn unexpected(command: CommandCode, response: &Response) -> Error {
    Error::FrameFormat(format!("{} answered with {:?}", command, response))
}

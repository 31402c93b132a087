// er301-rs/er301/src/test_support.rs

//! Test support helpers intended for use by unit and integration tests.
//!
//! [`SimulatedReader`] answers every command like an ER301 with one card
//! in the field, so whole read cycles run without hardware.
//! [`RecordingCallback`] records what the engine reports.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use crate::card::addressing::{block_count, is_trailer, sector_of};
use crate::card::trailer::KEY_A_BYTES;
use crate::config::ReaderConfig;
use crate::protocol::checksum::xor;
use crate::protocol::{CommandCode, Frame, ResponseCode};
use crate::reader::{CancelToken, ReadCallback};
use crate::transport::Transport;
use crate::types::{AuthMode, BlockData, CardType, NodeId, RequestCode, SectorKey};
use crate::{Error, Result};

/// Engine settings without pauses, for hardware-free tests.
#[doc(hidden)]
pub fn fast_config() -> ReaderConfig {
    ReaderConfig::default()
        .with_pauses(Duration::ZERO)
        .with_response_timeout(Duration::from_millis(200))
}

/// Build a reader frame from the broadcast node: the checksum follows the
/// declared region and covers it.
#[doc(hidden)]
pub fn response_frame(command: CommandCode, code: ResponseCode, payload: &[u8]) -> Vec<u8> {
    let mut region = Vec::with_capacity(5 + payload.len());
    region.extend_from_slice(&NodeId::BROADCAST.to_le_bytes());
    region.extend_from_slice(&command.to_le_bytes());
    region.push(code.as_u8());
    region.extend_from_slice(payload);

    let mut out = vec![0xAA, 0xBB];
    out.extend_from_slice(&(region.len() as u16).to_le_bytes());
    out.extend_from_slice(&region);
    out.push(xor(&region));
    out
}

/// Card contents and reader behaviour of a [`SimulatedReader`].
#[derive(Debug)]
pub struct SimState {
    /// Reported by READ_DEVICE_MODE
    pub device_name: String,
    /// Node id the reader stores
    pub node: NodeId,
    /// `None` means the field is empty
    pub card_type: Option<CardType>,
    /// Serial in wire order
    pub wire_serial: u32,
    /// Card contents, one entry per block
    pub memory: Vec<BlockData>,
    /// Key A per sector; missing sectors use the default key
    pub key_a: HashMap<usize, SectorKey>,
    /// Key B per sector; missing sectors use the default key
    pub key_b: HashMap<usize, SectorKey>,
    /// INIT_PORT writes that get no answer
    pub silent_inits: usize,
    /// Answer HALT with a failure
    pub halt_fails: bool,
    /// Flip the checksum of the next reply to a read of this block
    pub corrupt_read: Option<usize>,
    /// Set this token once the given number of blocks has been read
    pub cancel_after_reads: Option<(usize, CancelToken)>,
    /// Every host frame received, decoded
    pub received: Vec<Frame>,
    authenticated: Option<usize>,
    halted: bool,
    reads: usize,
    pending: Vec<u8>,
}

impl SimState {
    fn key_for(&self, mode: AuthMode, sector: usize) -> SectorKey {
        let table = match mode {
            AuthMode::KeyA => &self.key_a,
            AuthMode::KeyB => &self.key_b,
        };
        table.get(&sector).copied().unwrap_or(SectorKey::DEFAULT)
    }

    fn answer(&mut self, frame: &Frame) -> Option<Vec<u8>> {
        let Ok(command) = frame.command_code() else {
            return Some(response_frame(
                CommandCode::ReadDeviceMode,
                ResponseCode::Undefined,
                &[],
            ));
        };
        let data = frame.data.as_slice();
        let ok = |payload: &[u8]| Some(response_frame(command, ResponseCode::Ok, payload));
        let fail = |code: ResponseCode| Some(response_frame(command, code, &[]));

        match command {
            CommandCode::InitPort => {
                if self.silent_inits > 0 {
                    self.silent_inits -= 1;
                    None
                } else {
                    ok(&[])
                }
            }
            CommandCode::ReadDeviceMode => {
                let mut payload = vec![0x01];
                payload.extend_from_slice(self.device_name.as_bytes());
                ok(&payload)
            }
            CommandCode::GetDeviceNodeNumber => ok(&self.node.to_le_bytes()),
            CommandCode::SetDeviceNodeNumber => {
                if data.len() == 2 {
                    self.node = NodeId::new(u16::from_le_bytes([data[0], data[1]]));
                }
                ok(&[])
            }
            CommandCode::SetBuzzerBeep | CommandCode::SetLedColor | CommandCode::SetAntennaStatus => {
                ok(&[])
            }
            CommandCode::MifareRequest => {
                let wakes_halted = data.first() == Some(&(RequestCode::AllTypeA as u8));
                match self.card_type {
                    Some(t) if wakes_halted || !self.halted => {
                        self.halted = false;
                        self.authenticated = None;
                        ok(&t.as_u16().to_le_bytes())
                    }
                    _ => {
                        self.authenticated = None;
                        fail(ResponseCode::NoCard)
                    }
                }
            }
            CommandCode::MifareAnticollision => match self.card_type {
                Some(_) => ok(&self.wire_serial.to_le_bytes()),
                None => fail(ResponseCode::NoCard),
            },
            CommandCode::MifareSelect => {
                if data == &self.wire_serial.to_le_bytes()[..] && self.card_type.is_some() {
                    ok(&[0x08])
                } else {
                    fail(ResponseCode::General)
                }
            }
            CommandCode::MifareHalt => {
                if self.halt_fails {
                    fail(ResponseCode::General)
                } else {
                    self.halted = true;
                    self.authenticated = None;
                    ok(&[])
                }
            }
            CommandCode::MifareAuthenticate => {
                if data.len() != 8 {
                    return fail(ResponseCode::CommandParameter);
                }
                let mode = if data[0] == AuthMode::KeyB as u8 {
                    AuthMode::KeyB
                } else {
                    AuthMode::KeyA
                };
                let sector = sector_of(data[1] as usize);
                if self.key_for(mode, sector).as_bytes()[..] == data[2..8] {
                    self.authenticated = Some(sector);
                    ok(&[])
                } else {
                    self.authenticated = None;
                    fail(ResponseCode::AuthFailure)
                }
            }
            CommandCode::MifareRead => {
                let Some(&block) = data.first() else {
                    return fail(ResponseCode::CommandParameter);
                };
                let block = block as usize;
                if self.authenticated != Some(sector_of(block)) {
                    return fail(ResponseCode::ReadBlockFailure);
                }
                let Some(stored) = self.memory.get(block) else {
                    return fail(ResponseCode::ReadBlockFailure);
                };
                let mut out = *stored;
                if is_trailer(block) {
                    // key A never leaves the card
                    out.as_bytes_mut()[KEY_A_BYTES].fill(0);
                }
                self.reads += 1;
                if let Some((n, token)) = &self.cancel_after_reads {
                    if self.reads == *n {
                        token.cancel();
                    }
                }
                let mut reply = response_frame(command, ResponseCode::Ok, out.as_bytes());
                if self.corrupt_read == Some(block) {
                    self.corrupt_read = None;
                    if let Some(c) = reply.last_mut() {
                        *c ^= 0xFF;
                    }
                }
                Some(reply)
            }
            CommandCode::MifareWrite => {
                if data.len() != 17 {
                    return fail(ResponseCode::CommandParameter);
                }
                let block = data[0] as usize;
                if self.authenticated != Some(sector_of(block)) || block >= self.memory.len() {
                    return fail(ResponseCode::WriteBlockFailure);
                }
                if let Ok(b) = BlockData::try_from(&data[1..]) {
                    self.memory[block] = b;
                }
                ok(&[])
            }
            CommandCode::MifareInitValue
            | CommandCode::MifareIncrement
            | CommandCode::MifareDecrement
            | CommandCode::MifareReadBalance => self.value_op(command, data),
        }
    }

    /// Value blocks keep their balance in the first four bytes here.
    fn value_op(&mut self, command: CommandCode, data: &[u8]) -> Option<Vec<u8>> {
        let Some(&block) = data.first() else {
            return Some(response_frame(command, ResponseCode::CommandParameter, &[]));
        };
        let block = block as usize;
        if self.authenticated != Some(sector_of(block)) || block >= self.memory.len() {
            return Some(response_frame(command, ResponseCode::WriteAddressFailure, &[]));
        }
        let arg = data
            .get(1..5)
            .map(|b| [b[0], b[1], b[2], b[3]])
            .unwrap_or([0; 4]);
        let bytes = self.memory[block].as_bytes_mut();
        let current = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let next = match command {
            CommandCode::MifareInitValue => i32::from_le_bytes(arg),
            CommandCode::MifareIncrement => current.wrapping_add(u32::from_le_bytes(arg) as i32),
            CommandCode::MifareDecrement => current.wrapping_sub(u32::from_le_bytes(arg) as i32),
            _ => {
                return Some(response_frame(
                    command,
                    ResponseCode::Ok,
                    &current.to_le_bytes(),
                ));
            }
        };
        bytes[..4].copy_from_slice(&next.to_le_bytes());
        Some(response_frame(command, ResponseCode::Ok, &[]))
    }
}

/// Hardware-free ER301 with a card in the field. Clones share state, so a
/// test keeps one handle while the engine owns another.
#[derive(Debug, Clone)]
pub struct SimulatedReader {
    state: Rc<RefCell<SimState>>,
}

impl SimulatedReader {
    /// Reader with a card whose block `b` holds the bytes `b, b+1, ...`
    /// and whose sectors all use the default transport key.
    pub fn with_card(card_type: CardType, wire_serial: u32) -> Self {
        let memory = (0..block_count(card_type))
            .map(|b| {
                let mut bytes = [0u8; 16];
                for (i, byte) in bytes.iter_mut().enumerate() {
                    *byte = (b + i) as u8;
                }
                BlockData::from_bytes(bytes)
            })
            .collect();
        Self::from_state(SimState {
            device_name: "ER301-SIM".to_string(),
            node: NodeId::BROADCAST,
            card_type: Some(card_type),
            wire_serial,
            memory,
            key_a: HashMap::new(),
            key_b: HashMap::new(),
            silent_inits: 0,
            halt_fails: false,
            corrupt_read: None,
            cancel_after_reads: None,
            received: Vec::new(),
            authenticated: None,
            halted: false,
            reads: 0,
            pending: Vec::new(),
        })
    }

    /// Reader with an empty field.
    pub fn empty() -> Self {
        let reader = Self::with_card(CardType::Classic1K, 0);
        reader.state.borrow_mut().card_type = None;
        reader
    }

    fn from_state(state: SimState) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Mutable access to the simulated card and reader
    pub fn state(&self) -> std::cell::RefMut<'_, SimState> {
        self.state.borrow_mut()
    }

    /// Another handle to the same reader, as an engine transport
    pub fn boxed(&self) -> Box<dyn Transport> {
        Box::new(self.clone())
    }

    /// Number of host frames received with this command code
    pub fn count(&self, command: CommandCode) -> usize {
        self.state
            .borrow()
            .received
            .iter()
            .filter(|f| f.command == command.as_u16())
            .count()
    }

    /// Block indices read, in order
    pub fn blocks_read(&self) -> Vec<u8> {
        self.state
            .borrow()
            .received
            .iter()
            .filter(|f| f.command == CommandCode::MifareRead.as_u16())
            .filter_map(|f| f.data.first().copied())
            .collect()
    }

    /// Raw command codes of every host frame, in order
    pub fn commands(&self) -> Vec<u16> {
        self.state.borrow().received.iter().map(|f| f.command).collect()
    }
}

impl Transport for SimulatedReader {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        let frame = Frame::decode_command(data)?;
        let mut state = self.state.borrow_mut();
        let answer = state.answer(&frame);
        state.received.push(frame);
        if let Some(bytes) = answer {
            state.pending.extend_from_slice(&bytes);
        }
        Ok(())
    }

    fn bytes_available(&mut self) -> Result<usize> {
        Ok(self.state.borrow().pending.len())
    }

    fn receive(&mut self, max_len: usize) -> Result<Vec<u8>> {
        let mut state = self.state.borrow_mut();
        let n = max_len.min(state.pending.len());
        Ok(state.pending.drain(..n).collect())
    }

    fn clear_input(&mut self) -> Result<()> {
        self.state.borrow_mut().pending.clear();
        Ok(())
    }

    fn name(&self) -> String {
        "simulated".to_string()
    }
}

/// Something the engine reported to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `on_status`
    Status(String),
    /// `on_block_read`
    Block(usize, BlockData),
    /// `on_success`
    Success {
        /// Reported serial
        serial: u32,
        /// MD5 of the card contents, lowercase hex
        digest: String,
    },
    /// `on_error`
    Error,
}

/// Callback that hands out fixed keys and records every event.
#[derive(Debug)]
pub struct RecordingCallback {
    /// Key A per sector; missing sectors get the default key
    pub key_a: HashMap<usize, SectorKey>,
    /// `None` behaves like a host without B keys
    pub key_b: Option<HashMap<usize, SectorKey>>,
    /// Answer `use_key_a`
    pub use_a: bool,
    /// Answer `use_key_b`
    pub use_b: bool,
    /// Answer `include_keys`
    pub include_keys: bool,
    /// Every key lookup, in order
    pub key_requests: Vec<(usize, AuthMode)>,
    /// Every event, in order
    pub events: Vec<Event>,
}

impl Default for RecordingCallback {
    fn default() -> Self {
        Self {
            key_a: HashMap::new(),
            key_b: None,
            use_a: true,
            use_b: false,
            include_keys: false,
            key_requests: Vec::new(),
            events: Vec::new(),
        }
    }
}

impl RecordingCallback {
    /// Key A only, default keys, keys not echoed
    pub fn new() -> Self {
        Self::default()
    }

    /// Authenticate with both keys, taking default B keys
    pub fn with_both_keys(mut self) -> Self {
        self.use_b = true;
        self.key_b = Some(HashMap::new());
        self
    }

    /// Status messages, in order
    pub fn statuses(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Status(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Delivered blocks, in order
    pub fn blocks(&self) -> Vec<(usize, BlockData)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Block(i, d) => Some((*i, *d)),
                _ => None,
            })
            .collect()
    }

    /// Success reports, in order
    pub fn successes(&self) -> Vec<(u32, String)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Success { serial, digest } => Some((*serial, digest.clone())),
                _ => None,
            })
            .collect()
    }

    /// Number of `on_error` calls
    pub fn error_count(&self) -> usize {
        self.events.iter().filter(|e| **e == Event::Error).count()
    }
}

impl ReadCallback for RecordingCallback {
    fn key_a(&mut self, sector: usize) -> Result<SectorKey> {
        self.key_requests.push((sector, AuthMode::KeyA));
        Ok(self.key_a.get(&sector).copied().unwrap_or(SectorKey::DEFAULT))
    }

    fn key_b(&mut self, sector: usize) -> Result<SectorKey> {
        self.key_requests.push((sector, AuthMode::KeyB));
        match &self.key_b {
            Some(keys) => Ok(keys.get(&sector).copied().unwrap_or(SectorKey::DEFAULT)),
            None => Err(Error::KeyUnavailable {
                sector,
                mode: AuthMode::KeyB,
            }),
        }
    }

    fn use_key_a(&self) -> bool {
        self.use_a
    }

    fn use_key_b(&self) -> bool {
        self.use_b
    }

    fn include_keys(&self) -> bool {
        self.include_keys
    }

    fn on_status(&mut self, message: &str) {
        self.events.push(Event::Status(message.to_string()));
    }

    fn on_block_read(&mut self, block: usize, data: &BlockData) {
        self.events.push(Event::Block(block, *data));
    }

    fn on_success(&mut self, serial: u32, digest: &str) {
        self.events.push(Event::Success {
            serial,
            digest: digest.to_string(),
        });
    }

    fn on_error(&mut self) {
        self.events.push(Event::Error);
    }
}

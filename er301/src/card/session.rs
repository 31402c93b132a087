// er301-rs/er301/src/card/session.rs

use std::time::{Duration, Instant};

use md5::{Digest, Md5};

use crate::card::Card;
use crate::constants::BLOCK_SIZE;
use crate::types::{BlockData, SectorKey};
use crate::utils::bytes_to_hex;
use crate::{Error, Result};

/// Keys used for the sector that is currently authorized. Kept only
/// until the read moves on to the next sector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorAuth {
    /// Sector these keys opened
    pub sector: usize,
    /// Key A, when key A authentication is enabled
    pub key_a: Option<SectorKey>,
    /// Key B, when key B authentication is enabled
    pub key_b: Option<SectorKey>,
}

/// State of one card read cycle. Owns the buffer the digest is taken over.
#[derive(Debug)]
pub struct CardSession {
    card: Card,
    buffer: Vec<u8>,
    authorized: Option<SectorAuth>,
    started: Instant,
}

impl CardSession {
    /// Start reading `card`; the clock for the readout starts here.
    pub fn new(card: Card) -> Self {
        Self {
            buffer: vec![0u8; card.block_count() * BLOCK_SIZE],
            card,
            authorized: None,
            started: Instant::now(),
        }
    }

    /// The card being read
    pub fn card(&self) -> &Card {
        &self.card
    }

    /// True when `sector` differs from the last authorized one.
    pub fn needs_auth(&self, sector: usize) -> bool {
        self.authorized.as_ref().map(|a| a.sector) != Some(sector)
    }

    /// Record the keys that opened the current sector
    pub fn set_authorized(&mut self, auth: SectorAuth) {
        self.authorized = Some(auth);
    }

    /// Keys of the sector authorized last, if any
    pub fn authorized(&self) -> Option<&SectorAuth> {
        self.authorized.as_ref()
    }

    /// Copy `data` into the buffer at the block's offset.
    pub fn store_block(&mut self, block: usize, data: &BlockData) -> Result<()> {
        let start = block * BLOCK_SIZE;
        let slot = self
            .buffer
            .get_mut(start..start + BLOCK_SIZE)
            .ok_or_else(|| {
                Error::FrameFormat(format!(
                    "block {} outside a {}-block card",
                    block,
                    self.card.block_count()
                ))
            })?;
        slot.copy_from_slice(data.as_bytes());
        Ok(())
    }

    /// All block bytes stored so far, in block order
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Time since the session started
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Lowercase hex MD5 of the whole buffer.
    pub fn digest_hex(&self) -> String {
        digest_hex(&self.buffer)
    }
}

/// Lowercase hex MD5 of `bytes`
pub fn digest_hex(bytes: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(bytes);
    bytes_to_hex(&hasher.finalize())
}

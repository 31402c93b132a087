// er301-rs/er301/src/card/mod.rs

use crate::types::{CardType, SerialNumber};

/// Block and sector arithmetic
pub mod addressing;
mod info;
/// Per-card read state and digest
pub mod session;
/// Sector trailer layout
pub mod trailer;

pub use info::CardReadout;
pub use session::{CardSession, SectorAuth};

/// A selected card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    serial: SerialNumber,
    card_type: CardType,
    sak: u8,
}

impl Card {
    /// Card found by anticollision and accepted by select
    pub fn new(serial: SerialNumber, card_type: CardType, sak: u8) -> Self {
        Self {
            serial,
            card_type,
            sak,
        }
    }

    /// Serial number in wire order, as sent to select
    pub fn serial(&self) -> SerialNumber {
        self.serial
    }

    /// Card family reported at detection
    pub fn card_type(&self) -> CardType {
        self.card_type
    }

    /// Select acknowledge. The ER301 answers the same value for every
    /// card, so it does not identify anything.
    pub fn sak(&self) -> u8 {
        self.sak
    }

    /// Number of blocks a full read covers
    pub fn block_count(&self) -> usize {
        addressing::block_count(self.card_type)
    }
}

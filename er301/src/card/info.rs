// er301-rs/er301/src/card/info.rs

use std::time::Duration;

use crate::card::Card;
use crate::types::CardType;

/// Summary of a completed read cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardReadout {
    /// Serial number in natural order, as reported to the host
    pub serial: u32,
    /// Card family reported at detection
    pub card_type: CardType,
    /// Lowercase hex MD5 over all blocks in index order
    pub digest: String,
    /// Time from session start to the digest
    pub elapsed: Duration,
    /// Whether the card acknowledged HALT
    pub halted: bool,
}

impl CardReadout {
    /// Summarize a finished session of `card`.
    pub fn new(card: &Card, digest: String, elapsed: Duration, halted: bool) -> Self {
        Self {
            serial: card.serial().reported(),
            card_type: card.card_type(),
            digest,
            elapsed,
            halted,
        }
    }
}

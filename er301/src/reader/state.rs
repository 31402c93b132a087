// er301-rs/er301/src/reader/state.rs

use derive_more::Display;

/// Where the read engine currently is.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// No port open yet
    #[display(fmt = "port closed")]
    PortClosed,
    /// Port open, reader not initialized
    #[display(fmt = "port open")]
    PortOpen,
    /// INIT_PORT answered
    #[display(fmt = "initialized")]
    Initialized,
    /// Sending requests until a card answers
    #[display(fmt = "waiting for card")]
    Detecting,
    /// A card answered the request
    #[display(fmt = "card present")]
    CardPresent,
    /// Anticollision and select done
    #[display(fmt = "card selected")]
    Selected,
    /// Authenticating the sector
    #[display(fmt = "authorizing sector {}", _0)]
    Authorizing(usize),
    /// Reading the block
    #[display(fmt = "reading block {}", _0)]
    ReadingBlock(usize),
    /// HALT sent after the last block
    #[display(fmt = "halted")]
    Halted,
    /// Digest delivered
    #[display(fmt = "card read")]
    Success,
    /// Held only while the failure is reported and the alarm runs; the
    /// engine then goes back to [`ReaderState::Detecting`].
    #[display(fmt = "failed")]
    Failed,
}

// er301-rs/er301/src/reader/callback.rs

use crate::types::{AuthMode, BlockData, SectorKey};
use crate::{Error, Result};

/// Host side of a read cycle: supplies keys and policy, receives events.
///
/// Every failure is preceded by an `on_status` message describing it, so
/// `on_error` never arrives without context.
pub trait ReadCallback {
    /// Key A for `sector`
    fn key_a(&mut self, sector: usize) -> Result<SectorKey>;

    /// Key B for `sector`. Hosts without B keys keep the default, which
    /// fails the cycle if key B authentication is enabled.
    fn key_b(&mut self, sector: usize) -> Result<SectorKey> {
        Err(Error::KeyUnavailable {
            sector,
            mode: AuthMode::KeyB,
        })
    }

    /// Authenticate every sector with key A
    fn use_key_a(&self) -> bool;

    /// Authenticate every sector with key B
    fn use_key_b(&self) -> bool;

    /// Write the keys used for a sector into its trailer block before
    /// handing it out.
    fn include_keys(&self) -> bool;

    /// Human-readable progress and failure messages
    fn on_status(&mut self, message: &str);

    /// Block `block` after trailer substitution
    fn on_block_read(&mut self, block: usize, data: &BlockData);

    /// `serial` is in natural order, `digest` is lowercase hex.
    fn on_success(&mut self, serial: u32, digest: &str);

    /// The cycle failed; the preceding status says why
    fn on_error(&mut self);
}

impl<C: ReadCallback + ?Sized> ReadCallback for &mut C {
    fn key_a(&mut self, sector: usize) -> Result<SectorKey> {
        (**self).key_a(sector)
    }

    fn key_b(&mut self, sector: usize) -> Result<SectorKey> {
        (**self).key_b(sector)
    }

    fn use_key_a(&self) -> bool {
        (**self).use_key_a()
    }

    fn use_key_b(&self) -> bool {
        (**self).use_key_b()
    }

    fn include_keys(&self) -> bool {
        (**self).include_keys()
    }

    fn on_status(&mut self, message: &str) {
        (**self).on_status(message)
    }

    fn on_block_read(&mut self, block: usize, data: &BlockData) {
        (**self).on_block_read(block, data)
    }

    fn on_success(&mut self, serial: u32, digest: &str) {
        (**self).on_success(serial, digest)
    }

    fn on_error(&mut self) {
        (**self).on_error()
    }
}

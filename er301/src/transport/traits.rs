// er301-rs/er301/src/transport/traits.rs

use crate::Result;

/// Transport trait abstracts the byte link away from protocol/device logic.
///
/// The reader never pushes data on its own, so the protocol layer drives
/// every exchange: one `send`, then polls `bytes_available` and `receive`s
/// what is there until a whole frame has been collected.
pub trait Transport {
    /// Write raw bytes to the device
    fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Number of bytes that can be read without blocking
    fn bytes_available(&mut self) -> Result<usize>;

    /// Read at most `max_len` bytes that are already available
    fn receive(&mut self, max_len: usize) -> Result<Vec<u8>>;

    /// Drop any unread input. Default is a no-op for links without buffers.
    fn clear_input(&mut self) -> Result<()> {
        Ok(())
    }

    /// Human-readable link name for logs
    fn name(&self) -> String;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        (**self).send(data)
    }

    fn bytes_available(&mut self) -> Result<usize> {
        (**self).bytes_available()
    }

    fn receive(&mut self, max_len: usize) -> Result<Vec<u8>> {
        (**self).receive(max_len)
    }

    fn clear_input(&mut self) -> Result<()> {
        (**self).clear_input()
    }

    fn name(&self) -> String {
        (**self).name()
    }
}

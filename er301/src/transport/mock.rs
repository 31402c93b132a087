// er301-rs/er301/src/transport/mock.rs

use crate::Result;
use crate::protocol::Frame;
use crate::transport::traits::Transport;

/// Mock transport for unit tests. It records sent frames and answers each
/// `send` with the next queued response, like a reader would.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Every write, in order
    pub sent: Vec<Vec<u8>>,
    /// Replies still to be released, one per send
    pub responses: Vec<Vec<u8>>,
    /// Bytes released by the last `send`, not yet read
    pending: Vec<u8>,
    /// Testing hook: number of `bytes_available` polls that report nothing
    /// after each send
    silent_polls: usize,
    silent_left: usize,
}

impl MockTransport {
    /// Mock without queued replies
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the reply to a later send
    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.responses.push(resp);
    }

    /// Bytes that are already waiting, as if the reader sent them unasked
    pub fn push_unsolicited(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
    }

    /// Make the next polls after every send come back empty.
    pub fn set_silent_polls(&mut self, n: usize) {
        self.silent_polls = n;
    }

    /// Take the last write
    pub fn pop_sent(&mut self) -> Option<Vec<u8>> {
        self.sent.pop()
    }

    /// Decode every recorded write as a host frame.
    pub fn sent_frames(&self) -> Result<Vec<Frame>> {
        self.sent.iter().map(|s| Frame::decode_command(s)).collect()
    }
}

impl Transport for MockTransport {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        self.sent.push(data.to_vec());
        if !self.responses.is_empty() {
            let next = self.responses.remove(0);
            self.pending.extend_from_slice(&next);
        }
        self.silent_left = self.silent_polls;
        Ok(())
    }

    fn bytes_available(&mut self) -> Result<usize> {
        if self.silent_left > 0 {
            self.silent_left -= 1;
            return Ok(0);
        }
        Ok(self.pending.len())
    }

    fn receive(&mut self, max_len: usize) -> Result<Vec<u8>> {
        let n = max_len.min(self.pending.len());
        Ok(self.pending.drain(..n).collect())
    }

    fn clear_input(&mut self) -> Result<()> {
        self.pending.clear();
        Ok(())
    }

    fn name(&self) -> String {
        "mock".to_string()
    }
}

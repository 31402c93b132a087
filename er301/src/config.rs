// er301-rs/er301/src/config.rs

//! Engine timing and addressing knobs.

use std::time::Duration;

use crate::constants::INIT_REQUEST_RETRY_COUNT;
use crate::types::{BaudRate, NodeId, RequestCode};

/// Settings shared by the device handle and the read engine.
///
/// Defaults mirror what the ER301 expects out of the box: broadcast node,
/// 115200 baud, five bring-up attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReaderConfig {
    /// Node id put into every request
    pub node: NodeId,
    /// Link speed announced with INIT_PORT
    pub baud_rate: BaudRate,
    /// INIT_PORT writes before bring-up fails
    pub init_attempts: usize,
    /// Pause after each INIT_PORT write before looking for a reply
    pub init_settle: Duration,
    /// Pause between "bytes available" checks while waiting for a reply
    pub poll_interval: Duration,
    /// Upper bound for one request/response exchange
    pub response_timeout: Duration,
    /// Pause between detection requests while no card is present
    pub detect_interval: Duration,
    /// How long the blue LED stays on after bring-up
    pub led_pause: Duration,
    /// How long the red alarm LED stays on after a failure
    pub alarm_pause: Duration,
    /// Request code used while waiting for a card
    pub request_code: RequestCode,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            node: NodeId::BROADCAST,
            baud_rate: BaudRate::default(),
            init_attempts: INIT_REQUEST_RETRY_COUNT,
            init_settle: Duration::from_millis(50),
            poll_interval: Duration::from_millis(10),
            response_timeout: Duration::from_millis(1000),
            detect_interval: Duration::from_millis(50),
            led_pause: Duration::from_millis(500),
            alarm_pause: Duration::from_millis(300),
            request_code: RequestCode::default(),
        }
    }
}

impl ReaderConfig {
    /// Address a specific reader node
    pub fn with_node(mut self, node: NodeId) -> Self {
        self.node = node;
        self
    }

    /// Link speed announced with INIT_PORT
    pub fn with_baud_rate(mut self, baud_rate: BaudRate) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// INIT_PORT writes before bring-up fails
    pub fn with_init_attempts(mut self, attempts: usize) -> Self {
        self.init_attempts = attempts;
        self
    }

    /// Upper bound for one exchange
    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    /// Request code used while waiting for a card
    pub fn with_request_code(mut self, code: RequestCode) -> Self {
        self.request_code = code;
        self
    }

    /// Set every pause and poll interval at once. Zero makes the engine
    /// spin without sleeping, which hardware-free tests rely on.
    pub fn with_pauses(mut self, pause: Duration) -> Self {
        self.init_settle = pause;
        self.poll_interval = pause;
        self.detect_interval = pause;
        self.led_pause = pause;
        self.alarm_pause = pause;
        self
    }
}

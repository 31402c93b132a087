// er301-rs/er301/src/device/builder.rs

use crate::config::ReaderConfig;
use crate::device::handle::{Device, Uninitialized};
use crate::transport::Transport;
use crate::{Error, Result};

/// Helper to construct a Device with optional configuration.
#[derive(Default)]
pub struct DeviceBuilder {
    transport: Option<Box<dyn Transport>>,
    config: ReaderConfig,
}

impl DeviceBuilder {
    /// Empty builder with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide an already-created transport instance (e.g. MockTransport)
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Consume the builder and return an uninitialized Device.
    /// Requires a transport to be provided.
    pub fn build_uninitialized(self) -> Result<Device<Uninitialized>> {
        match self.transport {
            Some(t) => Ok(Device::new_with_transport(t, self.config)),
            None => Err(Error::Connection("no transport configured".into())),
        }
    }
}

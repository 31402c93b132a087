// er301-rs/er301/src/transport/serial.rs

use std::io::{Read, Write};
use std::time::Duration;

use log::{debug, info};
use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, StopBits};

use crate::Result;
use crate::constants::DEFAULT_BAUD;
use crate::transport::traits::Transport;
use crate::utils::pause;

/// Link settings for the ER301 serial port (8-N-1, no flow control).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SerialSettings {
    /// Port speed in bits per second
    pub baud_rate: u32,
    /// Read/write timeout of the port itself
    pub timeout: Duration,
    /// Pause after opening before the first write
    pub settle: Duration,
    /// Assert RTS after opening
    pub rts: bool,
    /// Assert DTR after opening
    pub dtr: bool,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD,
            timeout: Duration::from_millis(50),
            settle: Duration::from_millis(50),
            rts: true,
            dtr: true,
        }
    }
}

/// Serial transport implementation using the `serialport` crate.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    name: String,
}

impl SerialTransport {
    /// Open `path` (e.g. `/dev/ttyUSB0`, `COM3`) with the given settings.
    pub fn open(path: &str, settings: &SerialSettings) -> Result<Self> {
        let mut port = serialport::new(path, settings.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(settings.timeout)
            .open()?;
        port.write_request_to_send(settings.rts)?;
        port.write_data_terminal_ready(settings.dtr)?;
        pause(settings.settle);

        info!("opened {} at {} baud", path, settings.baud_rate);
        Ok(Self {
            port,
            name: path.to_string(),
        })
    }
}

impl Transport for SerialTransport {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        self.port.write_all(data)?;
        self.port.flush()?;
        Ok(())
    }

    fn bytes_available(&mut self) -> Result<usize> {
        Ok(self.port.bytes_to_read()? as usize)
    }

    fn receive(&mut self, max_len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; max_len];
        let n = self.port.read(&mut buf)?;
        buf.truncate(n);
        Ok(buf)
    }

    fn clear_input(&mut self) -> Result<()> {
        self.port.clear(ClearBuffer::Input)?;
        Ok(())
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        debug!("closing {}", self.name);
    }
}

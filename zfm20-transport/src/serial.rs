//! Serial (UART) transport
//!
//! ZFM20 modules speak 8N1 at a multiple of 9600 baud, 57600 by default.

use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use async_trait::async_trait;
use serialport::SerialPort;
use tokio::time::{sleep, Instant};
use tracing::{debug, trace, warn};

use crate::{error::*, Transport};

/// Serial transport for ZFM20 modules
///
/// Port calls are blocking. `read` only runs after `data_available` saw
/// queued bytes, and writes are at most a few dozen bytes, so each call
/// holds the executor thread for well under the 100 ms port timeout.
pub struct SerialTransport {
    path: String,
    port: Option<Box<dyn SerialPort>>,
    io_timeout: Duration,
    poll_step: Duration,
}

impl SerialTransport {
    /// Create new serial transport for a device path such as `/dev/ttyUSB0`
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            port: None,
            io_timeout: Duration::from_millis(100),
            poll_step: Duration::from_millis(5),
        }
    }

    /// Check if the port is open
    pub fn is_open(&self) -> bool {
        self.port.is_some()
    }

    fn port_mut(&mut self) -> Result<&mut Box<dyn SerialPort>> {
        self.port.as_mut().ok_or(Error::NotOpen)
    }
}

#[async_trait]
impl Transport for SerialTransport {
    fn configure(&mut self, baud_rate: u32) -> Result<()> {
        if let Some(port) = self.port.as_mut() {
            debug!("Changing {} to {} baud", self.path, baud_rate);
            port.set_baud_rate(baud_rate)?;
            return Ok(());
        }

        debug!("Opening {} at {} baud...", self.path, baud_rate);

        let port = serialport::new(self.path.as_str(), baud_rate)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .flow_control(serialport::FlowControl::None)
            .timeout(self.io_timeout)
            .open()?;

        debug!("Opened {}", self.path);

        self.port = Some(port);
        Ok(())
    }

    fn discard_input(&mut self) -> Result<usize> {
        let port = self.port_mut()?;

        let pending = port.bytes_to_read()? as usize;
        if pending > 0 {
            port.clear(serialport::ClearBuffer::Input)?;
        }

        Ok(pending)
    }

    async fn write(&mut self, data: &[u8]) -> Result<usize> {
        let port = self.port_mut()?;

        trace!("Writing {} bytes: {}", data.len(), hex::encode(data));

        let n = port.write(data)?;
        if n == 0 {
            return Err(Error::WriteFailed);
        }
        port.flush()?;

        Ok(n)
    }

    async fn data_available(&mut self, wait: Duration) -> Result<bool> {
        let step = self.poll_step;
        let port = self.port_mut()?;
        let deadline = Instant::now() + wait;

        loop {
            if port.bytes_to_read()? > 0 {
                return Ok(true);
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(false);
            }

            sleep(step.min(deadline - now)).await;
        }
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let port = self.port_mut()?;

        match port.read(buf) {
            Ok(n) => {
                trace!("Read {} bytes: {}", n, hex::encode(&buf[..n]));
                Ok(n)
            }
            Err(e) if e.kind() == ErrorKind::TimedOut => Ok(0),
            Err(e) => {
                warn!("Read error on {}: {}", self.path, e);
                Err(Error::Io(e))
            }
        }
    }

    fn name(&self) -> String {
        format!("serial:{}", self.path)
    }
}

use std::io::{Read, Write};
use std::time::Duration;

use tracing::info;

use crate::error::{Result, TransportError};

fn default_baud_rate() -> u32 {
    115_200
}

fn default_read_timeout_ms() -> u64 {
    100
}

/// Configuration for opening the robot's serial device.
///
/// The read timeout doubles as the reader loop's shutdown poll interval:
/// a blocked read wakes at least this often, so keep it short.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct SerialConfig {
    /// Serial device path, e.g. `/dev/rfcomm0`.
    pub port: String,
    /// Baud rate. Default: 115200.
    #[cfg_attr(feature = "serde", serde(default = "default_baud_rate"))]
    pub baud_rate: u32,
    /// Read timeout in milliseconds. Default: 100.
    #[cfg_attr(feature = "serde", serde(default = "default_read_timeout_ms"))]
    pub read_timeout_ms: u64,
}

impl SerialConfig {
    /// Configuration for `port` with default baud rate and timeout.
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            baud_rate: default_baud_rate(),
            read_timeout_ms: default_read_timeout_ms(),
        }
    }

    /// Read timeout as a `Duration`.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

/// A connected duplex byte stream to the robot — implements Read + Write.
///
/// Cloneable: the reader loop and command senders each hold their own
/// handle to the same underlying device.
pub struct SerialLink {
    inner: Box<dyn serialport::SerialPort>,
    port: String,
}

impl SerialLink {
    /// Open the serial device described by `config` (blocking).
    pub fn open(config: &SerialConfig) -> Result<Self> {
        let inner = serialport::new(&config.port, config.baud_rate)
            .timeout(config.read_timeout())
            .open()
            .map_err(|source| TransportError::Open {
                port: config.port.clone(),
                source,
            })?;
        info!(port = %config.port, baud = config.baud_rate, "serial link opened");
        Ok(Self {
            inner,
            port: config.port.clone(),
        })
    }

    /// Clone this link (creates a new handle to the same device).
    pub fn try_clone(&self) -> Result<Self> {
        let inner = self
            .inner
            .try_clone()
            .map_err(|source| TransportError::Clone {
                port: self.port.clone(),
                source,
            })?;
        Ok(Self {
            inner,
            port: self.port.clone(),
        })
    }

    /// The device path this link was opened from.
    pub fn port(&self) -> &str {
        &self.port
    }
}

impl Read for SerialLink {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Write for SerialLink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

impl std::fmt::Debug for SerialLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialLink").field("port", &self.port).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = SerialConfig::new("/dev/rfcomm0");
        assert_eq!(config.baud_rate, 115_200);
        assert_eq!(config.read_timeout(), Duration::from_millis(100));
    }

    #[test]
    fn open_missing_device_fails() {
        let config = SerialConfig::new("/dev/orblink-does-not-exist");
        let err = SerialLink::open(&config).unwrap_err();
        assert!(matches!(err, TransportError::Open { .. }));
    }
}

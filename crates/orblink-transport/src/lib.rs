//! Bluetooth-serial transport for Sphero-style robots.
//!
//! The robot pairs as an RFCOMM serial device (`/dev/rfcomm0`,
//! `/dev/tty.Sphero-XXX`, `COM5`, ...). This crate opens that device and
//! exposes it as a plain duplex byte stream — pairing and reconnection are
//! the operating system's problem, not ours.

pub mod error;
pub mod serial;

pub use error::{Result, TransportError};
pub use serial::{SerialConfig, SerialLink};

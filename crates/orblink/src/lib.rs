//! Host-side driver for Sphero-style Bluetooth robots.
//!
//! The robot speaks the Orbotix binary protocol over a Bluetooth serial
//! link: framed commands with wrapping 8-bit sequence numbers, answer
//! frames correlated by that number, and unsolicited async frames for
//! sensor streaming and notifications.
//!
//! # Crate Structure
//!
//! - [`transport`] — opening the serial device
//! - [`frame`] — wire framing, checksum, incremental parser
//! - [`conn`] — the connection: reader loop, correlation, fan-out
//! - [`device`] — protocol tables, decoders, and the command catalogue

/// Re-export transport types.
pub mod transport {
    pub use orblink_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use orblink_frame::*;
}

/// Re-export connection types.
pub mod conn {
    pub use orblink_conn::*;
}

/// Re-export device types.
pub mod device {
    pub use orblink_device::*;
}

//! Connection layer for Sphero-style robots.
//!
//! A [`Connection`] owns the serial link and a single reader thread. Any
//! number of threads may send commands concurrently; each command gets a
//! fresh sequence number, and the reader routes the matching answer frame
//! back to the sender's reply channel. Unsolicited async frames fan out to
//! the connection's event sink.

pub mod conn;
pub mod error;
pub mod event;

pub use conn::{Connection, EVENT_SINK_CAPACITY};
pub use error::{ConnError, Result};
pub use event::Event;

//! Device-level API for Sphero-style robots.
//!
//! The connection layer moves frames; this crate gives them meaning:
//! the device/command/response-code tables, the data-streaming masks,
//! typed decoders for answer and async payloads, and [`Driver`] — the
//! catalogue of command-encoding convenience methods.

pub mod codes;
pub mod decode;
pub mod driver;
pub mod error;
pub mod masks;

pub use decode::{
    AsyncMessageExt, BatteryState, Collision, Color, Location, PowerState, ResponseExt,
};
pub use driver::Driver;
pub use error::{CommandError, DecodeError};

//! Wire framing for the Orbotix binary protocol.
//!
//! Every frame starts with a two-byte marker:
//! - `FF FF` — answer frame: a reply correlated to a command by sequence number
//! - `FF FE` — async frame: an unsolicited message (sensor streaming, events)
//!
//! Both shapes end with a one's-complement checksum, and both declare a
//! length that counts the payload *plus* the checksum byte. The parser is
//! incremental: feed it a growing buffer, advance by what it consumed,
//! repeat. Framing errors cost one byte (or one frame) and never kill the
//! stream.

pub mod checksum;
pub mod codec;
pub mod error;
pub mod parser;

pub use checksum::checksum;
pub use codec::{
    encode_answer, encode_async, encode_command, AnswerFrame, AsyncFrame, Frame, HEADER_SIZE,
    MAX_ANSWER_PAYLOAD, MAX_ASYNC_PAYLOAD, SHAPE_ANSWER, SHAPE_ASYNC, START,
};
pub use error::{EncodeError, ParseError};
pub use parser::{parse, ParseStep};

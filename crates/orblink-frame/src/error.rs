/// Framing errors recovered by resynchronization.
///
/// None of these are fatal: the parser reports how many bytes to discard
/// and the stream continues with the next byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// First byte was not the `0xFF` start marker; one byte is discarded.
    #[error("bad start marker 0x{0:02X} (expected 0xFF)")]
    BadStartMarker(u8),

    /// Second byte selected neither the answer nor the async shape.
    #[error("unknown frame shape 0x{0:02X} (expected 0xFF or 0xFE)")]
    UnknownShape(u8),

    /// Frame checksum did not validate; the whole frame is discarded.
    #[error("checksum mismatch (expected 0x{expected:02X}, got 0x{actual:02X})")]
    ChecksumMismatch { expected: u8, actual: u8 },
}

/// Errors that can occur while encoding a frame.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The payload does not fit the frame's length field.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },
}

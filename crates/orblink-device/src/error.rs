use crate::codes::response;

/// Protocol-level failure reported in an answer frame's response code.
///
/// These are legitimate protocol outcomes, not transport or framing
/// failures: the device understood us and said no.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("general, non-specific error")]
    General,
    #[error("received checksum failure")]
    Checksum,
    #[error("received command fragment")]
    Fragment,
    #[error("unknown command id")]
    BadCommand,
    #[error("command currently unsupported")]
    Unsupported,
    #[error("bad message format")]
    BadMessage,
    #[error("parameter value(s) invalid")]
    InvalidParameter,
    #[error("failed to execute command")]
    ExecutionFailed,
    #[error("unknown device id")]
    BadDevice,
    #[error("voltage too low for reflash operation")]
    PowerTooLow,
    #[error("illegal page number provided")]
    IllegalPage,
    #[error("page did not reprogram correctly")]
    FlashFailed,
    #[error("main application corrupt")]
    ApplicationCorrupt,
    #[error("message state machine timed out")]
    MessageTimeout,
    /// A response code outside the published table.
    #[error("unknown response code 0x{0:02X}")]
    Unknown(u8),
}

impl CommandError {
    /// Map a response code to a command outcome. `0x00` is success; any
    /// unrecognized code maps to [`CommandError::Unknown`], never a panic.
    pub fn check(code: u8) -> Result<(), CommandError> {
        match code {
            response::OK => Ok(()),
            response::GENERAL_ERROR => Err(CommandError::General),
            response::CHECKSUM_FAILURE => Err(CommandError::Checksum),
            response::COMMAND_FRAGMENT => Err(CommandError::Fragment),
            response::BAD_COMMAND => Err(CommandError::BadCommand),
            response::UNSUPPORTED => Err(CommandError::Unsupported),
            response::BAD_MESSAGE => Err(CommandError::BadMessage),
            response::INVALID_PARAMETER => Err(CommandError::InvalidParameter),
            response::EXECUTION_FAILED => Err(CommandError::ExecutionFailed),
            response::BAD_DEVICE => Err(CommandError::BadDevice),
            response::POWER_TOO_LOW => Err(CommandError::PowerTooLow),
            response::ILLEGAL_PAGE => Err(CommandError::IllegalPage),
            response::FLASH_FAILED => Err(CommandError::FlashFailed),
            response::APPLICATION_CORRUPT => Err(CommandError::ApplicationCorrupt),
            response::MESSAGE_TIMEOUT => Err(CommandError::MessageTimeout),
            other => Err(CommandError::Unknown(other)),
        }
    }
}

/// A payload did not match the expected record layout.
///
/// Local to the decoder call; the stream and connection state are
/// unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The payload length does not equal the record's encoded size.
    #[error("{record} payload must be {expected} bytes, got {actual}")]
    Size {
        record: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A field holds a value outside its defined range.
    #[error("{record}.{field} has invalid value 0x{value:02X}")]
    Value {
        record: &'static str,
        field: &'static str,
        value: u8,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_code_is_success() {
        assert_eq!(CommandError::check(0x00), Ok(()));
    }

    #[test]
    fn known_codes_map_to_typed_errors() {
        assert_eq!(CommandError::check(0x01), Err(CommandError::General));
        assert_eq!(CommandError::check(0x02), Err(CommandError::Checksum));
        assert_eq!(CommandError::check(0x04), Err(CommandError::BadCommand));
        assert_eq!(CommandError::check(0x07), Err(CommandError::InvalidParameter));
        assert_eq!(CommandError::check(0x09), Err(CommandError::BadDevice));
        assert_eq!(CommandError::check(0x31), Err(CommandError::PowerTooLow));
        assert_eq!(CommandError::check(0x35), Err(CommandError::MessageTimeout));
    }

    #[test]
    fn unknown_code_maps_to_unknown() {
        assert_eq!(CommandError::check(0x77), Err(CommandError::Unknown(0x77)));
        assert_eq!(CommandError::check(0xFF), Err(CommandError::Unknown(0xFF)));
    }
}

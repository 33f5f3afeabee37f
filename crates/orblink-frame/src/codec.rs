use bytes::{BufMut, Bytes, BytesMut};

use crate::checksum::checksum;
use crate::error::EncodeError;

/// First byte of every frame (SOP1).
pub const START: u8 = 0xFF;

/// Second byte of an answer frame (SOP2).
pub const SHAPE_ANSWER: u8 = 0xFF;

/// Second byte of an async frame (SOP2).
pub const SHAPE_ASYNC: u8 = 0xFE;

/// Header size shared by both incoming shapes: marker (2) + three more
/// header bytes before the payload.
pub const HEADER_SIZE: usize = 5;

/// Maximum answer/command payload: the 8-bit length field counts the
/// payload plus the checksum byte.
pub const MAX_ANSWER_PAYLOAD: usize = 254;

/// Maximum async payload: 16-bit length field, same `+1` convention.
pub const MAX_ASYNC_PAYLOAD: usize = 65_534;

/// Synchronous reply to a command, correlated by sequence number.
///
/// Wire: `FF FF code seq dlen payload chk` with `dlen == payload.len() + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFrame {
    /// Device-defined response code (`0x00` is success).
    pub code: u8,
    /// Echo of the sequence number assigned to the originating command.
    pub seq: u8,
    /// Response payload.
    pub payload: Bytes,
}

/// Unsolicited message pushed by the device (streaming, notifications).
///
/// Wire: `FF FE id dlen_hi dlen_lo payload chk`, length big-endian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncFrame {
    /// Message/event id code.
    pub id: u8,
    /// Message payload.
    pub payload: Bytes,
}

/// One complete protocol frame, either shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Answer(AnswerFrame),
    Async(AsyncFrame),
}

/// Encode an outgoing command frame.
///
/// Wire: `FF FF did cid seq dlen payload chk`; the checksum covers
/// everything after the two marker bytes.
pub fn encode_command(
    device: u8,
    command: u8,
    seq: u8,
    payload: &[u8],
    dst: &mut BytesMut,
) -> Result<(), EncodeError> {
    if payload.len() > MAX_ANSWER_PAYLOAD {
        return Err(EncodeError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_ANSWER_PAYLOAD,
        });
    }
    let start = dst.len();
    dst.reserve(HEADER_SIZE + 2 + payload.len());
    dst.put_u8(START);
    dst.put_u8(SHAPE_ANSWER);
    dst.put_u8(device);
    dst.put_u8(command);
    dst.put_u8(seq);
    dst.put_u8(payload.len() as u8 + 1);
    dst.put_slice(payload);
    let chk = checksum(&dst[start + 2..]);
    dst.put_u8(chk);
    Ok(())
}

/// Encode an answer frame (the device-to-host direction).
///
/// Used by tests, fixtures, and device emulators.
pub fn encode_answer(
    code: u8,
    seq: u8,
    payload: &[u8],
    dst: &mut BytesMut,
) -> Result<(), EncodeError> {
    if payload.len() > MAX_ANSWER_PAYLOAD {
        return Err(EncodeError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_ANSWER_PAYLOAD,
        });
    }
    let start = dst.len();
    dst.reserve(HEADER_SIZE + 1 + payload.len());
    dst.put_u8(START);
    dst.put_u8(SHAPE_ANSWER);
    dst.put_u8(code);
    dst.put_u8(seq);
    dst.put_u8(payload.len() as u8 + 1);
    dst.put_slice(payload);
    let chk = checksum(&dst[start + 2..]);
    dst.put_u8(chk);
    Ok(())
}

/// Encode an async frame (the device-to-host direction).
pub fn encode_async(id: u8, payload: &[u8], dst: &mut BytesMut) -> Result<(), EncodeError> {
    if payload.len() > MAX_ASYNC_PAYLOAD {
        return Err(EncodeError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_ASYNC_PAYLOAD,
        });
    }
    let start = dst.len();
    dst.reserve(HEADER_SIZE + 1 + payload.len());
    dst.put_u8(START);
    dst.put_u8(SHAPE_ASYNC);
    dst.put_u8(id);
    dst.put_u16(payload.len() as u16 + 1);
    dst.put_slice(payload);
    let chk = checksum(&dst[start + 2..]);
    dst.put_u8(chk);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_wire_bytes() {
        let mut buf = BytesMut::new();
        encode_command(0x00, 0x01, 0x01, &[], &mut buf).unwrap();
        assert_eq!(buf.as_ref(), &[0xFF, 0xFF, 0x00, 0x01, 0x01, 0x01, 0xFC]);
    }

    #[test]
    fn command_with_payload() {
        let mut buf = BytesMut::new();
        encode_command(0x02, 0x20, 0x05, &[0x0A, 0x14, 0x1E, 0x00], &mut buf).unwrap();
        // dlen counts payload + checksum byte
        assert_eq!(buf[5], 5);
        assert_eq!(buf.len(), 7 + 4);
        let chk = *buf.last().unwrap();
        assert_eq!(chk, checksum(&buf[2..buf.len() - 1]));
    }

    #[test]
    fn answer_wire_bytes() {
        let mut buf = BytesMut::new();
        encode_answer(0x00, 0x01, &[], &mut buf).unwrap();
        assert_eq!(buf.as_ref(), &[0xFF, 0xFF, 0x00, 0x01, 0x01, 0xFD]);
    }

    #[test]
    fn async_wire_bytes() {
        let mut buf = BytesMut::new();
        encode_async(0x03, &[0x01, 0x02, 0x03], &mut buf).unwrap();
        assert_eq!(
            buf.as_ref(),
            &[0xFF, 0xFE, 0x03, 0x00, 0x04, 0x01, 0x02, 0x03, 0xF2]
        );
    }

    #[test]
    fn oversized_payloads_rejected() {
        let mut buf = BytesMut::new();
        let big = vec![0u8; 255];
        assert!(matches!(
            encode_command(0, 0, 0, &big, &mut buf),
            Err(EncodeError::PayloadTooLarge { size: 255, max: 254 })
        ));
        assert!(matches!(
            encode_answer(0, 0, &big, &mut buf),
            Err(EncodeError::PayloadTooLarge { .. })
        ));
        let huge = vec![0u8; 65_535];
        assert!(matches!(
            encode_async(0, &huge, &mut buf),
            Err(EncodeError::PayloadTooLarge { .. })
        ));
    }

    #[test]
    fn encode_appends_without_clearing() {
        let mut buf = BytesMut::new();
        encode_answer(0x00, 0x01, &[], &mut buf).unwrap();
        encode_answer(0x00, 0x02, &[], &mut buf).unwrap();
        assert_eq!(buf.len(), 12);
        // second frame's checksum covers only its own bytes
        assert_eq!(buf[11], checksum(&[0x00, 0x02, 0x01]));
    }
}

use bytes::Bytes;

use crate::checksum::checksum;
use crate::codec::{AnswerFrame, AsyncFrame, Frame, HEADER_SIZE, SHAPE_ANSWER, SHAPE_ASYNC, START};
use crate::error::ParseError;

/// Outcome of one parser step over the receive buffer.
///
/// The caller drops `consumed` bytes from the front of its buffer and
/// calls again; `consumed == 0` means no progress is possible until more
/// bytes arrive. A step never carries both a frame and an error.
#[derive(Debug)]
pub struct ParseStep {
    /// Bytes to discard from the front of the buffer.
    pub consumed: usize,
    /// A complete, checksum-valid frame, if one was assembled.
    pub frame: Option<Frame>,
    /// A framing error recovered by discarding `consumed` bytes.
    pub error: Option<ParseError>,
}

impl ParseStep {
    fn wait() -> Self {
        Self {
            consumed: 0,
            frame: None,
            error: None,
        }
    }

    fn complete(consumed: usize, frame: Frame) -> Self {
        Self {
            consumed,
            frame: Some(frame),
            error: None,
        }
    }

    fn skip(consumed: usize, error: ParseError) -> Self {
        Self {
            consumed,
            frame: None,
            error: Some(error),
        }
    }
}

/// Try to parse one frame from the front of `buf`.
///
/// Pure and non-blocking. Corrupt frames are discarded as a unit because
/// the length field is trusted; if the length byte itself was corrupted the
/// resync point may be wrong and the next step discards byte-by-byte until
/// a marker lines up again — an accepted limitation of the wire format,
/// which does not cover the length field separately.
pub fn parse(buf: &[u8]) -> ParseStep {
    if buf.len() < 2 {
        return ParseStep::wait();
    }

    if buf[0] != START {
        return ParseStep::skip(1, ParseError::BadStartMarker(buf[0]));
    }

    match buf[1] {
        SHAPE_ANSWER => parse_answer(buf),
        SHAPE_ASYNC => parse_async(buf),
        other => ParseStep::skip(1, ParseError::UnknownShape(other)),
    }
}

fn parse_answer(buf: &[u8]) -> ParseStep {
    if buf.len() < HEADER_SIZE {
        return ParseStep::wait();
    }

    // dlen counts payload bytes plus the checksum byte
    let dlen = buf[4] as usize;
    let total = HEADER_SIZE + dlen;
    if buf.len() < total {
        return ParseStep::wait();
    }

    let chk_at = HEADER_SIZE + dlen - 1;
    match validate(buf, chk_at) {
        Ok(payload) => ParseStep::complete(
            total,
            Frame::Answer(AnswerFrame {
                code: buf[2],
                seq: buf[3],
                payload,
            }),
        ),
        Err(err) => ParseStep::skip(total, err),
    }
}

fn parse_async(buf: &[u8]) -> ParseStep {
    if buf.len() < HEADER_SIZE {
        return ParseStep::wait();
    }

    let dlen = u16::from_be_bytes([buf[3], buf[4]]) as usize;
    let total = HEADER_SIZE + dlen;
    if buf.len() < total {
        return ParseStep::wait();
    }

    let chk_at = HEADER_SIZE + dlen - 1;
    match validate(buf, chk_at) {
        Ok(payload) => ParseStep::complete(
            total,
            Frame::Async(AsyncFrame {
                id: buf[2],
                payload,
            }),
        ),
        Err(err) => ParseStep::skip(total, err),
    }
}

/// Check the checksum at `chk_at` over everything after the marker, and
/// copy out the payload. A declared length of zero puts `chk_at` inside
/// the header; the comparison then fails and the frame is discarded like
/// any other corrupt one.
fn validate(buf: &[u8], chk_at: usize) -> Result<Bytes, ParseError> {
    let expected = checksum(&buf[2..chk_at]);
    let actual = buf[chk_at];
    if expected != actual {
        return Err(ParseError::ChecksumMismatch { expected, actual });
    }
    let payload = if chk_at > HEADER_SIZE {
        &buf[HEADER_SIZE..chk_at]
    } else {
        &[][..]
    };
    Ok(Bytes::copy_from_slice(payload))
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;
    use crate::codec::{encode_answer, encode_async};

    fn parse_one(bytes: &[u8]) -> ParseStep {
        parse(bytes)
    }

    #[test]
    fn short_buffer_waits() {
        for bytes in [&[][..], &[0xFF][..]] {
            let step = parse_one(bytes);
            assert_eq!(step.consumed, 0);
            assert!(step.frame.is_none());
            assert!(step.error.is_none());
        }
    }

    #[test]
    fn incomplete_header_waits() {
        let step = parse_one(&[0xFF, 0xFF, 0x00, 0x01]);
        assert_eq!(step.consumed, 0);
        assert!(step.frame.is_none());
    }

    #[test]
    fn incomplete_payload_waits() {
        let mut buf = BytesMut::new();
        encode_answer(0x00, 0x07, &[1, 2, 3, 4], &mut buf).unwrap();
        for end in 0..buf.len() {
            let step = parse_one(&buf[..end]);
            assert_eq!(step.consumed, 0, "prefix of {end} bytes must wait");
            assert!(step.frame.is_none());
        }
        let step = parse_one(&buf);
        assert_eq!(step.consumed, buf.len());
        assert!(step.frame.is_some());
    }

    #[test]
    fn bad_start_marker_resyncs_one_byte() {
        let step = parse_one(&[0x42, 0xFF, 0xFF]);
        assert_eq!(step.consumed, 1);
        assert!(step.frame.is_none());
        assert_eq!(step.error, Some(ParseError::BadStartMarker(0x42)));
    }

    #[test]
    fn unknown_shape_resyncs_one_byte() {
        let step = parse_one(&[0xFF, 0xFD, 0x00]);
        assert_eq!(step.consumed, 1);
        assert_eq!(step.error, Some(ParseError::UnknownShape(0xFD)));
    }

    #[test]
    fn empty_payload_answer() {
        let step = parse_one(&[0xFF, 0xFF, 0x00, 0x01, 0x01, 0xFD]);
        assert_eq!(step.consumed, 6);
        assert!(step.error.is_none());
        match step.frame {
            Some(Frame::Answer(answer)) => {
                assert_eq!(answer.code, 0x00);
                assert_eq!(answer.seq, 0x01);
                assert!(answer.payload.is_empty());
            }
            other => panic!("expected answer frame, got {other:?}"),
        }
    }

    #[test]
    fn answer_with_payload() {
        let step = parse_one(&[0xFF, 0xFF, 0x00, 0x05, 0x04, 0xAA, 0xBB, 0xCC, 0xC5]);
        assert_eq!(step.consumed, 9);
        match step.frame {
            Some(Frame::Answer(answer)) => {
                assert_eq!(answer.seq, 0x05);
                assert_eq!(answer.payload.as_ref(), &[0xAA, 0xBB, 0xCC]);
            }
            other => panic!("expected answer frame, got {other:?}"),
        }
    }

    #[test]
    fn async_frame_parses() {
        let step = parse_one(&[0xFF, 0xFE, 0x03, 0x00, 0x04, 0x01, 0x02, 0x03, 0xF2]);
        assert_eq!(step.consumed, 9);
        match step.frame {
            Some(Frame::Async(msg)) => {
                assert_eq!(msg.id, 0x03);
                assert_eq!(msg.payload.as_ref(), &[0x01, 0x02, 0x03]);
            }
            other => panic!("expected async frame, got {other:?}"),
        }
    }

    #[test]
    fn checksum_mismatch_discards_whole_frame() {
        let mut buf = BytesMut::new();
        encode_answer(0x00, 0x09, &[0x10, 0x20, 0x30], &mut buf).unwrap();
        let frame_len = buf.len();
        buf[6] ^= 0x01; // corrupt one payload byte

        let step = parse_one(&buf);
        assert_eq!(step.consumed, frame_len);
        assert!(step.frame.is_none());
        assert!(matches!(
            step.error,
            Some(ParseError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn zero_length_field_rejected_without_panic() {
        let step = parse_one(&[0xFF, 0xFF, 0x00, 0x01, 0x00]);
        assert_eq!(step.consumed, 5);
        assert!(step.frame.is_none());
        assert!(matches!(
            step.error,
            Some(ParseError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn leaves_trailing_bytes_untouched() {
        let mut buf = BytesMut::new();
        encode_answer(0x00, 0x01, &[], &mut buf).unwrap();
        let frame_len = buf.len();
        buf.extend_from_slice(&[0xFF, 0xFE]); // start of a following frame

        let step = parse_one(&buf);
        assert_eq!(step.consumed, frame_len);
        assert!(step.frame.is_some());
    }

    #[test]
    fn resynchronizes_after_garbage() {
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&[0x13, 0x37]);
        encode_async(0x07, &[0xAB], &mut buf).unwrap();

        let mut rest: &[u8] = &buf;
        let mut errors = 0;
        let frame = loop {
            let step = parse(rest);
            assert!(step.consumed > 0, "parser must make progress");
            if step.error.is_some() {
                errors += 1;
            }
            let consumed = step.consumed;
            if let Some(frame) = step.frame {
                break frame;
            }
            rest = &rest[consumed..];
        };

        assert_eq!(errors, 2);
        match frame {
            Frame::Async(msg) => assert_eq!(msg.payload.as_ref(), &[0xAB]),
            other => panic!("expected async frame, got {other:?}"),
        }
    }

    #[test]
    fn answer_roundtrip_all_payload_lengths() {
        for len in 0..=254usize {
            let payload: Vec<u8> = (0..len).map(|i| (i * 7 + len) as u8).collect();
            let mut buf = BytesMut::new();
            encode_answer(0x00, 0x2A, &payload, &mut buf).unwrap();

            let step = parse_one(&buf);
            assert_eq!(step.consumed, buf.len(), "payload length {len}");
            match step.frame {
                Some(Frame::Answer(answer)) => {
                    assert_eq!(answer.payload.as_ref(), payload.as_slice())
                }
                other => panic!("payload length {len}: got {other:?}"),
            }
        }
    }

    #[test]
    fn async_roundtrip_large_payload() {
        let payload = vec![0x55; 1024];
        let mut buf = BytesMut::new();
        encode_async(0x03, &payload, &mut buf).unwrap();

        let step = parse_one(&buf);
        assert_eq!(step.consumed, buf.len());
        match step.frame {
            Some(Frame::Async(msg)) => assert_eq!(msg.payload.len(), 1024),
            other => panic!("expected async frame, got {other:?}"),
        }
    }
}

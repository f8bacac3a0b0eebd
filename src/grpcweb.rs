//! gRPC-Web body framing.
//!
//! A gRPC-Web HTTP body is a sequence of frames, each `[flag][length][payload]`
//! with a 1-byte flag and a 4-byte big-endian length. Flag `0x00` is a data
//! frame carrying one serialized protobuf message; flag `0x80` is the trailer
//! frame carrying ASCII `grpc-status` / `grpc-message` metadata. A well-formed
//! response is zero or more data frames followed by one trailer, and a body
//! with no data frame at all means "the RPC had nothing to return".

use crate::error::Error;

pub const FRAME_HEADER_SIZE: usize = 5;
pub const DATA_FLAG: u8 = 0x00;
pub const TRAILER_FLAG: u8 = 0x80;

/// Wraps one serialized request message in a gRPC-Web request frame.
///
/// The compression flag is always zero (compression unsupported). An empty
/// message is valid and produces a frame of five zero bytes, which is how
/// parameterless RPCs like `GetBlockchainHeight` go out on the wire.
pub fn build_request_frame(message: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(FRAME_HEADER_SIZE + message.len());
    frame.push(DATA_FLAG);
    frame.extend_from_slice(&(message.len() as u32).to_be_bytes());
    frame.extend_from_slice(message);
    frame
}

/// Status metadata extracted from a trailer frame.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Trailer {
    pub status: Option<u32>,
    pub message: Option<String>,
}

fn parse_trailer(payload: &[u8]) -> Trailer {
    let text = String::from_utf8_lossy(payload);
    let mut trailer = Trailer::default();
    for line in text.split("\r\n") {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        if key.eq_ignore_ascii_case("grpc-status") {
            trailer.status = value.parse::<u32>().ok();
        } else if key.eq_ignore_ascii_case("grpc-message") {
            trailer.message = Some(value.to_string());
        }
    }
    trailer
}

/// Walks the frames of a response body and extracts the message bytes.
///
/// Returns `Ok(Some(payload))` for the first non-empty data frame; every RPC
/// in this system carries at most one meaningful data frame, streaming is out
/// of scope. Returns `Ok(None)` when the body holds no data frame (including
/// a completely empty body); callers map that to their RPC's empty-state
/// default, it is never an error here. A trailer with a non-zero
/// `grpc-status` surfaces as `Error::GrpcStatus` only when no data frame was
/// seen first. A frame header or payload running past the end of the body is
/// `Error::MalformedFrame`; nothing is read out of bounds.
pub fn parse_response_frames(body: &[u8]) -> crate::Result<Option<Vec<u8>>> {
    let mut pos = 0;
    let mut trailer: Option<Trailer> = None;
    while pos < body.len() {
        if body.len() - pos < FRAME_HEADER_SIZE {
            return Err(Error::MalformedFrame("frame header runs past end of body"));
        }
        let flag = body[pos];
        let length =
            u32::from_be_bytes([body[pos + 1], body[pos + 2], body[pos + 3], body[pos + 4]])
                as usize;
        pos += FRAME_HEADER_SIZE;
        if body.len() - pos < length {
            return Err(Error::MalformedFrame("frame payload runs past end of body"));
        }
        let payload = &body[pos..pos + length];
        pos += length;

        if flag & TRAILER_FLAG != 0 {
            // trailer ends message extraction
            trailer = Some(parse_trailer(payload));
            break;
        }
        if length > 0 {
            return Ok(Some(payload.to_vec()));
        }
        // empty data frame, keep scanning
    }

    if let Some(trailer) = trailer {
        match trailer.status {
            Some(0) | None => {}
            Some(code) => {
                return Err(Error::GrpcStatus {
                    code,
                    message: trailer.message.unwrap_or_default(),
                });
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_frame(payload: &[u8]) -> Vec<u8> {
        let mut frame = vec![DATA_FLAG];
        frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        frame.extend_from_slice(payload);
        frame
    }

    fn trailer_frame(text: &str) -> Vec<u8> {
        let mut frame = vec![TRAILER_FLAG];
        frame.extend_from_slice(&(text.len() as u32).to_be_bytes());
        frame.extend_from_slice(text.as_bytes());
        frame
    }

    #[test]
    fn test_request_frame_prefixes_header() {
        let frame = build_request_frame(&[0x08, 0x2a]);
        assert_eq!(frame, vec![0x00, 0x00, 0x00, 0x00, 0x02, 0x08, 0x2a]);
    }

    #[test]
    fn test_empty_request_frame_is_five_zero_bytes() {
        assert_eq!(build_request_frame(&[]), vec![0x00; 5]);
    }

    #[test]
    fn test_frame_round_trip() {
        let payloads: Vec<Vec<u8>> = vec![vec![0x00], vec![0xab; 10 * 1024]];
        for payload in payloads {
            let mut body = data_frame(&payload);
            body.extend_from_slice(&trailer_frame("grpc-status:0\r\n"));
            assert_eq!(parse_response_frames(&body).unwrap(), Some(payload));
        }
    }

    #[test]
    fn test_empty_body_is_none_not_an_error() {
        assert_eq!(parse_response_frames(&[]).unwrap(), None);
    }

    #[test]
    fn test_empty_payload_data_frame_yields_none() {
        // an empty data frame carries no message, so only the trailer counts
        let mut body = data_frame(&[]);
        body.extend_from_slice(&trailer_frame("grpc-status:0\r\n"));
        assert_eq!(parse_response_frames(&body).unwrap(), None);
    }

    #[test]
    fn test_trailer_only_body_is_none() {
        let body = trailer_frame("grpc-status:0\r\n");
        assert_eq!(parse_response_frames(&body).unwrap(), None);
    }

    #[test]
    fn test_empty_data_frame_is_skipped() {
        let mut body = data_frame(&[]);
        body.extend_from_slice(&data_frame(&[0x08, 0x01]));
        body.extend_from_slice(&trailer_frame("grpc-status:0\r\n"));
        assert_eq!(
            parse_response_frames(&body).unwrap(),
            Some(vec![0x08, 0x01])
        );
    }

    #[test]
    fn test_data_frame_wins_over_bad_status() {
        // data frame comes first, so the trailer status is never consulted
        let mut body = data_frame(&[0x01]);
        body.extend_from_slice(&trailer_frame("grpc-status:13\r\n"));
        assert_eq!(parse_response_frames(&body).unwrap(), Some(vec![0x01]));
    }

    #[test]
    fn test_nonzero_status_without_data_is_a_grpc_error() {
        let body = trailer_frame("grpc-status:7\r\ngrpc-message:permission denied\r\n");
        match parse_response_frames(&body) {
            Err(Error::GrpcStatus { code, message }) => {
                assert_eq!(code, 7);
                assert_eq!(message, "permission denied");
            }
            other => panic!("expected GrpcStatus error, got {:?}", other),
        }
    }

    #[test]
    fn test_short_header_is_malformed() {
        let body = [0x00, 0x00, 0x00];
        assert!(matches!(
            parse_response_frames(&body),
            Err(Error::MalformedFrame(_))
        ));
    }

    #[test]
    fn test_payload_past_end_is_malformed() {
        // declares 10 payload bytes, provides 2
        let body = [0x00, 0x00, 0x00, 0x00, 0x0a, 0x01, 0x02];
        assert!(matches!(
            parse_response_frames(&body),
            Err(Error::MalformedFrame(_))
        ));
    }

    #[test]
    fn test_trailer_ignores_unknown_keys() {
        let trailer = parse_trailer(b"x-extra:1\r\ngrpc-status: 0\r\n");
        assert_eq!(trailer.status, Some(0));
        assert_eq!(trailer.message, None);
    }
}

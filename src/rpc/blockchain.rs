//! `rpcHush.HushBlockchain` codecs.

use crate::error::Error;
use crate::wire::{WireReader, WireType};

/// `GetBlockchainHeight` takes no parameters; the request message is empty.
pub fn build_get_blockchain_height_request() -> Vec<u8> {
    vec![]
}

/// Response schema: field 1 = block index (varint).
///
/// A chain always has a height, so an absent data frame or a message without
/// field 1 is `Error::MissingField("height")`, never a default of zero.
pub fn parse_get_blockchain_height_response(message: Option<&[u8]>) -> crate::Result<u64> {
    let Some(bytes) = message else {
        return Err(Error::MissingField("height"));
    };
    let mut reader = WireReader::new(bytes);
    let mut height: Option<u64> = None;
    while reader.has_remaining() {
        let (field_number, wire_type) = reader.read_tag()?;
        match (field_number, wire_type) {
            (1, WireType::Varint) => height = Some(reader.read_varint()?),
            _ => reader.skip_field(wire_type)?,
        }
    }
    height.ok_or(Error::MissingField("height"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grpcweb;
    use crate::wire::WireWriter;

    #[test]
    fn test_request_is_empty() {
        assert!(build_get_blockchain_height_request().is_empty());
    }

    #[test]
    fn test_parse_height() {
        let mut writer = WireWriter::new();
        writer.varint_field(1, 1_234_567);
        let bytes = writer.into_bytes();
        assert_eq!(
            parse_get_blockchain_height_response(Some(&bytes)).unwrap(),
            1_234_567
        );
    }

    #[test]
    fn test_missing_data_frame_is_an_explicit_error() {
        assert!(matches!(
            parse_get_blockchain_height_response(None),
            Err(Error::MissingField("height"))
        ));
    }

    #[test]
    fn test_message_without_field_one_is_an_error() {
        let mut writer = WireWriter::new();
        writer.varint_field(2, 99);
        let bytes = writer.into_bytes();
        assert!(matches!(
            parse_get_blockchain_height_response(Some(&bytes)),
            Err(Error::MissingField("height"))
        ));
    }

    #[test]
    fn test_synthetic_framed_response_yields_height() {
        // end-to-end over the framer: data frame with tag(1, varint) + 42,
        // then a clean trailer
        let mut message = WireWriter::new();
        message.varint_field(1, 42);
        let message = message.into_bytes();

        let mut body = grpcweb::build_request_frame(&message);
        let trailer = b"grpc-status:0\r\n";
        body.push(grpcweb::TRAILER_FLAG);
        body.extend_from_slice(&(trailer.len() as u32).to_be_bytes());
        body.extend_from_slice(trailer);

        let extracted = grpcweb::parse_response_frames(&body).unwrap();
        assert_eq!(
            parse_get_blockchain_height_response(extracted.as_deref()).unwrap(),
            42
        );
    }
}

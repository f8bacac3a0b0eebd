//! `rpcHush.HushIdentity` codecs.
//!
//! Identity submessage: f1 address, f2 display_name, f3 bio,
//! f4 registered_at_block.

use crate::error::WireError;
use crate::types::Identity;
use crate::wire::{WireReader, WireType, WireWriter};

pub fn build_get_identity_request(address: &str) -> Vec<u8> {
    let mut writer = WireWriter::new();
    writer.string_field(1, address);
    writer.into_bytes()
}

/// Response: f1 = identity submessage. No data frame means the address has
/// never registered, which is `None`, not an error.
pub fn parse_get_identity_response(message: Option<&[u8]>) -> crate::Result<Option<Identity>> {
    let Some(bytes) = message else {
        return Ok(None);
    };
    let mut reader = WireReader::new(bytes);
    let mut identity = None;
    while reader.has_remaining() {
        let (field_number, wire_type) = reader.read_tag()?;
        match (field_number, wire_type) {
            (1, WireType::LengthDelimited) => {
                identity = Some(parse_identity(reader.read_length_delimited()?)?);
            }
            _ => reader.skip_field(wire_type)?,
        }
    }
    Ok(identity)
}

pub fn build_search_by_display_name_request(query: &str, limit: u32) -> Vec<u8> {
    let mut writer = WireWriter::new();
    writer.string_field(1, query);
    writer.uint32_field(2, limit);
    writer.into_bytes()
}

/// Response: repeated f1 = identity submessage, stream order preserved.
pub fn parse_search_by_display_name_response(
    message: Option<&[u8]>,
) -> crate::Result<Vec<Identity>> {
    let Some(bytes) = message else {
        return Ok(vec![]);
    };
    let mut reader = WireReader::new(bytes);
    let mut results = vec![];
    while reader.has_remaining() {
        let (field_number, wire_type) = reader.read_tag()?;
        match (field_number, wire_type) {
            (1, WireType::LengthDelimited) => {
                results.push(parse_identity(reader.read_length_delimited()?)?);
            }
            _ => reader.skip_field(wire_type)?,
        }
    }
    Ok(results)
}

fn parse_identity(bytes: &[u8]) -> Result<Identity, WireError> {
    let mut reader = WireReader::new(bytes);
    let mut identity = Identity::default();
    while reader.has_remaining() {
        let (field_number, wire_type) = reader.read_tag()?;
        match (field_number, wire_type) {
            (1, WireType::LengthDelimited) => identity.address = reader.read_string()?,
            (2, WireType::LengthDelimited) => identity.display_name = reader.read_string()?,
            (3, WireType::LengthDelimited) => identity.bio = reader.read_string()?,
            (4, WireType::Varint) => identity.registered_at_block = reader.read_varint()?,
            _ => reader.skip_field(wire_type)?,
        }
    }
    Ok(identity)
}

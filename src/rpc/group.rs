//! `rpcHush.HushGroup` codecs.
//!
//! The group-feed lookup responses share one schema on the server side:
//! f1 success, f2 message, f3 feed_id, f4 title, f5 description,
//! f6 is_public, f7 member_count, f8 current_key_generation (only present on
//! `GetGroupFeed`).

use crate::error::WireError;
use crate::types::{Ack, GroupFeedInfo, GroupFeedLookup, GroupMember, JoinOutcome};
use crate::wire::{WireReader, WireType, WireWriter};

use super::feed::parse_ack;

pub fn build_get_group_feed_request(feed_id: &str) -> Vec<u8> {
    let mut writer = WireWriter::new();
    writer.string_field(1, feed_id);
    writer.into_bytes()
}

pub fn parse_get_group_feed_response(message: Option<&[u8]>) -> crate::Result<GroupFeedLookup> {
    parse_group_feed_lookup(message)
}

pub fn build_get_group_feed_by_invite_code_request(invite_code: &str) -> Vec<u8> {
    let mut writer = WireWriter::new();
    writer.string_field(1, invite_code);
    writer.into_bytes()
}

pub fn parse_get_group_feed_by_invite_code_response(
    message: Option<&[u8]>,
) -> crate::Result<GroupFeedLookup> {
    parse_group_feed_lookup(message)
}

pub fn build_join_group_feed_request(
    invite_code: &str,
    address: &str,
    display_name: &str,
) -> Vec<u8> {
    let mut writer = WireWriter::new();
    writer.string_field(1, invite_code);
    writer.string_field(2, address);
    writer.string_field(3, display_name);
    writer.into_bytes()
}

/// Response: f1 success, f2 message, f3 feed_id.
pub fn parse_join_group_feed_response(message: Option<&[u8]>) -> crate::Result<JoinOutcome> {
    let Some(bytes) = message else {
        return Ok(JoinOutcome::default());
    };
    let mut reader = WireReader::new(bytes);
    let mut outcome = JoinOutcome::default();
    while reader.has_remaining() {
        let (field_number, wire_type) = reader.read_tag()?;
        match (field_number, wire_type) {
            (1, WireType::Varint) => outcome.success = reader.read_bool()?,
            (2, WireType::LengthDelimited) => outcome.message = reader.read_string()?,
            (3, WireType::LengthDelimited) => outcome.feed_id = Some(reader.read_string()?),
            _ => reader.skip_field(wire_type)?,
        }
    }
    Ok(outcome)
}

pub fn build_leave_group_feed_request(feed_id: &str, address: &str) -> Vec<u8> {
    build_feed_and_address_request(feed_id, address)
}

pub fn parse_leave_group_feed_response(message: Option<&[u8]>) -> crate::Result<Ack> {
    parse_ack(message)
}

pub fn build_delete_group_feed_request(feed_id: &str, address: &str) -> Vec<u8> {
    build_feed_and_address_request(feed_id, address)
}

pub fn parse_delete_group_feed_response(message: Option<&[u8]>) -> crate::Result<Ack> {
    parse_ack(message)
}

pub fn build_add_member_to_group_feed_request(
    feed_id: &str,
    member_address: &str,
    added_by_address: &str,
) -> Vec<u8> {
    let mut writer = WireWriter::new();
    writer.string_field(1, feed_id);
    writer.string_field(2, member_address);
    writer.string_field(3, added_by_address);
    writer.into_bytes()
}

pub fn parse_add_member_to_group_feed_response(message: Option<&[u8]>) -> crate::Result<Ack> {
    parse_ack(message)
}

pub fn build_get_group_members_request(feed_id: &str) -> Vec<u8> {
    let mut writer = WireWriter::new();
    writer.string_field(1, feed_id);
    writer.into_bytes()
}

/// Response: repeated f1 = member submessage (f1 address, f2 display_name,
/// f3 joined_at_block, f4 is_admin).
pub fn parse_get_group_members_response(
    message: Option<&[u8]>,
) -> crate::Result<Vec<GroupMember>> {
    let Some(bytes) = message else {
        return Ok(vec![]);
    };
    let mut reader = WireReader::new(bytes);
    let mut members = vec![];
    while reader.has_remaining() {
        let (field_number, wire_type) = reader.read_tag()?;
        match (field_number, wire_type) {
            (1, WireType::LengthDelimited) => {
                members.push(parse_group_member(reader.read_length_delimited()?)?);
            }
            _ => reader.skip_field(wire_type)?,
        }
    }
    Ok(members)
}

fn build_feed_and_address_request(feed_id: &str, address: &str) -> Vec<u8> {
    let mut writer = WireWriter::new();
    writer.string_field(1, feed_id);
    writer.string_field(2, address);
    writer.into_bytes()
}

fn parse_group_feed_lookup(message: Option<&[u8]>) -> crate::Result<GroupFeedLookup> {
    let Some(bytes) = message else {
        return Ok(GroupFeedLookup::Missing);
    };
    let mut reader = WireReader::new(bytes);
    let mut success = false;
    let mut server_message = String::new();
    let mut info = GroupFeedInfo::default();
    while reader.has_remaining() {
        let (field_number, wire_type) = reader.read_tag()?;
        match (field_number, wire_type) {
            (1, WireType::Varint) => success = reader.read_bool()?,
            (2, WireType::LengthDelimited) => server_message = reader.read_string()?,
            (3, WireType::LengthDelimited) => info.feed_id = reader.read_string()?,
            (4, WireType::LengthDelimited) => info.title = reader.read_string()?,
            (5, WireType::LengthDelimited) => info.description = reader.read_string()?,
            (6, WireType::Varint) => info.is_public = reader.read_bool()?,
            (7, WireType::Varint) => info.member_count = reader.read_varint()? as u32,
            (8, WireType::Varint) => {
                info.current_key_generation = Some(reader.read_varint()? as u32);
            }
            _ => reader.skip_field(wire_type)?,
        }
    }
    // a parse that ran out of bytes never lands here; success=false is
    // always a genuine server answer
    if success {
        Ok(GroupFeedLookup::Found(info))
    } else {
        Ok(GroupFeedLookup::Refused {
            message: server_message,
        })
    }
}

fn parse_group_member(bytes: &[u8]) -> Result<GroupMember, WireError> {
    let mut reader = WireReader::new(bytes);
    let mut member = GroupMember::default();
    while reader.has_remaining() {
        let (field_number, wire_type) = reader.read_tag()?;
        match (field_number, wire_type) {
            (1, WireType::LengthDelimited) => member.address = reader.read_string()?,
            (2, WireType::LengthDelimited) => member.display_name = reader.read_string()?,
            (3, WireType::Varint) => member.joined_at_block = reader.read_varint()?,
            (4, WireType::Varint) => member.is_admin = reader.read_bool()?,
            _ => reader.skip_field(wire_type)?,
        }
    }
    Ok(member)
}

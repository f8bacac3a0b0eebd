//! `rpcHush.HushFeed` codecs.
//!
//! Feed submessage: f1 feed_id, f2 title, f3 is_group, f4 latest_block,
//! f5 unread_count, repeated f6 participant (f1 address, f2 display_name).
//! FeedMessage submessage: f1 message_id, f2 feed_id, f3 sender, f4 body
//! (opaque ciphertext), f5 block_height, f6 timestamp.

use crate::error::WireError;
use crate::types::{Ack, Feed, FeedMessage, FeedParticipant, PersonalFeedStatus};
use crate::wire::{WireReader, WireType, WireWriter};

pub fn build_get_feeds_for_address_request(address: &str) -> Vec<u8> {
    let mut writer = WireWriter::new();
    writer.string_field(1, address);
    writer.into_bytes()
}

/// Response: repeated f1 = feed submessage. "No feeds yet" arrives as an
/// absent data frame and maps to an empty list.
pub fn parse_get_feeds_for_address_response(message: Option<&[u8]>) -> crate::Result<Vec<Feed>> {
    let Some(bytes) = message else {
        return Ok(vec![]);
    };
    let mut reader = WireReader::new(bytes);
    let mut feeds = vec![];
    while reader.has_remaining() {
        let (field_number, wire_type) = reader.read_tag()?;
        match (field_number, wire_type) {
            (1, WireType::LengthDelimited) => {
                feeds.push(parse_feed(reader.read_length_delimited()?)?);
            }
            _ => reader.skip_field(wire_type)?,
        }
    }
    Ok(feeds)
}

pub fn build_get_feed_messages_for_address_request(address: &str, since_block: u64) -> Vec<u8> {
    let mut writer = WireWriter::new();
    writer.string_field(1, address);
    writer.varint_field(2, since_block);
    writer.into_bytes()
}

pub fn parse_get_feed_messages_for_address_response(
    message: Option<&[u8]>,
) -> crate::Result<Vec<FeedMessage>> {
    parse_message_list(message)
}

pub fn build_get_feed_messages_by_id_request(feed_id: &str, since_block: u64) -> Vec<u8> {
    let mut writer = WireWriter::new();
    writer.string_field(1, feed_id);
    writer.varint_field(2, since_block);
    writer.into_bytes()
}

pub fn parse_get_feed_messages_by_id_response(
    message: Option<&[u8]>,
) -> crate::Result<Vec<FeedMessage>> {
    parse_message_list(message)
}

pub fn build_has_personal_feed_request(address: &str) -> Vec<u8> {
    let mut writer = WireWriter::new();
    writer.string_field(1, address);
    writer.into_bytes()
}

/// Response: f1 exists (bool), f2 feed_id. An absent data frame means the
/// address has no personal feed.
pub fn parse_has_personal_feed_response(
    message: Option<&[u8]>,
) -> crate::Result<PersonalFeedStatus> {
    let Some(bytes) = message else {
        return Ok(PersonalFeedStatus::default());
    };
    let mut reader = WireReader::new(bytes);
    let mut status = PersonalFeedStatus::default();
    while reader.has_remaining() {
        let (field_number, wire_type) = reader.read_tag()?;
        match (field_number, wire_type) {
            (1, WireType::Varint) => status.exists = reader.read_bool()?,
            (2, WireType::LengthDelimited) => status.feed_id = Some(reader.read_string()?),
            _ => reader.skip_field(wire_type)?,
        }
    }
    Ok(status)
}

pub fn build_mark_feed_as_read_request(feed_id: &str, address: &str, up_to_block: u64) -> Vec<u8> {
    let mut writer = WireWriter::new();
    writer.string_field(1, feed_id);
    writer.string_field(2, address);
    writer.varint_field(3, up_to_block);
    writer.into_bytes()
}

pub fn parse_mark_feed_as_read_response(message: Option<&[u8]>) -> crate::Result<Ack> {
    parse_ack(message)
}

/// Shared success/message parser for the mutation acks (f1 success,
/// f2 message). An absent data frame is `success=false` with no message.
pub(crate) fn parse_ack(message: Option<&[u8]>) -> crate::Result<Ack> {
    let Some(bytes) = message else {
        return Ok(Ack::default());
    };
    let mut reader = WireReader::new(bytes);
    let mut ack = Ack::default();
    while reader.has_remaining() {
        let (field_number, wire_type) = reader.read_tag()?;
        match (field_number, wire_type) {
            (1, WireType::Varint) => ack.success = reader.read_bool()?,
            (2, WireType::LengthDelimited) => ack.message = reader.read_string()?,
            _ => reader.skip_field(wire_type)?,
        }
    }
    Ok(ack)
}

fn parse_message_list(message: Option<&[u8]>) -> crate::Result<Vec<FeedMessage>> {
    let Some(bytes) = message else {
        return Ok(vec![]);
    };
    let mut reader = WireReader::new(bytes);
    let mut messages = vec![];
    while reader.has_remaining() {
        let (field_number, wire_type) = reader.read_tag()?;
        match (field_number, wire_type) {
            (1, WireType::LengthDelimited) => {
                messages.push(parse_feed_message(reader.read_length_delimited()?)?);
            }
            _ => reader.skip_field(wire_type)?,
        }
    }
    Ok(messages)
}

fn parse_feed(bytes: &[u8]) -> Result<Feed, WireError> {
    let mut reader = WireReader::new(bytes);
    let mut feed = Feed::default();
    while reader.has_remaining() {
        let (field_number, wire_type) = reader.read_tag()?;
        match (field_number, wire_type) {
            (1, WireType::LengthDelimited) => feed.feed_id = reader.read_string()?,
            (2, WireType::LengthDelimited) => feed.title = reader.read_string()?,
            (3, WireType::Varint) => feed.is_group = reader.read_bool()?,
            (4, WireType::Varint) => feed.latest_block = reader.read_varint()?,
            (5, WireType::Varint) => feed.unread_count = reader.read_varint()?,
            (6, WireType::LengthDelimited) => {
                feed.participants
                    .push(parse_participant(reader.read_length_delimited()?)?);
            }
            _ => reader.skip_field(wire_type)?,
        }
    }
    Ok(feed)
}

fn parse_participant(bytes: &[u8]) -> Result<FeedParticipant, WireError> {
    let mut reader = WireReader::new(bytes);
    let mut participant = FeedParticipant::default();
    while reader.has_remaining() {
        let (field_number, wire_type) = reader.read_tag()?;
        match (field_number, wire_type) {
            (1, WireType::LengthDelimited) => participant.address = reader.read_string()?,
            (2, WireType::LengthDelimited) => participant.display_name = reader.read_string()?,
            _ => reader.skip_field(wire_type)?,
        }
    }
    Ok(participant)
}

fn parse_feed_message(bytes: &[u8]) -> Result<FeedMessage, WireError> {
    let mut reader = WireReader::new(bytes);
    let mut feed_message = FeedMessage::default();
    while reader.has_remaining() {
        let (field_number, wire_type) = reader.read_tag()?;
        match (field_number, wire_type) {
            (1, WireType::LengthDelimited) => feed_message.message_id = reader.read_string()?,
            (2, WireType::LengthDelimited) => feed_message.feed_id = reader.read_string()?,
            (3, WireType::LengthDelimited) => feed_message.sender = reader.read_string()?,
            (4, WireType::LengthDelimited) => {
                feed_message.body = reader.read_length_delimited()?.to_vec();
            }
            (5, WireType::Varint) => feed_message.block_height = reader.read_varint()?,
            (6, WireType::Varint) => feed_message.timestamp = reader.read_varint()?,
            _ => reader.skip_field(wire_type)?,
        }
    }
    Ok(feed_message)
}

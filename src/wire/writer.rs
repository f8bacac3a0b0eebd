use crate::wire::varint::encode_varint;
use crate::wire::{WireType, MAX_FIELD_NUMBER};

/// Builds one serialized protobuf message by appending tagged fields.
///
/// Encoders always emit the field, including protobuf default values; the
/// server tolerates explicit defaults and the parsers on both sides never
/// require presence. Field order follows call order, which by convention is
/// increasing field number.
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    pub fn new() -> Self {
        WireWriter { buf: vec![] }
    }

    pub fn tag(&mut self, field_number: u32, wire_type: WireType) {
        debug_assert!(field_number >= 1 && field_number <= MAX_FIELD_NUMBER);
        encode_varint(
            &mut self.buf,
            u64::from(field_number) << 3 | u64::from(wire_type.as_u8()),
        );
    }

    pub fn varint_field(&mut self, field_number: u32, value: u64) {
        self.tag(field_number, WireType::Varint);
        encode_varint(&mut self.buf, value);
    }

    pub fn bool_field(&mut self, field_number: u32, value: bool) {
        self.varint_field(field_number, u64::from(value));
    }

    pub fn uint32_field(&mut self, field_number: u32, value: u32) {
        self.varint_field(field_number, u64::from(value));
    }

    pub fn string_field(&mut self, field_number: u32, value: &str) {
        self.bytes_field(field_number, value.as_bytes());
    }

    pub fn bytes_field(&mut self, field_number: u32, value: &[u8]) {
        self.tag(field_number, WireType::LengthDelimited);
        encode_varint(&mut self.buf, value.len() as u64);
        self.buf.extend_from_slice(value);
    }

    /// Nested message: tag + length prefix + the already-serialized bytes.
    pub fn message_field(&mut self, field_number: u32, message: &[u8]) {
        self.bytes_field(field_number, message);
    }

    pub fn fixed32_field(&mut self, field_number: u32, value: u32) {
        self.tag(field_number, WireType::Fixed32);
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn fixed64_field(&mut self, field_number: u32, value: u64) {
        self.tag(field_number, WireType::Fixed64);
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for WireWriter {
    fn default() -> Self {
        WireWriter::new()
    }
}

use crate::error::WireError;
use crate::wire::varint::decode_varint;
use crate::wire::{WireType, MAX_FIELD_NUMBER};

/// Byte cursor over one serialized protobuf message.
///
/// Owns the buffer reference and the current position together, so parsers
/// never thread a loose integer offset through helper calls. Every read
/// checks the remaining length first; the reader cannot be made to read out
/// of bounds, it fails with a `WireError` instead.
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        WireReader { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn has_remaining(&self) -> bool {
        self.pos < self.buf.len()
    }

    /// Reads a field tag, returning the field number and wire type.
    pub fn read_tag(&mut self) -> Result<(u32, WireType), WireError> {
        let tag = self.read_varint()?;
        let field_number = tag >> 3;
        if field_number == 0 || field_number > u64::from(MAX_FIELD_NUMBER) {
            return Err(WireError::FieldNumberOutOfRange(field_number));
        }
        let wire_type = WireType::from_u8((tag & 0x7) as u8)?;
        Ok((field_number as u32, wire_type))
    }

    pub fn read_varint(&mut self) -> Result<u64, WireError> {
        let (value, consumed) = decode_varint(self.buf, self.pos)?;
        self.pos += consumed;
        Ok(value)
    }

    /// Bool-as-varint: anything non-zero is true.
    pub fn read_bool(&mut self) -> Result<bool, WireError> {
        Ok(self.read_varint()? != 0)
    }

    /// Reads a varint length followed by that many raw bytes.
    pub fn read_length_delimited(&mut self) -> Result<&'a [u8], WireError> {
        let length = self.read_varint()? as usize;
        if self.remaining() < length {
            return Err(WireError::Truncated {
                offset: self.pos,
                needed: length - self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + length];
        self.pos += length;
        Ok(slice)
    }

    /// Reads a length-delimited field and decodes it as strict UTF-8.
    pub fn read_string(&mut self) -> Result<String, WireError> {
        let start = self.pos;
        let bytes = self.read_length_delimited()?;
        String::from_utf8(bytes.to_vec()).map_err(|_| WireError::InvalidUtf8(start))
    }

    pub fn read_fixed32(&mut self) -> Result<u32, WireError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_fixed64(&mut self) -> Result<u64, WireError> {
        let bytes = self.take(8)?;
        Ok(u64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    /// Advances past one field value according to its wire type.
    ///
    /// This is how unknown field numbers are handled everywhere: the skip
    /// strategy is keyed on the tag's wire type, never on the field number,
    /// so schema additions on the server never abort parsing.
    pub fn skip_field(&mut self, wire_type: WireType) -> Result<(), WireError> {
        match wire_type {
            WireType::Varint => {
                self.read_varint()?;
            }
            WireType::Fixed64 => {
                self.take(8)?;
            }
            WireType::LengthDelimited => {
                self.read_length_delimited()?;
            }
            WireType::Fixed32 => {
                self.take(4)?;
            }
        }
        Ok(())
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8], WireError> {
        if self.remaining() < count {
            return Err(WireError::Truncated {
                offset: self.pos,
                needed: count - self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::WireWriter;

    #[test]
    fn test_tag_round_trip() {
        for field_number in [1u32, 2, 15, 16, 2047, 2048, MAX_FIELD_NUMBER] {
            for wire_type in [
                WireType::Varint,
                WireType::Fixed64,
                WireType::LengthDelimited,
                WireType::Fixed32,
            ] {
                let mut writer = WireWriter::new();
                writer.tag(field_number, wire_type);
                let bytes = writer.into_bytes();
                let mut reader = WireReader::new(&bytes);
                assert_eq!(reader.read_tag(), Ok((field_number, wire_type)));
                assert_eq!(reader.position(), bytes.len());
            }
        }
    }

    #[test]
    fn test_tag_field_number_zero_is_rejected() {
        // tag 0x02 is field 0 / wire type 2
        let mut reader = WireReader::new(&[0x02]);
        assert_eq!(reader.read_tag(), Err(WireError::FieldNumberOutOfRange(0)));
    }

    #[test]
    fn test_string_round_trip_multibyte_utf8() {
        let mut writer = WireWriter::new();
        writer.string_field(3, "hello 🚀");
        let bytes = writer.into_bytes();
        let mut reader = WireReader::new(&bytes);
        let (field_number, wire_type) = reader.read_tag().unwrap();
        assert_eq!(field_number, 3);
        assert_eq!(wire_type, WireType::LengthDelimited);
        assert_eq!(reader.read_string().unwrap(), "hello 🚀");
        assert!(!reader.has_remaining());
    }

    #[test]
    fn test_string_invalid_utf8_is_an_error() {
        // length 2, then bytes that are not utf-8
        let mut reader = WireReader::new(&[0x02, 0xff, 0xfe]);
        assert_eq!(reader.read_string(), Err(WireError::InvalidUtf8(0)));
    }

    #[test]
    fn test_length_delimited_truncated_is_an_error() {
        // declared length 5, only 2 payload bytes present
        let mut reader = WireReader::new(&[0x05, 0xaa, 0xbb]);
        assert_eq!(
            reader.read_length_delimited(),
            Err(WireError::Truncated {
                offset: 1,
                needed: 3
            })
        );
    }

    #[test]
    fn test_fixed_width_reads() {
        let mut writer = WireWriter::new();
        writer.fixed32_field(1, 0xdead_beef);
        writer.fixed64_field(2, 0x0123_4567_89ab_cdef);
        let bytes = writer.into_bytes();
        let mut reader = WireReader::new(&bytes);
        assert_eq!(reader.read_tag(), Ok((1, WireType::Fixed32)));
        assert_eq!(reader.read_fixed32(), Ok(0xdead_beef));
        assert_eq!(reader.read_tag(), Ok((2, WireType::Fixed64)));
        assert_eq!(reader.read_fixed64(), Ok(0x0123_4567_89ab_cdef));
    }

    #[test]
    fn test_skip_field_every_wire_type() {
        let mut writer = WireWriter::new();
        writer.varint_field(1, 300);
        writer.fixed64_field(2, 7);
        writer.bytes_field(3, &[1, 2, 3, 4]);
        writer.fixed32_field(4, 9);
        writer.varint_field(5, 42);
        let bytes = writer.into_bytes();

        let mut reader = WireReader::new(&bytes);
        loop {
            let (field_number, wire_type) = reader.read_tag().unwrap();
            if field_number == 5 {
                assert_eq!(reader.read_varint(), Ok(42));
                break;
            }
            reader.skip_field(wire_type).unwrap();
        }
        assert!(!reader.has_remaining());
    }

    #[test]
    fn test_skip_truncated_field_is_an_error() {
        // fixed64 tag but only 3 bytes of payload
        let mut writer = WireWriter::new();
        writer.tag(1, WireType::Fixed64);
        let mut bytes = writer.into_bytes();
        bytes.extend_from_slice(&[0, 0, 0]);

        let mut reader = WireReader::new(&bytes);
        let (_, wire_type) = reader.read_tag().unwrap();
        assert!(matches!(
            reader.skip_field(wire_type),
            Err(WireError::Truncated { .. })
        ));
    }
}

pub mod reader;
pub mod varint;
pub mod writer;

pub use reader::WireReader;
pub use writer::WireWriter;

use crate::error::WireError;

/// Highest field number the protobuf wire format can express (2^29 - 1).
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// The 3-bit wire type carried in every field tag. Only the four types the
/// server's schemas use are supported; the deprecated group types are
/// rejected as malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    Fixed32 = 5,
}

impl WireType {
    pub fn from_u8(value: u8) -> Result<WireType, WireError> {
        match value {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::LengthDelimited),
            5 => Ok(WireType::Fixed32),
            _ => Err(WireError::InvalidWireType(value)),
        }
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

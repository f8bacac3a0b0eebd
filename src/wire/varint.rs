use crate::error::WireError;

/// Appends `value` to `buf` as a base-128 varint: 7 payload bits per byte,
/// continuation bit set on every byte but the last. Zero encodes to a single
/// zero byte; the encoding is always minimal-length.
pub fn encode_varint(buf: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        buf.push((value as u8) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

/// Decodes a varint from `buf` starting at `offset`, returning the value and
/// the number of bytes consumed.
///
/// Running off the end of the buffer before a terminating byte is a
/// malformed-input error, never a silent stop. A varint longer than 10 bytes
/// (or one whose 10th byte carries more than the top bit of a u64) is
/// rejected as overflow.
pub fn decode_varint(buf: &[u8], offset: usize) -> Result<(u64, usize), WireError> {
    let mut value: u64 = 0;
    let mut shift: u32 = 0;
    let mut consumed: usize = 0;
    loop {
        let byte = *buf
            .get(offset + consumed)
            .ok_or(WireError::TruncatedVarint(offset))?;
        if shift == 63 && byte > 1 {
            return Err(WireError::VarintOverflow(offset));
        }
        value |= u64::from(byte & 0x7f) << shift;
        consumed += 1;
        if byte & 0x80 == 0 {
            return Ok((value, consumed));
        }
        shift += 7;
        if shift > 63 {
            return Err(WireError::VarintOverflow(offset));
        }
    }
}

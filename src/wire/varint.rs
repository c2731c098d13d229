//! CompactSize variable-length integers.
//!
//! The only self-describing integer encoding in the protocol; every other
//! integer on the wire is fixed width.
//!
//! ```text
//! value <= 0xFC          1 byte   value
//! value <= 0xFFFF        3 bytes  0xFD + u16 LE
//! value <= 0xFFFF_FFFF   5 bytes  0xFE + u32 LE
//! otherwise              9 bytes  0xFF + u64 LE
//! ```
//!
//! Reference:
//! https://developer.bitcoin.org/reference/transactions.html#compactsize-unsigned-integers
use crate::wire::error::WireError;
use crate::wire::reader::PayloadReader;

/// Appends the canonical CompactSize encoding of `value` to `out`.
pub fn write_varint(out: &mut Vec<u8>, value: u64) {
    match value {
        0..=0xFC => out.push(value as u8),
        0xFD..=0xFFFF => {
            out.push(0xFD);
            out.extend(&(value as u16).to_le_bytes());
        }
        0x1_0000..=0xFFFF_FFFF => {
            out.push(0xFE);
            out.extend(&(value as u32).to_le_bytes());
        }
        _ => {
            out.push(0xFF);
            out.extend(&value.to_le_bytes());
        }
    }
}

/// Returns the CompactSize encoding of `value` as a fresh buffer.
///
/// ```
/// use btc_wire::wire::varint::encode_varint;
///
/// assert_eq!(encode_varint(252), vec![0xFC]);
/// assert_eq!(encode_varint(253), vec![0xFD, 0xFD, 0x00]);
/// ```
pub fn encode_varint(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(varint_len(value));
    write_varint(&mut out, value);
    out
}

/// Number of bytes `value` occupies once encoded.
pub fn varint_len(value: u64) -> usize {
    match value {
        0..=0xFC => 1,
        0xFD..=0xFFFF => 3,
        0x1_0000..=0xFFFF_FFFF => 5,
        _ => 9,
    }
}

/// Reads one CompactSize integer at the reader's cursor.
///
/// Non-canonical encodings (a wider form than the value needs) are accepted.
pub fn decode_varint(reader: &mut PayloadReader<'_>, field: &'static str) -> Result<u64, WireError> {
    match reader.read_u8(field)? {
        0xFD => Ok(u64::from(reader.read_u16(field)?)),
        0xFE => Ok(u64::from(reader.read_u32(field)?)),
        0xFF => reader.read_u64(field),
        n => Ok(u64::from(n)),
    }
}

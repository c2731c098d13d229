use byteorder::{ByteOrder, LittleEndian};

use crate::wire::error::WireError;
use crate::wire::hash::BlockHash;
use crate::wire::varint;

/// Sequential little-endian reader over a message payload.
///
/// The cursor only moves forward. Every read names the field it is reading so
/// a [`WireError::TruncatedInput`] says exactly where the payload ran out.
///
/// ```
/// use btc_wire::wire::PayloadReader;
///
/// let mut reader = PayloadReader::new(&[0x7F, 0x11, 0x01, 0x00, 0x00]);
/// assert_eq!(reader.read_u32("version").unwrap(), 70015);
/// assert_eq!(reader.read_varint("count").unwrap(), 0);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug)]
pub struct PayloadReader<'a> {
    payload: &'a [u8],
    pos: usize,
}

impl<'a> PayloadReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.payload.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Reads exactly `n` bytes, borrowing them from the payload.
    pub fn read_bytes(&mut self, n: usize, field: &'static str) -> Result<&'a [u8], WireError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(WireError::TruncatedInput {
                field,
                needed: n,
                remaining,
            });
        }

        let bytes = &self.payload[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], WireError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N, field)?);
        Ok(out)
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8, WireError> {
        Ok(self.read_bytes(1, field)?[0])
    }

    pub fn read_u16(&mut self, field: &'static str) -> Result<u16, WireError> {
        Ok(LittleEndian::read_u16(self.read_bytes(2, field)?))
    }

    pub fn read_u32(&mut self, field: &'static str) -> Result<u32, WireError> {
        Ok(LittleEndian::read_u32(self.read_bytes(4, field)?))
    }

    pub fn read_u64(&mut self, field: &'static str) -> Result<u64, WireError> {
        Ok(LittleEndian::read_u64(self.read_bytes(8, field)?))
    }

    pub fn read_varint(&mut self, field: &'static str) -> Result<u64, WireError> {
        varint::decode_varint(self, field)
    }

    pub fn read_hash(&mut self, field: &'static str) -> Result<BlockHash, WireError> {
        self.read_array::<32>(field).map(BlockHash::from)
    }
}

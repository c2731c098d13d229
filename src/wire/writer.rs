use crate::wire::hash::BlockHash;
use crate::wire::varint;

/// Append-only payload builder.
///
/// Integers are written little-endian. Calls chain, mirroring the order the
/// fields appear on the wire:
///
/// ```
/// use btc_wire::wire::PayloadWriter;
///
/// let mut writer = PayloadWriter::new();
/// writer.write_u32(70015).write_varint(0);
///
/// assert_eq!(writer.to_bytes(), vec![0x7F, 0x11, 0x01, 0x00, 0x00]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct PayloadWriter {
    buf: Vec<u8>,
}

impl PayloadWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn write_varint(&mut self, value: u64) -> &mut Self {
        varint::write_varint(&mut self.buf, value);
        self
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn write_hash(&mut self, hash: &BlockHash) -> &mut Self {
        self.write_bytes(hash.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Copies out everything written so far. The writer stays usable.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buf.clone()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

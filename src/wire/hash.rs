use std::fmt;

use crate::wire::constants::ZERO_HASH;
use crate::wire::error::WireError;

/// A 32-byte block hash in internal (wire) byte order.
///
/// Bytes are stored and serialized exactly as they appear on the wire. Block
/// explorers and RPC interfaces show hashes with the byte order reversed;
/// that reversal happens only in [`BlockHash::to_display_hex`] and
/// [`BlockHash::from_display_hex`], never in the codecs.
///
/// ```
/// use btc_wire::wire::BlockHash;
/// use btc_wire::wire::constants::GENESIS_BLOCK_HASH_MAINNET;
///
/// let genesis = BlockHash::from(GENESIS_BLOCK_HASH_MAINNET);
/// assert_eq!(
///     genesis.to_string(),
///     "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f"
/// );
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockHash([u8; 32]);

impl BlockHash {
    pub const ZERO: BlockHash = BlockHash(ZERO_HASH);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Builds a hash from a loose byte buffer.
    ///
    /// Anything other than exactly 32 bytes is rejected; the buffer is never
    /// padded or truncated.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, WireError> {
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| WireError::InvalidHashLength(bytes.len()))?;
        Ok(Self(arr))
    }

    /// Parses the conventional reversed-byte-order hex form.
    pub fn from_display_hex(s: &str) -> Result<Self, WireError> {
        let mut bytes = hex::decode(s.trim())?;
        bytes.reverse();
        Self::from_slice(&bytes)
    }

    /// Renders the hash as reversed-byte-order hex, the way explorers show it.
    pub fn to_display_hex(&self) -> String {
        let mut reversed = self.0;
        reversed.reverse();
        hex::encode(reversed)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// `true` for the all-zero "no stop" sentinel.
    pub fn is_zero(&self) -> bool {
        self.0 == ZERO_HASH
    }
}

impl From<[u8; 32]> for BlockHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<BlockHash> for [u8; 32] {
    fn from(hash: BlockHash) -> Self {
        hash.0
    }
}

impl AsRef<[u8]> for BlockHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_hex())
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({})", self.to_display_hex())
    }
}

use std::fmt;

use log::trace;

use crate::wire::constants::{MAX_HEADERS_PER_MESSAGE, PROTOCOL_VERSION};
use crate::wire::error::WireError;
use crate::wire::hash::BlockHash;
use crate::wire::locator;
use crate::wire::message::{Command, Decode, NetworkMessage};

/// The `getheaders` request.
///
/// The payload structure is:
///
/// ```text
/// u32     version
/// varint  hash_count
/// hash[]  block_locator_hashes
/// hash    hash_stop
/// ```
///
/// Semantics:
/// The peer will
/// 1. find the first locator hash it recognizes in its active chain,
/// 2. return headers *after* that block in forward chronological order,
/// 3. stop after [`MAX_HEADERS_PER_MESSAGE`] headers or when reaching `hash_stop`.
///
/// Locator hashes are conventionally ordered newest to oldest; the order is
/// preserved exactly on both encode and decode. The hash count is not stored:
/// it is always the length of `locator_hashes`.
///
/// Reference:
/// https://developer.bitcoin.org/reference/p2p_networking.html#getheaders
///
/// # Example
///
/// ```
/// use btc_wire::wire::{BlockHash, Decode, GetHeadersMessage, NetworkMessage};
///
/// let msg = GetHeadersMessage::with_stop(70015, vec![BlockHash::new([1u8; 32])], BlockHash::ZERO);
/// let payload = msg.payload();
///
/// assert_eq!(&payload[..5], &[0x7F, 0x11, 0x01, 0x00, 0x01]);
/// assert_eq!(GetHeadersMessage::decode(&payload).unwrap(), msg);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetHeadersMessage {
    pub version: u32,
    pub locator_hashes: Vec<BlockHash>,
    /// All-zero asks for as many headers as the peer sends per message,
    /// at most [`MAX_HEADERS_PER_MESSAGE`].
    pub hash_stop: BlockHash,
}

impl GetHeadersMessage {
    /// Requests headers after `locator_hashes`, with no stop hash, advertising
    /// [`PROTOCOL_VERSION`].
    pub fn new(locator_hashes: Vec<BlockHash>) -> Self {
        Self::with_stop(PROTOCOL_VERSION, locator_hashes, BlockHash::ZERO)
    }

    pub fn with_stop(version: u32, locator_hashes: Vec<BlockHash>, hash_stop: BlockHash) -> Self {
        Self {
            version,
            locator_hashes,
            hash_stop,
        }
    }

    /// Builds a request from loose byte buffers, as handed over by callers
    /// that do not hold [`BlockHash`] values.
    ///
    /// Fails with [`WireError::InvalidHashLength`] on the first buffer that is
    /// not exactly 32 bytes.
    pub fn from_slices<B: AsRef<[u8]>>(locator_hashes: &[B]) -> Result<Self, WireError> {
        let hashes = locator_hashes
            .iter()
            .map(|h| BlockHash::from_slice(h.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(hashes))
    }

    /// Checks the locator against the size peers accept.
    pub fn validate(&self) -> Result<(), WireError> {
        locator::validate(&self.locator_hashes)
    }

    /// Exact size of [`NetworkMessage::payload`] for this message.
    pub fn encoded_len(&self) -> usize {
        locator::encoded_len(self.locator_hashes.len())
    }
}

impl NetworkMessage for GetHeadersMessage {
    fn command(&self) -> Command {
        Command::GetHeaders
    }

    fn payload(&self) -> Vec<u8> {
        locator::encode(self.version, &self.locator_hashes, &self.hash_stop)
    }
}

impl Decode for GetHeadersMessage {
    fn decode(payload: &[u8]) -> Result<Self, WireError> {
        let fields = locator::decode(payload)?;

        let msg = Self {
            version: fields.version,
            locator_hashes: fields.locator_hashes,
            hash_stop: fields.hash_stop,
        };
        trace!("decoded {msg}");

        Ok(msg)
    }
}

impl fmt::Display for GetHeadersMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        locator::fmt_summary(f, "GetHeaders", &self.locator_hashes, &self.hash_stop)
    }
}

use std::fmt;

use log::trace;

use crate::wire::constants::PROTOCOL_VERSION;
use crate::wire::error::WireError;
use crate::wire::hash::BlockHash;
use crate::wire::locator;
use crate::wire::message::{Command, Decode, NetworkMessage};

/// The `getblocks` request: same layout as [`GetHeadersMessage`], answered
/// with an `inv` of up to 500 block hashes instead of headers.
///
/// [`GetHeadersMessage`]: crate::wire::GetHeadersMessage
///
/// Reference:
/// https://developer.bitcoin.org/reference/p2p_networking.html#getblocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetBlocksMessage {
    pub version: u32,
    pub locator_hashes: Vec<BlockHash>,
    pub hash_stop: BlockHash,
}

impl GetBlocksMessage {
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

    pub fn validate(&self) -> Result<(), WireError> {
        locator::validate(&self.locator_hashes)
    }

    pub fn encoded_len(&self) -> usize {
        locator::encoded_len(self.locator_hashes.len())
    }
}

impl NetworkMessage for GetBlocksMessage {
    fn command(&self) -> Command {
        Command::GetBlocks
    }

    fn payload(&self) -> Vec<u8> {
        locator::encode(self.version, &self.locator_hashes, &self.hash_stop)
    }
}

impl Decode for GetBlocksMessage {
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

impl fmt::Display for GetBlocksMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        locator::fmt_summary(f, "GetBlocks", &self.locator_hashes, &self.hash_stop)
    }
}

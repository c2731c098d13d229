//! Payload layout shared by `getheaders` and `getblocks`.
//!
//! ```text
//! u32     version
//! varint  hash_count
//! hash[]  block_locator_hashes   (hash_count x 32 bytes)
//! hash    hash_stop
//! ```
use std::fmt;

use crate::wire::constants::MAX_LOCATOR_SIZE;
use crate::wire::error::WireError;
use crate::wire::hash::BlockHash;
use crate::wire::reader::PayloadReader;
use crate::wire::varint::varint_len;
use crate::wire::writer::PayloadWriter;

/// Locator hashes shown by the `Display` impls before the list is cut off.
const DISPLAY_LIMIT: usize = 10;

pub(crate) struct LocatorPayload {
    pub version: u32,
    pub locator_hashes: Vec<BlockHash>,
    pub hash_stop: BlockHash,
}

pub(crate) fn encoded_len(hash_count: usize) -> usize {
    4 + varint_len(hash_count as u64) + hash_count * 32 + 32
}

pub(crate) fn encode(version: u32, locator_hashes: &[BlockHash], hash_stop: &BlockHash) -> Vec<u8> {
    let mut writer = PayloadWriter::with_capacity(encoded_len(locator_hashes.len()));

    // the count is always derived from the list it precedes
    writer
        .write_u32(version)
        .write_varint(locator_hashes.len() as u64);

    for hash in locator_hashes {
        writer.write_hash(hash);
    }

    writer.write_hash(hash_stop);
    writer.into_bytes()
}

pub(crate) fn decode(payload: &[u8]) -> Result<LocatorPayload, WireError> {
    let mut reader = PayloadReader::new(payload);

    let version = reader.read_u32("version")?;

    let count = reader.read_varint("hash_count")?;
    if count > MAX_LOCATOR_SIZE as u64 {
        return Err(WireError::MalformedCount {
            count,
            max: MAX_LOCATOR_SIZE,
        });
    }

    let mut locator_hashes = Vec::with_capacity(count as usize);
    for _ in 0..count {
        locator_hashes.push(reader.read_hash("locator_hash")?);
    }

    let hash_stop = reader.read_hash("hash_stop")?;

    Ok(LocatorPayload {
        version,
        locator_hashes,
        hash_stop,
    })
}

pub(crate) fn validate(locator_hashes: &[BlockHash]) -> Result<(), WireError> {
    if locator_hashes.len() > MAX_LOCATOR_SIZE {
        return Err(WireError::LocatorTooLong {
            len: locator_hashes.len(),
            max: MAX_LOCATOR_SIZE,
        });
    }
    Ok(())
}

pub(crate) fn fmt_summary(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    locator_hashes: &[BlockHash],
    hash_stop: &BlockHash,
) -> fmt::Result {
    write!(f, "{}({}: [", name, locator_hashes.len())?;

    for (i, hash) in locator_hashes.iter().take(DISPLAY_LIMIT).enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{hash}")?;
    }

    write!(f, "], hash_stop={hash_stop})")
}

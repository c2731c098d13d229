use std::io;

use thiserror::Error;

/// Errors raised while encoding or decoding message payloads.
///
/// Decode errors abort the whole parse: a partially decoded message is never
/// handed back. What to do with the offending peer is up to the caller.
#[derive(Debug, Error)]
pub enum WireError {
    /// Fewer bytes remain than the field being read requires.
    #[error("truncated input reading {field}: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// A decoded element count exceeds the protocol bound.
    #[error("malformed count: {count} exceeds the maximum of {max}")]
    MalformedCount { count: u64, max: usize },

    /// A hash buffer was not exactly 32 bytes long.
    #[error("invalid hash length: expected 32 bytes, got {0}")]
    InvalidHashLength(usize),

    /// A hash string was not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// A locator built by the caller holds more hashes than peers accept.
    #[error("locator has {len} hashes, peers accept at most {max}")]
    LocatorTooLong { len: usize, max: usize },
}

impl From<WireError> for io::Error {
    fn from(err: WireError) -> Self {
        let kind = match err {
            WireError::TruncatedInput { .. } => io::ErrorKind::UnexpectedEof,
            _ => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, err)
    }
}

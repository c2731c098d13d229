//! Bitcoin P2P wire protocol primitives.
//!
//! It implements:
//! - CompactSize variable-length integers ([`varint`])
//! - A forward-only payload reader and an append-only payload writer
//! - The message contract ([`NetworkMessage`]) and decode dispatch by
//!   command ([`Message`])
//! - The `getheaders` and `getblocks` payload codecs
//! - Framing of payloads with magic, command, length and checksum over any
//!   `Read`/`Write` ([`read_message`], [`send_message`])
//!
//! Protocol reference:
//! https://developer.bitcoin.org/reference/p2p_networking.html
pub mod codec;
pub mod constants;
pub mod error;
pub mod getblocks;
pub mod getheaders;
pub mod hash;
mod locator;
pub mod message;
pub mod reader;
pub mod varint;
pub mod writer;

pub use codec::{checksum, read_message, send_message, write_frame};
pub use error::WireError;
pub use getblocks::GetBlocksMessage;
pub use getheaders::GetHeadersMessage;
pub use hash::BlockHash;
pub use message::{Command, Decode, Message, NetworkMessage, RawMessage};
pub use reader::PayloadReader;
pub use writer::PayloadWriter;

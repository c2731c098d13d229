//! Wire codec for the Bitcoin P2P `getheaders` request and the primitives
//! every message shares.
//!
//! ```
//! use btc_wire::wire::{BlockHash, Decode, GetHeadersMessage, NetworkMessage};
//! use btc_wire::wire::constants::GENESIS_BLOCK_HASH_MAINNET;
//!
//! let request = GetHeadersMessage::new(vec![BlockHash::from(GENESIS_BLOCK_HASH_MAINNET)]);
//! let payload = request.payload();
//!
//! assert_eq!(GetHeadersMessage::decode(&payload).unwrap(), request);
//! ```
pub mod wire;

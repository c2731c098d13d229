/// Network magic value used in the Bitcoin P2P message header.
///
/// The first 4 bytes of every frame identify the network and act as a
/// message boundary marker in the stream. On the wire it is written as a
/// little-endian `u32`, so mainnet frames start with `F9 BE B4 D9`.
///
/// Other network magic values:
/// - Mainnet:  0xD9B4BEF9
/// - Testnet3: 0x0709110B
/// - Regtest:  0xDAB5BFFA
/// - Signet:   0x40CF030A
pub const MAIN_NET_MAGIC: u32 = 0xD9B4BEF9;

/// Protocol version advertised by messages built without an explicit one.
///
/// Serialized as a 32-bit little-endian integer at the start of the
/// `getheaders` and `getblocks` payloads.
///
/// Notable versions: https://developer.bitcoin.org/reference/p2p_networking.html#protocol-versions
pub const PROTOCOL_VERSION: u32 = 70016;

/// The all-zero hash.
///
/// As a `hash_stop` it means "no explicit stop": the peer sends as many
/// headers as its per-message cap allows.
pub const ZERO_HASH: [u8; 32] = [0u8; 32];

/// Maximum number of locator hashes accepted in a single `getheaders` or
/// `getblocks` payload.
///
/// Bitcoin Core disconnects peers that send more (`MAX_LOCATOR_SZ`).
/// Decoding rejects larger counts before allocating anything.
pub const MAX_LOCATOR_SIZE: usize = 101;

/// Maximum number of headers a peer returns for one `getheaders` request.
///
/// A full reply (80-byte header plus a zero tx count each) fits in one frame:
///
/// ```
/// use btc_wire::wire::constants::{MAX_HEADERS_PER_MESSAGE, MAX_PAYLOAD_SIZE};
/// use btc_wire::wire::varint::varint_len;
///
/// let reply = varint_len(MAX_HEADERS_PER_MESSAGE as u64) + MAX_HEADERS_PER_MESSAGE * 81;
/// assert_eq!(reply, 162_003);
/// assert!(reply < MAX_PAYLOAD_SIZE);
/// ```
pub const MAX_HEADERS_PER_MESSAGE: usize = 2000;

/// Upper bound on a frame's payload length (32 MiB).
pub const MAX_PAYLOAD_SIZE: usize = 32 * 1024 * 1024;

/// Size of the frame header: magic + command + length + checksum.
pub const HEADER_SIZE: usize = 24;

/// Width of the zero-padded command field in the frame header.
pub const COMMAND_SIZE: usize = 12;

/// The genesis block hash for Bitcoin mainnet, in internal (wire) byte order.
///
/// Human-readable (reversed) form:
///
/// ```text
/// 000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f
/// ```
pub const GENESIS_BLOCK_HASH_MAINNET: [u8; 32] = [
    0x6f, 0xe2, 0x8c, 0x0a, 0xb6, 0xf1, 0xb3, 0x72, 0xc1, 0xa6, 0xa2, 0x46, 0xae, 0x63, 0xf7, 0x4f,
    0x93, 0x1e, 0x83, 0x65, 0xe1, 0x5a, 0x08, 0x9c, 0x68, 0xd6, 0x19, 0x00, 0x00, 0x00, 0x00, 0x00,
];

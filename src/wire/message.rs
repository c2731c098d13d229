use std::fmt;

use log::trace;

use crate::wire::constants::COMMAND_SIZE;
use crate::wire::error::WireError;
use crate::wire::getblocks::GetBlocksMessage;
use crate::wire::getheaders::GetHeadersMessage;

/// A raw Bitcoin P2P message frame.
///
/// A frame consists of:
/// - 4-byte magic value (network identifier)
/// - 12-byte command
/// - 4-byte payload length
/// - 4-byte checksum
/// - variable-length payload (up to 32MB)
///
/// `RawMessage` carries the header fields and the payload bytes; the payload
/// is interpreted by [`Message::try_from`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    pub command: Command,
    pub payload: Vec<u8>,
    pub magic: [u8; 4],
    pub checksum: [u8; 4],
}

/// Implemented by types that can be decoded from a raw message payload.
pub trait Decode: Sized {
    fn decode(payload: &[u8]) -> Result<Self, WireError>;
}

/// What every message hands to the framer: a command and a payload.
///
/// The framer adds magic, length and checksum; implementors only produce the
/// type-specific body. `payload()` is recomputed on every call.
pub trait NetworkMessage {
    fn command(&self) -> Command;

    fn payload(&self) -> Vec<u8>;
}

/// A decoded Bitcoin P2P message.
///
/// The set of variants is closed. Commands this crate does not decode keep
/// their payload verbatim in [`Message::Unparsed`] so they can still be
/// forwarded or re-framed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Verack,
    GetAddr,
    SendHeaders,
    Mempool,
    GetHeaders(GetHeadersMessage),
    GetBlocks(GetBlocksMessage),

    Unparsed { command: Command, payload: Vec<u8> },
}

impl TryFrom<RawMessage> for Message {
    type Error = WireError;

    fn try_from(raw: RawMessage) -> Result<Self, WireError> {
        let msg = match raw.command {
            Command::Verack => empty_payload(&raw, Message::Verack),
            Command::GetAddr => empty_payload(&raw, Message::GetAddr),
            Command::SendHeaders => empty_payload(&raw, Message::SendHeaders),
            Command::Mempool => empty_payload(&raw, Message::Mempool),
            Command::GetHeaders => Message::GetHeaders(GetHeadersMessage::decode(&raw.payload)?),
            Command::GetBlocks => Message::GetBlocks(GetBlocksMessage::decode(&raw.payload)?),
            command => {
                trace!(
                    "unparsed {} message, payload {}",
                    command,
                    hex::encode(&raw.payload)
                );
                Message::Unparsed {
                    command,
                    payload: raw.payload,
                }
            }
        };

        Ok(msg)
    }
}

/// Commands without a body still decode when a peer attaches one; the extra
/// bytes are dropped.
fn empty_payload(raw: &RawMessage, msg: Message) -> Message {
    if !raw.payload.is_empty() {
        trace!(
            "ignoring {} unexpected payload bytes on {}",
            raw.payload.len(),
            raw.command
        );
    }
    msg
}

impl NetworkMessage for Message {
    fn command(&self) -> Command {
        match self {
            Message::Verack => Command::Verack,
            Message::GetAddr => Command::GetAddr,
            Message::SendHeaders => Command::SendHeaders,
            Message::Mempool => Command::Mempool,
            Message::GetHeaders(m) => m.command(),
            Message::GetBlocks(m) => m.command(),
            Message::Unparsed { command, .. } => *command,
        }
    }

    fn payload(&self) -> Vec<u8> {
        match self {
            Message::Verack | Message::GetAddr | Message::SendHeaders | Message::Mempool => {
                Vec::new()
            }
            Message::GetHeaders(m) => m.payload(),
            Message::GetBlocks(m) => m.payload(),
            Message::Unparsed { payload, .. } => payload.clone(),
        }
    }
}

impl From<GetHeadersMessage> for Message {
    fn from(m: GetHeadersMessage) -> Self {
        Message::GetHeaders(m)
    }
}

impl From<GetBlocksMessage> for Message {
    fn from(m: GetBlocksMessage) -> Self {
        Message::GetBlocks(m)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // Control
    Version,
    Verack,
    Addr,
    AddrV2,
    SendAddrV2,
    GetAddr,
    Ping,
    Pong,
    SendHeaders,
    SendCmpct,
    FeeFilter,
    Reject,
    // Data
    Inv,
    GetData,
    NotFound,
    GetBlocks,
    GetHeaders,
    Headers,
    Block,
    Tx,
    Mempool,
    MerkleBlock,

    /// Any other command, keeping the raw 12-byte field so it can be
    /// written back out unchanged.
    Unknown([u8; COMMAND_SIZE]),
}

impl Command {
    /// Every named command, in the order they are matched on decode.
    pub const ALL: [Command; 22] = [
        Command::Version,
        Command::Verack,
        Command::Addr,
        Command::AddrV2,
        Command::SendAddrV2,
        Command::GetAddr,
        Command::Ping,
        Command::Pong,
        Command::SendHeaders,
        Command::SendCmpct,
        Command::FeeFilter,
        Command::Reject,
        Command::Inv,
        Command::GetData,
        Command::NotFound,
        Command::GetBlocks,
        Command::GetHeaders,
        Command::Headers,
        Command::Block,
        Command::Tx,
        Command::Mempool,
        Command::MerkleBlock,
    ];

    /// ASCII name of a known command. Empty for `Unknown`; its raw field is
    /// available through [`Command::as_bytes`].
    pub fn name(&self) -> &'static str {
        match self {
            Command::Version => "version",
            Command::Verack => "verack",
            Command::Addr => "addr",
            Command::AddrV2 => "addrv2",
            Command::SendAddrV2 => "sendaddrv2",
            Command::GetAddr => "getaddr",
            Command::Ping => "ping",
            Command::Pong => "pong",
            Command::SendHeaders => "sendheaders",
            Command::SendCmpct => "sendcmpct",
            Command::FeeFilter => "feefilter",
            Command::Reject => "reject",
            Command::Inv => "inv",
            Command::GetData => "getdata",
            Command::NotFound => "notfound",
            Command::GetBlocks => "getblocks",
            Command::GetHeaders => "getheaders",
            Command::Headers => "headers",
            Command::Block => "block",
            Command::Tx => "tx",
            Command::Mempool => "mempool",
            Command::MerkleBlock => "merkleblock",
            Command::Unknown(_) => "",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Command::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Returns the 12-byte command field, ASCII padded with zero bytes.
    ///
    /// For `Unknown` this is the field exactly as it was read.
    pub fn as_bytes(&self) -> [u8; COMMAND_SIZE] {
        if let Command::Unknown(field) = self {
            return *field;
        }

        let name = self.name().as_bytes();
        let mut padded = [0u8; COMMAND_SIZE];
        padded[..name.len()].copy_from_slice(name);
        padded
    }
}

impl From<&[u8; COMMAND_SIZE]> for Command {
    fn from(bytes: &[u8; COMMAND_SIZE]) -> Self {
        let name = std::str::from_utf8(bytes)
            .unwrap_or("")
            .trim_end_matches(char::from(0));

        Command::from_name(name).unwrap_or(Command::Unknown(*bytes))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Unknown(field) => {
                let name = String::from_utf8_lossy(field);
                write!(f, "<unknown {:?}>", name.trim_end_matches(char::from(0)))
            }
            c => f.write_str(c.name()),
        }
    }
}

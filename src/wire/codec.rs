use crate::wire::constants::{COMMAND_SIZE, HEADER_SIZE, MAIN_NET_MAGIC, MAX_PAYLOAD_SIZE};
use crate::wire::message::{Command, NetworkMessage, RawMessage};
use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use log::{debug, warn};
use sha2::{Digest, Sha256};
use std::io::{self, Read, Write};

/// First 4 bytes of `SHA256(SHA256(payload))`, the frame checksum.
pub fn checksum(payload: &[u8]) -> [u8; 4] {
    let digest = Sha256::digest(Sha256::digest(payload));
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}

/// Reads a raw Bitcoin P2P message frame from any [`Read`] source.
///
/// This function:
/// 1. Reads the 24-byte message header
/// 2. Extracts magic, command, length and checksum
/// 3. Rejects payload lengths above [`MAX_PAYLOAD_SIZE`] before allocating
/// 4. Reads the payload and verifies its checksum
///
/// It does **not** validate the network magic; that is the session's call.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use btc_wire::wire::{self, BlockHash, Command, GetHeadersMessage};
///
/// let mut bytes = Vec::new();
/// let msg = GetHeadersMessage::new(vec![BlockHash::new([1u8; 32])]);
/// wire::send_message(&mut bytes, &msg).unwrap();
///
/// let raw = wire::read_message(&mut Cursor::new(bytes)).unwrap();
/// assert_eq!(raw.command, Command::GetHeaders);
/// assert_eq!(raw.payload.len(), 69);
/// ```
///
/// # Errors
///
/// `UnexpectedEof` if the stream ends mid-frame, `InvalidData` for an
/// oversized length or a checksum mismatch, and any error from the reader.
pub fn read_message<R: Read>(reader: &mut R) -> io::Result<RawMessage> {
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;

    let mut magic = [0u8; 4];
    magic.copy_from_slice(&header[0..4]);

    let mut cmd = [0u8; COMMAND_SIZE];
    cmd.copy_from_slice(&header[4..16]);
    let command = Command::from(&cmd);

    let length = LittleEndian::read_u32(&header[16..20]) as usize;

    let mut expected = [0u8; 4];
    expected.copy_from_slice(&header[20..24]);

    if length > MAX_PAYLOAD_SIZE {
        warn!("rejecting {command} frame: payload length {length} exceeds {MAX_PAYLOAD_SIZE}");
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("payload length {length} exceeds {MAX_PAYLOAD_SIZE}"),
        ));
    }

    let mut payload = vec![0u8; length];
    reader.read_exact(&mut payload)?;

    let actual = checksum(&payload);
    if actual != expected {
        warn!(
            "rejecting {command} frame: checksum {} != {}",
            hex::encode(actual),
            hex::encode(expected)
        );
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "payload checksum mismatch",
        ));
    }

    debug!("read {command} frame, payload_len: {length}");

    Ok(RawMessage {
        magic,
        command,
        payload,
        checksum: expected,
    })
}

/// Frames `message` for mainnet and writes it to `writer`.
///
/// The payload is computed once and handed to [`write_frame`].
pub fn send_message<W: Write, M: NetworkMessage + ?Sized>(
    writer: &mut W,
    message: &M,
) -> io::Result<()> {
    write_frame(writer, MAIN_NET_MAGIC, message.command(), &message.payload())
}

/// Writes a complete Bitcoin P2P message frame to the given writer.
///
/// ```text
/// +------------+--------------+---------------+------------+
/// | magic (4)  | command (12) | length (4 LE) | checksum(4)|
/// +------------+--------------+---------------+------------+
/// | payload (variable)                                ...  |
/// +----------------------------------------------------------
/// ```
///
/// # Arguments
///
/// * `writer`  - Any type implementing [`Write`] (`TcpStream`, `Vec<u8>`, ...)
/// * `magic`   - Network magic, e.g. [`MAIN_NET_MAGIC`]
/// * `command` - The command to send
/// * `payload` - The raw payload bytes
///
/// # Errors
///
/// `InvalidInput` for a payload above [`MAX_PAYLOAD_SIZE`] or an all-zero
/// command field (no peer can route it), otherwise any error from the
/// underlying stream.
pub fn write_frame<W: Write>(
    writer: &mut W,
    magic: u32,
    command: Command,
    payload: &[u8],
) -> io::Result<()> {
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("payload length {} exceeds {MAX_PAYLOAD_SIZE}", payload.len()),
        ));
    }

    let command_field = command.as_bytes();
    if command_field == [0u8; COMMAND_SIZE] {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "empty command field",
        ));
    }

    let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len());

    frame.write_u32::<LittleEndian>(magic)?;
    frame.write_all(&command_field)?;
    frame.write_u32::<LittleEndian>(payload.len() as u32)?;
    frame.write_all(&checksum(payload))?;
    frame.write_all(payload)?;

    writer.write_all(&frame)?;

    debug!("wrote {command} frame, payload_len: {}", payload.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::hash::BlockHash;
    use crate::wire::message::Message;
    use crate::wire::GetHeadersMessage;
    use std::io::Cursor;

    /// Builds a full frame by hand (header + payload).
    fn build_frame(cmd_str: &[u8], payload: &[u8]) -> Vec<u8> {
        let mut bytes = vec![];

        // magic
        bytes.extend_from_slice(&[0xF9, 0xBE, 0xB4, 0xD9]);

        // command padded to 12 bytes
        let mut cmd = [0u8; 12];
        cmd[..cmd_str.len()].copy_from_slice(cmd_str);
        bytes.extend_from_slice(&cmd);

        bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&checksum(payload));
        bytes.extend_from_slice(payload);

        bytes
    }

    #[test]
    fn empty_payload_checksum_is_well_known() {
        assert_eq!(checksum(&[]), [0x5D, 0xF6, 0xE0, 0xE2]);
    }

    #[test]
    fn send_message_writes_exact_header() {
        let msg = GetHeadersMessage::with_stop(70015, vec![], BlockHash::ZERO);
        let mut out = Vec::new();

        send_message(&mut out, &msg).unwrap();

        assert_eq!(&out[0..4], &[0xF9, 0xBE, 0xB4, 0xD9]);
        assert_eq!(&out[4..16], b"getheaders\0\0");
        assert_eq!(&out[16..20], &37u32.to_le_bytes());
        assert_eq!(&out[20..24], &checksum(&msg.payload()));
        assert_eq!(&out[24..], &msg.payload()[..]);
    }

    #[test]
    fn hand_built_frame_is_read_back() {
        let payload = GetHeadersMessage::new(vec![BlockHash::new([1u8; 32])]).payload();
        let mut cursor = Cursor::new(build_frame(b"getheaders", &payload));

        let raw = read_message(&mut cursor).unwrap();

        assert_eq!(raw.command, Command::GetHeaders);
        assert_eq!(raw.magic, [0xF9, 0xBE, 0xB4, 0xD9]);
        assert_eq!(raw.payload, payload);
    }

    #[test]
    fn getheaders_survives_the_frame() {
        let sent = GetHeadersMessage::with_stop(
            70015,
            vec![BlockHash::new([1u8; 32]), BlockHash::new([2u8; 32])],
            BlockHash::new([3u8; 32]),
        );
        let mut out = Vec::new();
        send_message(&mut out, &sent).unwrap();

        let raw = read_message(&mut Cursor::new(out)).unwrap();

        assert_eq!(Message::try_from(raw).unwrap(), Message::GetHeaders(sent));
    }

    #[test]
    fn frames_can_be_read_back_to_back() {
        let mut out = Vec::new();
        send_message(&mut out, &Message::Verack).unwrap();
        send_message(&mut out, &GetHeadersMessage::new(vec![])).unwrap();

        let mut cursor = Cursor::new(out);

        assert_eq!(read_message(&mut cursor).unwrap().command, Command::Verack);
        assert_eq!(read_message(&mut cursor).unwrap().command, Command::GetHeaders);
        assert_eq!(
            read_message(&mut cursor).unwrap_err().kind(),
            io::ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn corrupted_checksum_is_rejected() {
        let mut bytes = build_frame(b"getheaders", &GetHeadersMessage::new(vec![]).payload());
        bytes[20] ^= 0xFF;

        let err = read_message(&mut Cursor::new(bytes)).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn oversized_length_is_rejected_before_reading_payload() {
        let mut bytes = build_frame(b"block", &[]);
        bytes[16..20].copy_from_slice(&u32::MAX.to_le_bytes());

        let err = read_message(&mut Cursor::new(bytes)).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn truncated_payload_is_eof() {
        let mut bytes = build_frame(b"getheaders", &GetHeadersMessage::new(vec![]).payload());
        bytes.truncate(bytes.len() - 1);

        let err = read_message(&mut Cursor::new(bytes)).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn unknown_command_preserved_in_payload() {
        let mut cursor = Cursor::new(build_frame(b"wtfmessage", &[1, 2, 3]));

        let raw = read_message(&mut cursor).unwrap();
        assert!(matches!(raw.command, Command::Unknown(_)));
        assert_eq!(&raw.command.as_bytes()[..10], b"wtfmessage");
        assert_eq!(raw.payload, vec![1, 2, 3]);
    }

    #[test]
    fn unrecognised_command_is_reframed_unchanged() {
        let frame = build_frame(b"wtxidrl", &[0xCA, 0xFE]);

        let raw = read_message(&mut Cursor::new(frame.clone())).unwrap();
        let msg = Message::try_from(raw).unwrap();

        let mut out = Vec::new();
        send_message(&mut out, &msg).unwrap();

        assert_eq!(out, frame);
    }

    #[test]
    fn empty_command_field_is_not_written() {
        let mut out = Vec::new();

        let err =
            write_frame(&mut out, MAIN_NET_MAGIC, Command::Unknown([0u8; 12]), &[]).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(out.is_empty());
    }
}

use std::io::Cursor;

use btc_wire::wire::constants::{MAX_LOCATOR_SIZE, PROTOCOL_VERSION, ZERO_HASH};
use btc_wire::wire::varint::{encode_varint, varint_len};
use btc_wire::wire::{
    self, BlockHash, Command, Decode, GetHeadersMessage, Message, NetworkMessage, PayloadReader,
    WireError,
};
use proptest::prelude::*;

fn block_hash() -> impl Strategy<Value = BlockHash> {
    any::<[u8; 32]>().prop_map(BlockHash::from)
}

fn getheaders() -> impl Strategy<Value = GetHeadersMessage> {
    (
        any::<u32>(),
        prop::collection::vec(block_hash(), 0..=MAX_LOCATOR_SIZE),
        block_hash(),
    )
        .prop_map(|(version, locator, stop)| GetHeadersMessage::with_stop(version, locator, stop))
}

proptest! {
    #[test]
    fn payload_round_trips(msg in getheaders()) {
        let payload = msg.payload();

        prop_assert_eq!(payload.len(), msg.encoded_len());
        prop_assert_eq!(GetHeadersMessage::decode(&payload).unwrap(), msg);
    }

    #[test]
    fn encoded_count_matches_hash_blocks(msg in getheaders()) {
        let payload = msg.payload();
        let mut reader = PayloadReader::new(&payload);

        reader.read_u32("version").unwrap();
        let count = reader.read_varint("hash_count").unwrap();

        prop_assert_eq!(count as usize, msg.locator_hashes.len());
        prop_assert_eq!(reader.remaining(), (msg.locator_hashes.len() + 1) * 32);
    }

    #[test]
    fn every_strict_prefix_is_truncated(msg in getheaders(), cut in any::<prop::sample::Index>()) {
        let payload = msg.payload();
        let len = cut.index(payload.len());

        let err = GetHeadersMessage::decode(&payload[..len]).unwrap_err();

        let is_truncated = matches!(err, WireError::TruncatedInput { .. });
        prop_assert!(is_truncated);
    }

    #[test]
    fn varint_round_trips(value in any::<u64>()) {
        let encoded = encode_varint(value);
        let mut reader = PayloadReader::new(&encoded);

        prop_assert_eq!(encoded.len(), varint_len(value));
        prop_assert_eq!(reader.read_varint("value").unwrap(), value);
        prop_assert!(reader.is_empty());
    }
}

#[test]
fn single_locator_scenario_bytes() {
    let msg = GetHeadersMessage::with_stop(70015, vec![BlockHash::new([0x01; 32])], BlockHash::ZERO);

    let mut expected = vec![0x7F, 0x11, 0x01, 0x00, 0x01];
    expected.extend_from_slice(&[0x01; 32]);
    expected.extend_from_slice(&[0x00; 32]);

    assert_eq!(msg.payload(), expected);
    assert_eq!(GetHeadersMessage::decode(&expected).unwrap(), msg);
}

#[test]
fn built_from_locator_alone() {
    let msg = GetHeadersMessage::new(vec![BlockHash::new([0x22; 32])]);

    assert_eq!(msg.version, PROTOCOL_VERSION);
    assert_eq!(msg.hash_stop.to_bytes(), ZERO_HASH);
}

#[test]
fn oversized_count_is_rejected_without_reading_hashes() {
    let mut payload = 70016u32.to_le_bytes().to_vec();
    payload.extend_from_slice(&[0xFE, 0x00, 0x00, 0x00, 0x80]); // 2^31 hashes

    let err = GetHeadersMessage::decode(&payload).unwrap_err();

    assert!(matches!(err, WireError::MalformedCount { count: 0x8000_0000, .. }));
}

#[test]
fn message_sent_over_a_stream_decodes_by_command() {
    let sent = GetHeadersMessage::with_stop(
        70016,
        vec![BlockHash::new([0xAA; 32]), BlockHash::new([0xBB; 32])],
        BlockHash::new([0xCC; 32]),
    );

    let mut stream = Vec::new();
    wire::send_message(&mut stream, &sent).unwrap();

    let raw = wire::read_message(&mut Cursor::new(stream)).unwrap();
    assert_eq!(raw.command, Command::GetHeaders);

    match Message::try_from(raw).unwrap() {
        Message::GetHeaders(received) => assert_eq!(received, sent),
        other => panic!("unexpected message: {other:?}"),
    }
}

#[test]
fn decode_errors_convert_to_io_errors() {
    fn parse(payload: &[u8]) -> std::io::Result<GetHeadersMessage> {
        Ok(GetHeadersMessage::decode(payload)?)
    }

    let err = parse(&[0x7F, 0x11]).unwrap_err();

    assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
}

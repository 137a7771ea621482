//! Codec Tests
//!
//! Tests for frame and operation encoding/decoding over in-memory streams.

use std::io::Cursor;

use bytes::Bytes;
use framekv::protocol::{
    encode_frame, encode_operation, read_frame, read_op, read_op_tag, read_result_tag,
    write_frame, write_op, write_op_tag, write_result_tag, OpType, Operation, ResultTag,
    MAX_FRAME_LEN,
};
use framekv::KvError;

// =============================================================================
// Frame Tests
// =============================================================================

#[test]
fn test_frame_round_trip_boundary_lengths() {
    for len in [0usize, 1, 127, 254, 255] {
        let payload: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();

        let mut buffer = Vec::new();
        write_frame(&mut buffer, &payload).unwrap();
        assert_eq!(buffer.len(), 1 + len);
        assert_eq!(buffer[0] as usize, len);

        let mut cursor = Cursor::new(buffer);
        let decoded = read_frame(&mut cursor).unwrap();
        assert_eq!(decoded.as_ref(), payload.as_slice());
    }
}

#[test]
fn test_frame_too_large_writes_nothing() {
    let payload = vec![0xABu8; MAX_FRAME_LEN + 1];
    let mut buffer = Vec::new();

    let result = write_frame(&mut buffer, &payload);

    assert!(matches!(result, Err(KvError::FrameTooLarge(256))));
    assert!(buffer.is_empty());
    assert!(encode_frame(&payload).is_err());
}

#[test]
fn test_frame_short_payload() {
    // Declares 5 bytes, carries 2
    let bytes = [0x05, b'h', b'i'];
    let mut cursor = Cursor::new(&bytes[..]);

    match read_frame(&mut cursor) {
        Err(KvError::ShortRead { expected, got }) => {
            assert_eq!(expected, 5);
            assert_eq!(got, 2);
        }
        other => panic!("Expected ShortRead, got {:?}", other),
    }
}

#[test]
fn test_frame_missing_length_byte() {
    let mut cursor = Cursor::new(Vec::<u8>::new());
    assert!(matches!(
        read_frame(&mut cursor),
        Err(KvError::ShortRead { expected: 1, got: 0 })
    ));
}

#[test]
fn test_frame_binary_data() {
    let payload: Vec<u8> = vec![0x00, 0x01, 0xFF, 0xFE, 0x80];
    let encoded = encode_frame(&payload).unwrap();
    assert_eq!(encoded, vec![0x05, 0x00, 0x01, 0xFF, 0xFE, 0x80]);
}

// =============================================================================
// Operation Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_encode_decode_get() {
    let op = Operation::get(Bytes::from_static(b"hello"));
    let encoded = encode_operation(&op).unwrap();
    let decoded = read_op(&mut Cursor::new(encoded)).unwrap();

    assert_eq!(decoded, op);
    assert_eq!(decoded.op_type(), OpType::Get);
}

#[test]
fn test_encode_decode_set() {
    let op = Operation::set(Bytes::from_static(b"mykey"), Bytes::from_static(b"myvalue"));
    let encoded = encode_operation(&op).unwrap();
    let decoded = read_op(&mut Cursor::new(encoded)).unwrap();

    match decoded {
        Operation::Set { key, value } => {
            assert_eq!(key.as_ref(), b"mykey");
            assert_eq!(value.as_ref(), b"myvalue");
        }
        _ => panic!("Expected SET operation"),
    }
}

#[test]
fn test_encode_decode_empty_key_and_value() {
    let op = Operation::set(Bytes::new(), Bytes::new());
    let encoded = encode_operation(&op).unwrap();
    assert_eq!(encoded, vec![0x02, 0x00, 0x00]);

    let decoded = read_op(&mut Cursor::new(encoded)).unwrap();
    assert_eq!(decoded, op);
}

#[test]
fn test_write_op_rejects_oversize_value_before_writing() {
    let op = Operation::set(Bytes::from_static(b"k"), Bytes::from(vec![0u8; 300]));
    let mut buffer = Vec::new();

    let result = write_op(&mut buffer, &op);

    assert!(matches!(result, Err(KvError::FrameTooLarge(300))));
    assert!(buffer.is_empty());
}

// =============================================================================
// Tag Tests
// =============================================================================

#[test]
fn test_unknown_op_tag() {
    let bytes = [99u8, 0x01, b'x'];
    let result = read_op(&mut Cursor::new(&bytes[..]));
    assert!(matches!(result, Err(KvError::UnknownOpTag(99))));
}

#[test]
fn test_reserved_delete_tag_is_rejected() {
    let bytes = [0x03u8, 0x03, b'f', b'o', b'o'];

    // The tag itself is known...
    assert_eq!(read_op_tag(&mut Cursor::new(&bytes[..])).unwrap(), OpType::Delete);

    // ...but it has no decode path
    let result = read_op(&mut Cursor::new(&bytes[..]));
    assert!(matches!(result, Err(KvError::UnknownOpTag(0x03))));
}

#[test]
fn test_op_tag_values() {
    let mut buffer = Vec::new();
    write_op_tag(&mut buffer, OpType::Get).unwrap();
    write_op_tag(&mut buffer, OpType::Set).unwrap();
    write_op_tag(&mut buffer, OpType::Delete).unwrap();
    assert_eq!(buffer, vec![0x01, 0x02, 0x03]);
}

#[test]
fn test_result_tags() {
    let mut buffer = Vec::new();
    write_result_tag(&mut buffer, ResultTag::Success).unwrap();
    write_result_tag(&mut buffer, ResultTag::Error).unwrap();
    assert_eq!(buffer, vec![0x01, 0x02]);

    let mut cursor = Cursor::new(buffer);
    assert_eq!(read_result_tag(&mut cursor).unwrap(), ResultTag::Success);
    assert_eq!(read_result_tag(&mut cursor).unwrap(), ResultTag::Error);
}

#[test]
fn test_unknown_result_tag() {
    let bytes = [0x00u8];
    let result = read_result_tag(&mut Cursor::new(&bytes[..]));
    assert!(matches!(result, Err(KvError::UnknownResultTag(0x00))));
}

#[test]
fn test_eof_before_tag_is_io_error() {
    let result = read_op(&mut Cursor::new(Vec::<u8>::new()));
    match result {
        Err(KvError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
        other => panic!("Expected Io(UnexpectedEof), got {:?}", other),
    }
}

#[test]
fn test_truncated_set_value() {
    // SET "foo" with value declared as 3 bytes, only 1 present
    let bytes = [0x02u8, 0x03, b'f', b'o', b'o', 0x03, b'b'];
    let result = read_op(&mut Cursor::new(&bytes[..]));
    assert!(matches!(result, Err(KvError::ShortRead { expected: 3, got: 1 })));
}

// =============================================================================
// Stream Tests
// =============================================================================

#[test]
fn test_stream_multiple_operations() {
    let ops = vec![
        Operation::set(Bytes::from_static(b"k1"), Bytes::from_static(b"v1")),
        Operation::get(Bytes::from_static(b"k1")),
        Operation::get(Bytes::from_static(b"k2")),
        Operation::set(Bytes::from_static(b"k2"), Bytes::from(vec![7u8; 255])),
    ];

    let mut buffer = Vec::new();
    for op in &ops {
        write_op(&mut buffer, op).unwrap();
    }

    let mut cursor = Cursor::new(buffer);
    for expected in &ops {
        assert_eq!(&read_op(&mut cursor).unwrap(), expected);
    }
}

// =============================================================================
// Wire Format Verification Tests
// =============================================================================

#[test]
fn test_wire_format_set() {
    let op = Operation::set(Bytes::from_static(b"foo"), Bytes::from_static(b"bar"));
    let encoded = encode_operation(&op).unwrap();

    // [0x02][0x03][f o o][0x03][b a r]
    assert_eq!(encoded, vec![0x02, 0x03, b'f', b'o', b'o', 0x03, b'b', b'a', b'r']);
}

#[test]
fn test_wire_format_get() {
    let op = Operation::get(Bytes::from_static(b"test"));
    let encoded = encode_operation(&op).unwrap();

    // [0x01][0x04][t e s t]
    assert_eq!(encoded, vec![0x01, 0x04, b't', b'e', b's', b't']);
}

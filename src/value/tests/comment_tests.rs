//! Tests for the Exif user comment value

use crate::io::byte_order::ByteOrder;
use crate::value::{CharsetId, CommentValue};

#[test]
fn test_ascii_comment_binary_round_trip() {
    let mut wire = b"ASCII\0\0\0".to_vec();
    wire.extend_from_slice(b"hello world\0\0");

    let mut comment = CommentValue::default();
    comment.read_binary(&wire, ByteOrder::LittleEndian).unwrap();
    assert_eq!(comment.charset, CharsetId::Ascii);
    assert_eq!(comment.comment(), "hello world");
    assert_eq!(comment.copy(ByteOrder::LittleEndian), wire);
}

#[test]
fn test_charset_prefix_parsing() {
    let mut comment = CommentValue::default();
    comment.read_str("charset=\"Ascii\" a comment").unwrap();
    assert_eq!(comment.charset, CharsetId::Ascii);
    assert_eq!(comment.comment(), "a comment");

    let mut comment = CommentValue::default();
    assert!(comment.read_str("charset=\"Klingon\" text").is_err());
}

#[test]
fn test_unicode_comment_recode() {
    let mut comment = CommentValue::default();
    comment.read_str("charset=\"Unicode\" caf\u{e9}").unwrap();
    assert_eq!(comment.charset, CharsetId::Unicode);

    // UCS-2 payload: 4 chars, 2 bytes each, little-endian default
    assert_eq!(comment.raw.len(), 8);
    assert_eq!(comment.comment(), "caf\u{e9}");

    let wire = comment.copy(ByteOrder::LittleEndian);
    let mut back = CommentValue::default();
    back.read_binary(&wire, ByteOrder::LittleEndian).unwrap();
    assert_eq!(back.comment(), "caf\u{e9}");
}

#[test]
fn test_unicode_comment_swaps_to_target_byte_order() {
    let mut comment = CommentValue::default();
    comment.read_str("charset=\"Unicode\" Hi").unwrap();

    // Encoded little-endian internally, swapped for a big-endian blob
    let wire = comment.copy(ByteOrder::BigEndian);
    assert_eq!(&wire[8..], &[0x00, b'H', 0x00, b'i']);

    let mut back = CommentValue::default();
    back.read_binary(&wire, ByteOrder::BigEndian).unwrap();
    assert_eq!(back.comment(), "Hi");
}

#[test]
fn test_unicode_comment_read_big_endian_written_little_endian() {
    let mut wire = b"UNICODE\0".to_vec();
    wire.extend_from_slice(&[0x00, b'A', 0x00, b'B']);
    let mut comment = CommentValue::default();
    comment.read_binary(&wire, ByteOrder::BigEndian).unwrap();
    assert_eq!(comment.comment(), "AB");

    let out = comment.copy(ByteOrder::LittleEndian);
    assert_eq!(&out[8..], &[b'A', 0x00, b'B', 0x00]);
}

#[test]
fn test_undefined_comment_bom_sniffing() {
    // UTF-8 BOM
    let mut wire = vec![0u8; 8];
    wire.extend_from_slice(&[0xEF, 0xBB, 0xBF]);
    wire.extend_from_slice("gr\u{fc}n".as_bytes());
    let mut comment = CommentValue::default();
    comment.read_binary(&wire, ByteOrder::LittleEndian).unwrap();
    assert_eq!(comment.comment(), "gr\u{fc}n");

    // UCS-2 big-endian BOM
    let mut wire = vec![0u8; 8];
    wire.extend_from_slice(&[0xFE, 0xFF, 0x00, 0x41, 0x00, 0x42]);
    let mut comment = CommentValue::default();
    comment.read_binary(&wire, ByteOrder::LittleEndian).unwrap();
    assert_eq!(comment.comment(), "AB");
}

#[test]
fn test_short_buffer_is_an_error() {
    let mut comment = CommentValue::default();
    assert!(comment.read_binary(b"ASCII", ByteOrder::LittleEndian).is_err());
}

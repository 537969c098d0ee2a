//! Tests for the IPTC IIM codec

use crate::iptc::{decode, encode};
use crate::metadata::containers::IptcData;
use crate::value::Value;

fn dataset(record: u8, number: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![0x1C, record, number];
    out.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

#[test]
fn test_decode_string_and_short_datasets() {
    let mut blob = dataset(2, 0, &[0x00, 0x04]);
    blob.extend(dataset(2, 5, b"Sunset"));
    blob.extend(dataset(2, 25, b"beach"));
    blob.extend(dataset(2, 25, b"summer"));

    let data = decode(&blob).unwrap();
    assert_eq!(data.len(), 4);
    assert_eq!(data.find_key("Iptc.Application2.RecordVersion").unwrap().to_string(), "4");
    assert_eq!(data.find_key("Iptc.Application2.ObjectName").unwrap().to_string(), "Sunset");

    let keywords: Vec<String> = data
        .iter()
        .filter(|m| m.key == "Iptc.Application2.Keywords")
        .map(|m| m.value.to_string())
        .collect();
    assert_eq!(keywords, vec!["beach".to_string(), "summer".to_string()]);
}

#[test]
fn test_decode_date_and_time() {
    let mut blob = dataset(2, 55, b"20240229");
    blob.extend(dataset(2, 60, b"143015+0100"));

    let data = decode(&blob).unwrap();
    assert_eq!(data.find_key("Iptc.Application2.DateCreated").unwrap().to_string(), "2024-02-29");
    assert_eq!(data.find_key("Iptc.Application2.TimeCreated").unwrap().to_string(), "14:30:15+01:00");
}

#[test]
fn test_decode_rejects_bad_marker_and_truncation() {
    assert!(decode(&[0x1B, 2, 5, 0, 0]).is_err());
    // Length field says 10 bytes but only 2 follow
    let mut truncated = vec![0x1C, 2, 5, 0x00, 0x0A];
    truncated.extend_from_slice(b"ab");
    assert!(decode(&truncated).is_err());
}

#[test]
fn test_decode_rejects_extended_length() {
    let blob = vec![0x1C, 2, 5, 0x80, 0x04];
    assert!(matches!(decode(&blob), Err(crate::errors::MetaError::NotSupported(_))));
}

#[test]
fn test_encode_round_trip() {
    let mut data = IptcData::new();
    data.add("Iptc.Application2.RecordVersion", Value::Short(vec![4])).unwrap();
    data.add("Iptc.Application2.Keywords", Value::ascii_from_str("beach")).unwrap();
    data.add("Iptc.Application2.Keywords", Value::ascii_from_str("summer")).unwrap();
    data.add("Iptc.Application2.City", Value::ascii_from_str("Lisbon")).unwrap();

    let blob = encode(&data).unwrap();
    let decoded = decode(&blob).unwrap();
    assert_eq!(decoded.len(), 4);
    assert_eq!(decoded.find_key("Iptc.Application2.City").unwrap().to_string(), "Lisbon");

    // Strings are length-delimited, no NUL terminator on the wire
    let reencoded = encode(&decoded).unwrap();
    assert_eq!(blob, reencoded);
}

#[test]
fn test_unknown_record_is_skipped() {
    let mut blob = dataset(7, 10, b"objectdata");
    blob.extend(dataset(2, 5, b"Kept"));

    let data = decode(&blob).unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data.find_key("Iptc.Application2.ObjectName").unwrap().to_string(), "Kept");
}

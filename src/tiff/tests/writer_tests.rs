//! Tests for the Exif blob writer

use crate::io::byte_order::ByteOrder;
use crate::metadata::containers::ExifData;
use crate::tiff::reader::ExifReader;
use crate::tiff::writer::ExifWriter;
use crate::value::Value;

fn sample_data() -> ExifData {
    let mut data = ExifData::new();
    data.add("Exif.Image.Make", Value::ascii_from_str("TestCam")).unwrap();
    data.add("Exif.Image.Orientation", Value::Short(vec![1])).unwrap();
    data.add("Exif.Photo.ExposureTime", Value::Rational(vec![(1, 125)])).unwrap();
    data.add("Exif.Photo.FNumber", Value::Rational(vec![(28, 10)])).unwrap();
    data.add("Exif.GPSInfo.GPSLatitudeRef", Value::ascii_from_str("N")).unwrap();
    data
}

#[test]
fn test_encode_decode_round_trip() {
    let writer = ExifWriter::new(ByteOrder::LittleEndian);
    let blob = writer.encode(&sample_data()).unwrap();

    let mut reader = ExifReader::new();
    let decoded = reader.decode(&blob).unwrap();

    assert_eq!(decoded.find_key("Exif.Image.Make").unwrap().to_string(), "TestCam");
    assert_eq!(decoded.find_key("Exif.Image.Orientation").unwrap().to_u32(0), Some(1));
    assert_eq!(decoded.find_key("Exif.Photo.ExposureTime").unwrap().to_string(), "1/125");
    assert_eq!(decoded.find_key("Exif.Photo.FNumber").unwrap().to_string(), "28/10");
    assert_eq!(decoded.find_key("Exif.GPSInfo.GPSLatitudeRef").unwrap().to_string(), "N");
}

#[test]
fn test_reencode_is_byte_identical() {
    let writer = ExifWriter::new(ByteOrder::LittleEndian);
    let first = writer.encode(&sample_data()).unwrap();

    let mut reader = ExifReader::new();
    let decoded = reader.decode(&first).unwrap();
    let second = ExifWriter::new(decoded.byte_order).encode(&decoded).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_big_endian_output() {
    let writer = ExifWriter::new(ByteOrder::BigEndian);
    let blob = writer.encode(&sample_data()).unwrap();
    assert_eq!(&blob[..2], b"MM");

    let mut reader = ExifReader::new();
    let decoded = reader.decode(&blob).unwrap();
    assert_eq!(decoded.byte_order, ByteOrder::BigEndian);
    assert_eq!(decoded.find_key("Exif.Image.Make").unwrap().to_string(), "TestCam");
}

#[test]
fn test_empty_container_still_produces_valid_blob() {
    let writer = ExifWriter::new(ByteOrder::LittleEndian);
    let blob = writer.encode(&ExifData::new()).unwrap();
    // Header plus an empty IFD0
    assert_eq!(blob.len(), 14);

    let mut reader = ExifReader::new();
    let decoded = reader.decode(&blob).unwrap();
    assert!(decoded.is_empty());
}

#[test]
fn test_thumbnail_is_relocated() {
    let mut data = sample_data();
    data.thumbnail = Some(vec![0xFF, 0xD8, 0x01, 0x02, 0xFF, 0xD9]);

    let writer = ExifWriter::new(ByteOrder::LittleEndian);
    let blob = writer.encode(&data).unwrap();

    let mut reader = ExifReader::new();
    let decoded = reader.decode(&blob).unwrap();
    assert_eq!(decoded.thumbnail, Some(vec![0xFF, 0xD8, 0x01, 0x02, 0xFF, 0xD9]));
    assert_eq!(
        decoded.find_key("Exif.Thumbnail.JPEGInterchangeFormatLength").unwrap().to_u32(0),
        Some(6)
    );
}

#[test]
fn test_cleared_thumbnail_drops_stale_offset_tags() {
    let mut data = sample_data();
    data.thumbnail = Some(vec![0xFF, 0xD8, 0xFF, 0xD9]);
    let blob = ExifWriter::new(ByteOrder::LittleEndian).encode(&data).unwrap();

    let mut reader = ExifReader::new();
    let mut decoded = reader.decode(&blob).unwrap();
    decoded.thumbnail = None;

    let blob = ExifWriter::new(ByteOrder::LittleEndian).encode(&decoded).unwrap();
    let mut reader = ExifReader::new();
    let reparsed = reader.decode(&blob).unwrap();
    assert_eq!(reparsed.thumbnail, None);
    assert!(reparsed.find_key("Exif.Thumbnail.JPEGInterchangeFormat").is_none());
    assert!(reparsed.find_key("Exif.Thumbnail.JPEGInterchangeFormatLength").is_none());
    assert_eq!(reparsed.find_key("Exif.Image.Make").unwrap().to_string(), "TestCam");
}

#[test]
fn test_duplicate_tags_keep_last_occurrence() {
    let mut data = ExifData::new();
    data.add("Exif.Image.Make", Value::ascii_from_str("First")).unwrap();
    data.add("Exif.Image.Make", Value::ascii_from_str("Second")).unwrap();

    let writer = ExifWriter::new(ByteOrder::LittleEndian);
    let blob = writer.encode(&data).unwrap();

    let mut reader = ExifReader::new();
    let decoded = reader.decode(&blob).unwrap();
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded.find_key("Exif.Image.Make").unwrap().to_string(), "Second");
}

#[test]
fn test_maker_note_round_trips_verbatim() {
    let mut data = ExifData::new();
    data.add("Exif.Image.Make", Value::ascii_from_str("Acme")).unwrap();
    let note = vec![0xAA; 33];
    data.add("Exif.Photo.MakerNote", Value::Undefined(note.clone())).unwrap();

    let writer = ExifWriter::new(ByteOrder::LittleEndian);
    let blob = writer.encode(&data).unwrap();

    let mut reader = ExifReader::new();
    let decoded = reader.decode(&blob).unwrap();
    assert_eq!(
        decoded.find_key("Exif.Photo.MakerNote").unwrap(),
        &Value::Undefined(note)
    );
}

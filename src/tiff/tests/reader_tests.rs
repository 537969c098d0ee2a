//! Tests for the Exif blob reader

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

use crate::errors::MetaError;
use crate::io::byte_order::ByteOrder;
use crate::tiff::reader::ExifReader;
use crate::value::Value;

/// A minimal little-endian blob with one external ASCII entry
fn minimal_le_blob() -> Vec<u8> {
    let mut b = Vec::new();
    b.extend_from_slice(b"II");
    b.write_u16::<LittleEndian>(42).unwrap();
    b.write_u32::<LittleEndian>(8).unwrap();
    // IFD0 at 8: one entry, Make, external payload at 26
    b.write_u16::<LittleEndian>(1).unwrap();
    b.write_u16::<LittleEndian>(0x010F).unwrap();
    b.write_u16::<LittleEndian>(2).unwrap();
    b.write_u32::<LittleEndian>(8).unwrap();
    b.write_u32::<LittleEndian>(26).unwrap();
    b.write_u32::<LittleEndian>(0).unwrap();
    b.extend_from_slice(b"TestCam\0");
    b
}

#[test]
fn test_decode_minimal_little_endian() {
    let mut reader = ExifReader::new();
    let data = reader.decode(&minimal_le_blob()).unwrap();

    assert_eq!(data.byte_order, ByteOrder::LittleEndian);
    assert_eq!(data.len(), 1);
    assert_eq!(data.find_key("Exif.Image.Make").unwrap().to_string(), "TestCam");
}

#[test]
fn test_decode_big_endian() {
    let mut b = Vec::new();
    b.extend_from_slice(b"MM");
    b.write_u16::<BigEndian>(42).unwrap();
    b.write_u32::<BigEndian>(8).unwrap();
    // Inline Short entry: Orientation = 6
    b.write_u16::<BigEndian>(1).unwrap();
    b.write_u16::<BigEndian>(0x0112).unwrap();
    b.write_u16::<BigEndian>(3).unwrap();
    b.write_u32::<BigEndian>(1).unwrap();
    b.write_u16::<BigEndian>(6).unwrap();
    b.write_u16::<BigEndian>(0).unwrap();
    b.write_u32::<BigEndian>(0).unwrap();

    let mut reader = ExifReader::new();
    let data = reader.decode(&b).unwrap();

    assert_eq!(data.byte_order, ByteOrder::BigEndian);
    assert_eq!(data.find_key("Exif.Image.Orientation").unwrap().to_u32(0), Some(6));
}

#[test]
fn test_decode_rejects_bad_headers() {
    let mut reader = ExifReader::new();
    assert!(matches!(reader.decode(b"XX\x2A\x00\x08\x00\x00\x00"), Err(MetaError::InvalidByteOrder(_))));
    assert!(matches!(reader.decode(b"II\x2B\x00\x08\x00\x00\x00"), Err(MetaError::UnsupportedVersion(43))));
    assert!(matches!(reader.decode(b"II\x2A"), Err(MetaError::InvalidHeader)));
}

#[test]
fn test_decode_rejects_out_of_bounds_payload() {
    let mut b = Vec::new();
    b.extend_from_slice(b"II");
    b.write_u16::<LittleEndian>(42).unwrap();
    b.write_u32::<LittleEndian>(8).unwrap();
    b.write_u16::<LittleEndian>(1).unwrap();
    b.write_u16::<LittleEndian>(0x010F).unwrap();
    b.write_u16::<LittleEndian>(2).unwrap();
    b.write_u32::<LittleEndian>(100).unwrap();
    b.write_u32::<LittleEndian>(1000).unwrap();
    b.write_u32::<LittleEndian>(0).unwrap();

    let mut reader = ExifReader::new();
    assert!(matches!(
        reader.decode(&b),
        Err(MetaError::OffsetOutOfBounds { .. })
    ));
}

#[test]
fn test_decode_sub_ifd_through_pointer_tag() {
    let mut b = Vec::new();
    b.extend_from_slice(b"II");
    b.write_u16::<LittleEndian>(42).unwrap();
    b.write_u32::<LittleEndian>(8).unwrap();
    // IFD0: inline Make plus the Exif pointer, directory is 8..38
    b.write_u16::<LittleEndian>(2).unwrap();
    b.write_u16::<LittleEndian>(0x010F).unwrap();
    b.write_u16::<LittleEndian>(2).unwrap();
    b.write_u32::<LittleEndian>(4).unwrap();
    b.extend_from_slice(b"Cam\0");
    b.write_u16::<LittleEndian>(0x8769).unwrap();
    b.write_u16::<LittleEndian>(4).unwrap();
    b.write_u32::<LittleEndian>(1).unwrap();
    b.write_u32::<LittleEndian>(38).unwrap();
    b.write_u32::<LittleEndian>(0).unwrap();
    // Photo IFD at 38: ExposureTime rational at 56
    b.write_u16::<LittleEndian>(1).unwrap();
    b.write_u16::<LittleEndian>(0x829A).unwrap();
    b.write_u16::<LittleEndian>(5).unwrap();
    b.write_u32::<LittleEndian>(1).unwrap();
    b.write_u32::<LittleEndian>(56).unwrap();
    b.write_u32::<LittleEndian>(0).unwrap();
    b.write_u32::<LittleEndian>(1).unwrap();
    b.write_u32::<LittleEndian>(125).unwrap();

    let mut reader = ExifReader::new();
    let data = reader.decode(&b).unwrap();

    assert_eq!(data.find_key("Exif.Image.Make").unwrap().to_string(), "Cam");
    assert_eq!(
        data.find_key("Exif.Photo.ExposureTime").unwrap().to_string(),
        "1/125"
    );
    // The pointer tag itself is not stored as an entry
    assert!(data.find_key("Exif.Image.ExifTag").is_none());
}

#[test]
fn test_decode_thumbnail_from_second_ifd() {
    let mut b = Vec::new();
    b.extend_from_slice(b"II");
    b.write_u16::<LittleEndian>(42).unwrap();
    b.write_u32::<LittleEndian>(8).unwrap();
    // Empty IFD0 chaining to IFD1 at 14
    b.write_u16::<LittleEndian>(0).unwrap();
    b.write_u32::<LittleEndian>(14).unwrap();
    // IFD1: thumbnail offset and length, image at 44
    b.write_u16::<LittleEndian>(2).unwrap();
    b.write_u16::<LittleEndian>(0x0201).unwrap();
    b.write_u16::<LittleEndian>(4).unwrap();
    b.write_u32::<LittleEndian>(1).unwrap();
    b.write_u32::<LittleEndian>(44).unwrap();
    b.write_u16::<LittleEndian>(0x0202).unwrap();
    b.write_u16::<LittleEndian>(4).unwrap();
    b.write_u32::<LittleEndian>(1).unwrap();
    b.write_u32::<LittleEndian>(4).unwrap();
    b.write_u32::<LittleEndian>(0).unwrap();
    b.extend_from_slice(&[0xFF, 0xD8, 0xFF, 0xD9]);

    let mut reader = ExifReader::new();
    let data = reader.decode(&b).unwrap();

    assert_eq!(data.thumbnail, Some(vec![0xFF, 0xD8, 0xFF, 0xD9]));
    assert_eq!(
        data.find_key("Exif.Thumbnail.JPEGInterchangeFormatLength").unwrap().to_u32(0),
        Some(4)
    );
}

#[test]
fn test_decode_user_comment_charset() {
    let mut b = Vec::new();
    b.extend_from_slice(b"II");
    b.write_u16::<LittleEndian>(42).unwrap();
    b.write_u32::<LittleEndian>(8).unwrap();
    b.write_u16::<LittleEndian>(1).unwrap();
    b.write_u16::<LittleEndian>(0x8769).unwrap();
    b.write_u16::<LittleEndian>(4).unwrap();
    b.write_u32::<LittleEndian>(1).unwrap();
    b.write_u32::<LittleEndian>(26).unwrap();
    b.write_u32::<LittleEndian>(0).unwrap();
    // Photo IFD at 26: UserComment at 44
    b.write_u16::<LittleEndian>(1).unwrap();
    b.write_u16::<LittleEndian>(0x9286).unwrap();
    b.write_u16::<LittleEndian>(7).unwrap();
    b.write_u32::<LittleEndian>(13).unwrap();
    b.write_u32::<LittleEndian>(44).unwrap();
    b.write_u32::<LittleEndian>(0).unwrap();
    b.extend_from_slice(b"ASCII\0\0\0hello");

    let mut reader = ExifReader::new();
    let data = reader.decode(&b).unwrap();

    match data.find_key("Exif.Photo.UserComment").unwrap() {
        Value::Comment(comment) => assert_eq!(comment.comment(), "hello"),
        other => panic!("expected comment value, got {:?}", other),
    }
}

#[test]
fn test_decode_canon_maker_note() {
    let mut b = Vec::new();
    b.extend_from_slice(b"II");
    b.write_u16::<LittleEndian>(42).unwrap();
    b.write_u32::<LittleEndian>(8).unwrap();
    // IFD0 at 8 with 3 entries, external strings at 50
    b.write_u16::<LittleEndian>(3).unwrap();
    b.write_u16::<LittleEndian>(0x010F).unwrap();
    b.write_u16::<LittleEndian>(2).unwrap();
    b.write_u32::<LittleEndian>(6).unwrap();
    b.write_u32::<LittleEndian>(50).unwrap();
    b.write_u16::<LittleEndian>(0x0110).unwrap();
    b.write_u16::<LittleEndian>(2).unwrap();
    b.write_u32::<LittleEndian>(10).unwrap();
    b.write_u32::<LittleEndian>(56).unwrap();
    b.write_u16::<LittleEndian>(0x8769).unwrap();
    b.write_u16::<LittleEndian>(4).unwrap();
    b.write_u32::<LittleEndian>(1).unwrap();
    b.write_u32::<LittleEndian>(66).unwrap();
    b.write_u32::<LittleEndian>(0).unwrap();
    b.extend_from_slice(b"Canon\0");
    b.extend_from_slice(b"PowerShot\0");
    // Photo IFD at 66: MakerNote payload at 84
    b.write_u16::<LittleEndian>(1).unwrap();
    b.write_u16::<LittleEndian>(0x927C).unwrap();
    b.write_u16::<LittleEndian>(7).unwrap();
    b.write_u32::<LittleEndian>(18).unwrap();
    b.write_u32::<LittleEndian>(84).unwrap();
    b.write_u32::<LittleEndian>(0).unwrap();
    // Canon note at 84: a bare IFD with one inline Short entry
    b.write_u16::<LittleEndian>(1).unwrap();
    b.write_u16::<LittleEndian>(0x0001).unwrap();
    b.write_u16::<LittleEndian>(3).unwrap();
    b.write_u32::<LittleEndian>(2).unwrap();
    b.write_u16::<LittleEndian>(1).unwrap();
    b.write_u16::<LittleEndian>(2).unwrap();
    b.write_u32::<LittleEndian>(0).unwrap();

    let mut reader = ExifReader::new();
    let data = reader.decode(&b).unwrap();

    // The raw note survives alongside the decoded vendor entries
    match data.find_key("Exif.Photo.MakerNote").unwrap() {
        Value::Undefined(raw) => assert_eq!(raw.len(), 18),
        other => panic!("expected raw bytes, got {:?}", other),
    }
    assert_eq!(
        data.find_key("Exif.Canon.0x0001").unwrap(),
        &Value::Short(vec![1, 2])
    );
}

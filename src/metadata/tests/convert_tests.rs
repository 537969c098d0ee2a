//! Tests for Exif to XMP conversion

use crate::metadata::containers::{ExifData, XmpData};
use crate::metadata::convert::{copy_exif_to_xmp, copy_xmp_to_exif};
use crate::value::{Value, DEFAULT_LANG};

#[test]
fn test_image_width_converts_to_tiff_namespace() {
    let mut exif = ExifData::new();
    exif.add("Exif.Image.ImageWidth", Value::Long(vec![4000])).unwrap();

    let mut xmp = XmpData::new();
    copy_exif_to_xmp(&mut exif, &mut xmp, false).unwrap();

    assert_eq!(xmp.find_key("Xmp.tiff.ImageWidth").unwrap().to_string(), "4000");
    // Source survives without the erase flag
    assert!(exif.find_key("Exif.Image.ImageWidth").is_some());
}

#[test]
fn test_erase_flag_removes_converted_entries() {
    let mut exif = ExifData::new();
    exif.add("Exif.Image.Make", Value::ascii_from_str("TestCam")).unwrap();

    let mut xmp = XmpData::new();
    copy_exif_to_xmp(&mut exif, &mut xmp, true).unwrap();

    assert_eq!(xmp.find_key("Xmp.tiff.Make").unwrap().to_string(), "TestCam");
    assert!(exif.find_key("Exif.Image.Make").is_none());
}

#[test]
fn test_description_becomes_default_language_alternative() {
    let mut exif = ExifData::new();
    exif.add("Exif.Image.ImageDescription", Value::ascii_from_str("A test scene")).unwrap();

    let mut xmp = XmpData::new();
    copy_exif_to_xmp(&mut exif, &mut xmp, false).unwrap();

    match xmp.find_key("Xmp.dc.description").unwrap() {
        Value::LangAlt(alt) => assert_eq!(alt.get(DEFAULT_LANG), Some("A test scene")),
        other => panic!("expected language alternative, got {:?}", other),
    }
}

#[test]
fn test_artist_lands_in_creator_seq() {
    let mut exif = ExifData::new();
    exif.add("Exif.Image.Artist", Value::ascii_from_str("Jane Doe")).unwrap();

    let mut xmp = XmpData::new();
    copy_exif_to_xmp(&mut exif, &mut xmp, false).unwrap();

    match xmp.find_key("Xmp.dc.creator").unwrap() {
        Value::XmpArray(array) => assert_eq!(array.items, vec!["Jane Doe".to_string()]),
        other => panic!("expected array value, got {:?}", other),
    }
}

#[test]
fn test_round_trip_back_to_exif() {
    let mut exif = ExifData::new();
    exif.add("Exif.Image.Model", Value::ascii_from_str("X100")).unwrap();

    let mut xmp = XmpData::new();
    copy_exif_to_xmp(&mut exif, &mut xmp, true).unwrap();
    assert!(exif.find_key("Exif.Image.Model").is_none());

    copy_xmp_to_exif(&mut xmp, &mut exif, false).unwrap();
    assert_eq!(exif.find_key("Exif.Image.Model").unwrap().to_string(), "X100");
}

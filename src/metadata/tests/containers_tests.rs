//! Tests for the metadata containers

use crate::metadata::containers::{ExifData, IptcData, XmpData};
use crate::value::Value;

#[test]
fn test_duplicates_preserved_and_first_match_wins() {
    let mut iptc = IptcData::new();
    iptc.add("Iptc.Application2.Keywords", Value::ascii_from_str("alpha")).unwrap();
    iptc.add("Iptc.Application2.Keywords", Value::ascii_from_str("beta")).unwrap();

    assert_eq!(iptc.len(), 2);
    let found = iptc.find_key("Iptc.Application2.Keywords").unwrap();
    assert_eq!(found.to_string(), "alpha");
}

#[test]
fn test_non_repeatable_dataset_rejected_on_add() {
    let mut iptc = IptcData::new();
    iptc.add("Iptc.Application2.Caption", Value::ascii_from_str("one")).unwrap();
    assert!(iptc.add("Iptc.Application2.Caption", Value::ascii_from_str("two")).is_err());

    // set() overwrites instead
    iptc.set("Iptc.Application2.Caption", Value::ascii_from_str("two")).unwrap();
    assert_eq!(iptc.len(), 1);
    assert_eq!(iptc.find_key("Iptc.Application2.Caption").unwrap().to_string(), "two");
}

#[test]
fn test_erase_removes_first_occurrence_only() {
    let mut exif = ExifData::new();
    exif.add("Exif.Image.Make", Value::ascii_from_str("First")).unwrap();
    exif.add("Exif.Image.Make", Value::ascii_from_str("Second")).unwrap();

    let removed = exif.erase("Exif.Image.Make").unwrap();
    assert_eq!(removed.value.to_string(), "First");
    assert_eq!(exif.find_key("Exif.Image.Make").unwrap().to_string(), "Second");

    assert_eq!(exif.erase_all("Exif.Image.Make"), 1);
    assert!(exif.is_empty());
}

#[test]
fn test_exif_add_validates_key() {
    let mut exif = ExifData::new();
    assert!(exif.add("Exif.Bogus.Make", Value::ascii_from_str("x")).is_err());
    assert!(exif.add("garbage", Value::ascii_from_str("x")).is_err());
}

#[test]
fn test_xmp_set_accumulates_bag_items() {
    let mut xmp = XmpData::new();
    let mut subject = Value::create(crate::value::TypeId::XmpText);
    subject.read_str("metadata").unwrap();
    xmp.set("Xmp.dc.subject", subject).unwrap();

    let mut subject = Value::create(crate::value::TypeId::XmpText);
    subject.read_str("testing").unwrap();
    xmp.set("Xmp.dc.subject", subject).unwrap();

    // One entry with two bag items, not two entries
    assert_eq!(xmp.len(), 1);
    match xmp.find_key("Xmp.dc.subject").unwrap() {
        Value::XmpArray(array) => {
            assert_eq!(array.items, vec!["metadata".to_string(), "testing".to_string()]);
        }
        other => panic!("expected array value, got {:?}", other),
    }
}

#[test]
fn test_xmp_set_replaces_plain_text_property() {
    let mut xmp = XmpData::new();
    let mut tool = Value::create(crate::value::TypeId::XmpText);
    tool.read_str("one").unwrap();
    xmp.set("Xmp.xmp.CreatorTool", tool).unwrap();

    let mut tool = Value::create(crate::value::TypeId::XmpText);
    tool.read_str("two").unwrap();
    xmp.set("Xmp.xmp.CreatorTool", tool).unwrap();

    assert_eq!(xmp.len(), 1);
    assert_eq!(xmp.find_key("Xmp.xmp.CreatorTool").unwrap().to_string(), "two");
}

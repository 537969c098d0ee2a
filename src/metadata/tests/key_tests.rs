//! Tests for metadata key parsing

use crate::metadata::key::{ExifKey, IptcKey, XmpKey};
use crate::tiff::constants::{tags, Group};

#[test]
fn test_exif_key_round_trip() {
    let key = ExifKey::parse("Exif.Photo.ExposureTime").unwrap();
    assert_eq!(key.group, Group::Photo);
    assert_eq!(key.tag, tags::EXPOSURE_TIME);
    assert_eq!(key.to_string(), "Exif.Photo.ExposureTime");
}

#[test]
fn test_exif_key_hex_tag() {
    let key = ExifKey::parse("Exif.Image.0x9999").unwrap();
    assert_eq!(key.tag, 0x9999);
    // Unknown tags format back in hex
    assert_eq!(key.to_string(), "Exif.Image.0x9999");
}

#[test]
fn test_exif_key_vendor_group() {
    let key = ExifKey::parse("Exif.Canon.0x0001").unwrap();
    assert_eq!(key.group, Group::Vendor("Canon"));
    assert_eq!(key.tag, 0x0001);
}

#[test]
fn test_exif_key_rejects_bad_keys() {
    assert!(ExifKey::parse("Iptc.Photo.ExposureTime").is_err());
    assert!(ExifKey::parse("Exif.Photo").is_err());
    assert!(ExifKey::parse("Exif.Nowhere.ExposureTime").is_err());
    assert!(ExifKey::parse("Exif.Photo.NoSuchTag").is_err());
}

#[test]
fn test_iptc_key_round_trip() {
    let key = IptcKey::parse("Iptc.Application2.Keywords").unwrap();
    assert_eq!(key.record, 2);
    assert_eq!(key.dataset, 25);
    assert!(key.is_repeatable());
    assert_eq!(key.to_string(), "Iptc.Application2.Keywords");

    let key = IptcKey::parse("Iptc.Application2.Caption").unwrap();
    assert!(!key.is_repeatable());
}

#[test]
fn test_xmp_key_requires_registered_prefix() {
    let key = XmpKey::parse("Xmp.dc.subject").unwrap();
    assert_eq!(key.prefix, "dc");
    assert_eq!(key.property, "subject");

    assert!(XmpKey::parse("Xmp.nosuchns.thing").is_err());
}

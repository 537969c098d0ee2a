//! Tests for the EXV sidecar adapter

use crate::errors::MetaError;
use crate::formats::exv::{ExvFile, EXV_SIGNATURE};
use crate::formats::ImageFile;
use crate::value::Value;

#[test]
fn test_round_trip_all_families() {
    let mut file = ExvFile::new("test.exv");
    file.exif_data_mut()
        .add("Exif.Image.Make", Value::ascii_from_str("TestCam"))
        .unwrap();
    file.exif_data_mut()
        .add("Exif.Photo.ISOSpeedRatings", Value::Short(vec![400]))
        .unwrap();
    file.iptc_data_mut()
        .add("Iptc.Application2.ObjectName", Value::ascii_from_str("Sunset"))
        .unwrap();
    file.xmp_data_mut()
        .set("Xmp.dc.subject", Value::ascii_from_str("nature"))
        .unwrap();
    file.set_comment("sidecar comment").unwrap();

    let written = file.assemble_bytes().unwrap();
    assert!(written.starts_with(&EXV_SIGNATURE));
    assert_eq!(&written[written.len() - 2..], &[0xFF, 0xD9]);

    let mut reread = ExvFile::new("test.exv");
    reread.read_from_bytes(&written).unwrap();
    assert_eq!(
        reread.exif_data().find_key("Exif.Image.Make").unwrap().to_string(),
        "TestCam"
    );
    assert_eq!(
        reread.exif_data().find_key("Exif.Photo.ISOSpeedRatings").unwrap().to_string(),
        "400"
    );
    assert_eq!(
        reread.iptc_data().find_key("Iptc.Application2.ObjectName").unwrap().to_string(),
        "Sunset"
    );
    assert_eq!(reread.xmp_data().find_key("Xmp.dc.subject").unwrap().to_string(), "nature");
    assert_eq!(reread.comment(), Some("sidecar comment"));
}

#[test]
fn test_empty_sidecar() {
    let written = ExvFile::new("test.exv").assemble_bytes().unwrap();
    assert_eq!(written.len(), EXV_SIGNATURE.len() + 2);

    let mut reread = ExvFile::new("test.exv");
    reread.read_from_bytes(&written).unwrap();
    assert!(reread.exif_data().is_empty());
    assert!(reread.iptc_data().is_empty());
    assert!(reread.xmp_data().is_empty());
    assert_eq!(reread.comment(), None);
}

#[test]
fn test_not_an_exv() {
    let mut file = ExvFile::new("test.exv");
    assert!(matches!(
        file.read_from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]),
        Err(MetaError::NotThisFormat)
    ));
}

//! Tests for the TIFF file adapter

use crate::formats::tiff::TiffFile;
use crate::formats::ImageFile;
use crate::value::Value;

#[test]
fn test_iptc_and_xmp_ride_in_ifd0_tags() {
    let mut file = TiffFile::new("test.tif");
    file.exif_data_mut()
        .add("Exif.Image.Make", Value::ascii_from_str("TestCam"))
        .unwrap();
    file.iptc_data_mut()
        .add("Iptc.Application2.ObjectName", Value::ascii_from_str("Sunset"))
        .unwrap();
    file.xmp_data_mut()
        .set("Xmp.xmp.CreatorTool", Value::ascii_from_str("metakit"))
        .unwrap();

    let written = file.assemble_bytes().unwrap();

    let mut reread = TiffFile::new("test.tif");
    reread.read_from_bytes(&written).unwrap();

    assert_eq!(
        reread.exif_data().find_key("Exif.Image.Make").unwrap().to_string(),
        "TestCam"
    );
    assert_eq!(
        reread.iptc_data().find_key("Iptc.Application2.ObjectName").unwrap().to_string(),
        "Sunset"
    );
    assert_eq!(
        reread.xmp_data().find_key("Xmp.xmp.CreatorTool").unwrap().to_string(),
        "metakit"
    );

    // The carrier tags are lifted into their own families on read
    assert!(reread.exif_data().find_key("Exif.Image.IPTCNAA").is_none());
    assert!(reread.exif_data().find_key("Exif.Image.XMLPacket").is_none());
}

#[test]
fn test_sniffs_both_byte_orders() {
    assert!(TiffFile::is_this_type(&[0x49, 0x49, 0x2A, 0x00, 8, 0, 0, 0]));
    assert!(TiffFile::is_this_type(&[0x4D, 0x4D, 0x00, 0x2A, 0, 0, 0, 8]));
    assert!(!TiffFile::is_this_type(&[0x49, 0x49, 0x2B, 0x00]));
}

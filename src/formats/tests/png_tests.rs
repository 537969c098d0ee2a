//! Tests for the PNG adapter

use flate2::Crc;

use crate::errors::MetaError;
use crate::formats::png::{PngFile, PNG_SIGNATURE};
use crate::formats::ImageFile;
use crate::value::Value;

fn chunk(kind: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = (data.len() as u32).to_be_bytes().to_vec();
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    let mut crc = Crc::new();
    crc.update(kind);
    crc.update(data);
    out.extend_from_slice(&crc.sum().to_be_bytes());
    out
}

fn bare_png() -> Vec<u8> {
    let mut buf = PNG_SIGNATURE.to_vec();
    let ihdr = [0, 0, 0, 1, 0, 0, 0, 1, 8, 0, 0, 0, 0];
    buf.extend_from_slice(&chunk(b"IHDR", &ihdr));
    buf.extend_from_slice(&chunk(b"IDAT", &[0x78, 0x9C, 0x03, 0x00]));
    buf.extend_from_slice(&chunk(b"IEND", &[]));
    buf
}

fn populated_file() -> PngFile {
    let mut file = PngFile::new("test.png");
    file.exif_data_mut()
        .add("Exif.Image.Make", Value::ascii_from_str("TestCam"))
        .unwrap();
    file.iptc_data_mut()
        .add("Iptc.Application2.Keywords", Value::ascii_from_str("beach"))
        .unwrap();
    file.iptc_data_mut()
        .add("Iptc.Application2.Keywords", Value::ascii_from_str("summer"))
        .unwrap();
    file.xmp_data_mut()
        .set("Xmp.xmp.CreatorTool", Value::ascii_from_str("metakit"))
        .unwrap();
    file
}

#[test]
fn test_round_trip_all_families() {
    let written = populated_file().assemble_bytes(&bare_png()).unwrap();

    let mut reread = PngFile::new("test.png");
    reread.read_from_bytes(&written).unwrap();

    assert_eq!(
        reread.exif_data().find_key("Exif.Image.Make").unwrap().to_string(),
        "TestCam"
    );
    let keywords: Vec<String> = reread
        .iptc_data()
        .iter()
        .filter(|m| m.key == "Iptc.Application2.Keywords")
        .map(|m| m.value.to_string())
        .collect();
    assert_eq!(keywords, vec!["beach".to_string(), "summer".to_string()]);
    assert_eq!(
        reread.xmp_data().find_key("Xmp.xmp.CreatorTool").unwrap().to_string(),
        "metakit"
    );
}

#[test]
fn test_image_chunks_survive() {
    let original = bare_png();
    let written = populated_file().assemble_bytes(&original).unwrap();

    // The image itself is untouched: IHDR, IDAT and IEND all present,
    // metadata chunks inserted right after IHDR
    let idat_at = written.windows(4).position(|w| w == b"IDAT").unwrap();
    let exif_at = written.windows(4).position(|w| w == b"eXIf").unwrap();
    let itxt_at = written.windows(4).position(|w| w == b"iTXt").unwrap();
    let ztxt_at = written.windows(4).position(|w| w == b"zTXt").unwrap();
    assert!(exif_at < idat_at);
    assert!(itxt_at < idat_at);
    assert!(ztxt_at < idat_at);
    assert!(written.windows(4).any(|w| w == b"IEND"));
}

#[test]
fn test_erasing_metadata_restores_bare_file() {
    let written = populated_file().assemble_bytes(&bare_png()).unwrap();
    let erased = PngFile::new("test.png").assemble_bytes(&written).unwrap();
    assert_eq!(erased, bare_png());
}

#[test]
fn test_uncompressed_itxt_xmp() {
    let packet = concat!(
        "<x:xmpmeta xmlns:x=\"adobe:ns:meta/\">",
        "<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\">",
        "<rdf:Description rdf:about=\"\" xmlns:xmp=\"http://ns.adobe.com/xap/1.0/\">",
        "<xmp:Rating>5</xmp:Rating>",
        "</rdf:Description></rdf:RDF></x:xmpmeta>"
    );
    let mut data = b"XML:com.adobe.xmp\0\0\0\0\0".to_vec();
    data.extend_from_slice(packet.as_bytes());

    let mut buf = PNG_SIGNATURE.to_vec();
    buf.extend_from_slice(&chunk(b"IHDR", &[0; 13]));
    buf.extend_from_slice(&chunk(b"iTXt", &data));
    buf.extend_from_slice(&chunk(b"IEND", &[]));

    let mut file = PngFile::new("test.png");
    file.read_from_bytes(&buf).unwrap();
    assert_eq!(file.xmp_data().find_key("Xmp.xmp.Rating").unwrap().to_string(), "5");
}

#[test]
fn test_truncated_chunk_is_rejected() {
    let mut buf = PNG_SIGNATURE.to_vec();
    buf.extend_from_slice(&[0, 0, 0, 64, b'I', b'H', b'D', b'R', 1, 2]);
    let mut file = PngFile::new("test.png");
    assert!(matches!(
        file.read_from_bytes(&buf),
        Err(MetaError::OffsetOutOfBounds { .. })
    ));
}

#[test]
fn test_not_a_png() {
    let mut file = PngFile::new("test.png");
    assert!(matches!(
        file.read_from_bytes(&[0xFF, 0xD8, 0xFF]),
        Err(MetaError::NotThisFormat)
    ));
}

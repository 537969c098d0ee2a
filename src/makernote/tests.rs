//! Tests for the MakerNote registry

use crate::io::byte_order::ByteOrder;
use crate::makernote::registry::{create, match_score, register, shutdown};
use crate::makernote::{OffsetBase, VendorSpec};

#[test]
fn test_match_score_ordering() {
    // Exact beats prefix beats bare wildcard
    assert!(match_score("Canon", "Canon") > match_score("Canon*", "Canon"));
    assert!(match_score("Canon*", "Canon") > match_score("*", "Canon"));
    assert_eq!(match_score("*", "anything"), 1);
    assert_eq!(match_score("NIKON*", "Canon"), 0);
    assert_eq!(match_score("Canon", "Canon EOS 5D"), 0);
}

#[test]
fn test_match_is_case_insensitive() {
    assert!(match_score("canon*", "CANON EOS") > 0);
    assert!(match_score("NIKON*", "Nikon Corporation") > 0);
}

#[test]
fn test_more_specific_model_pattern_wins() {
    register(VendorSpec {
        make: "Canon*",
        model: "Canon EOS*",
        label: "CanonEos",
        header: b"",
        header_len: 0,
        offset_base: OffsetBase::TiffHeader,
        embedded_tiff: false,
        forced_order: None,
    });

    // "Canon EOS*" scores above the builtin "*" model pattern
    let spec = create("Canon", "Canon EOS 5D").unwrap();
    assert_eq!(spec.label, "CanonEos");

    // A non-EOS model falls back to the generic Canon entry
    let spec = create("Canon", "PowerShot G9").unwrap();
    assert_eq!(spec.label, "Canon");

    shutdown();
}

#[test]
fn test_unknown_make_yields_none() {
    assert!(create("Acme Cameras", "Model T").is_none());
}

#[test]
fn test_header_check() {
    let spec = create("NIKON CORPORATION", "NIKON D90").unwrap();
    assert_eq!(spec.label, "Nikon3");
    assert!(spec.check_header(b"Nikon\x00\x02\x10\x00\x00II*\x00"));
    assert!(!spec.check_header(b"Nikon\x00"));
    assert!(!spec.check_header(b"OLYMP\x00\x01\x00"));
}

#[test]
fn test_fujifilm_forces_little_endian() {
    let spec = create("FUJIFILM", "X-T5").unwrap();
    assert_eq!(spec.forced_order, Some(ByteOrder::LittleEndian));
    assert_eq!(spec.offset_base, OffsetBase::MakerNoteStart);
}

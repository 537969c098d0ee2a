//! MakerNote vendor registry and decoders
//!
//! Vendor MakerNote blocks are IFD-shaped sub-trees with a vendor-specific
//! magic prefix and offset base. The registry maps (camera make, model)
//! pairs to vendor descriptors using case-insensitive wildcard matching.

pub mod registry;
#[cfg(test)]
mod tests;

pub use registry::{create, register, shutdown, vendor_group, VendorSpec};

use crate::io::byte_order::ByteOrder;

/// How directory offsets inside a MakerNote are to be interpreted
///
/// The base is vendor-specific and fixed per descriptor rather than
/// inferred at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetBase {
    /// Offsets are absolute positions in the enclosing buffer
    Absolute,
    /// Offsets are relative to the enclosing TIFF header
    TiffHeader,
    /// Offsets are relative to the start of the MakerNote block
    MakerNoteStart,
}

/// Built-in vendor descriptors
///
/// Header prefixes and offset bases follow the vendors' published
/// MakerNote layouts. A vendor with an embedded TIFF header (Nikon)
/// re-reads byte order and root offset from that header.
pub(crate) const BUILTIN_VENDORS: &[VendorSpec] = &[
    VendorSpec {
        make: "Canon*",
        model: "*",
        label: "Canon",
        header: b"",
        header_len: 0,
        offset_base: OffsetBase::TiffHeader,
        embedded_tiff: false,
        forced_order: None,
    },
    VendorSpec {
        make: "NIKON*",
        model: "*",
        label: "Nikon3",
        header: b"Nikon\x00\x02",
        header_len: 10,
        offset_base: OffsetBase::MakerNoteStart,
        embedded_tiff: true,
        forced_order: None,
    },
    VendorSpec {
        make: "OLYMPUS*",
        model: "*",
        label: "Olympus",
        header: b"OLYMP\x00",
        header_len: 8,
        offset_base: OffsetBase::TiffHeader,
        embedded_tiff: false,
        forced_order: None,
    },
    VendorSpec {
        make: "FUJIFILM*",
        model: "*",
        label: "Fujifilm",
        header: b"FUJIFILM",
        header_len: 12,
        offset_base: OffsetBase::MakerNoteStart,
        embedded_tiff: false,
        forced_order: Some(ByteOrder::LittleEndian),
    },
    VendorSpec {
        make: "Panasonic*",
        model: "*",
        label: "Panasonic",
        header: b"Panasonic\x00\x00\x00",
        header_len: 12,
        offset_base: OffsetBase::TiffHeader,
        embedded_tiff: false,
        forced_order: None,
    },
    VendorSpec {
        make: "SONY*",
        model: "*",
        label: "Sony",
        header: b"SONY DSC \x00\x00\x00",
        header_len: 12,
        offset_base: OffsetBase::TiffHeader,
        embedded_tiff: false,
        forced_order: None,
    },
];

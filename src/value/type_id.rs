//! Metadata value type identifiers
//!
//! This module defines constants and the TypeId enum used throughout the
//! value model, mirroring the TIFF field types plus the textual types
//! used by IPTC and XMP metadata.

/// Wire-level field types as defined in the TIFF spec
pub mod field_types {
    pub const BYTE: u16 = 1;       // 8-bit unsigned integer
    pub const ASCII: u16 = 2;      // 8-bit byte containing ASCII character
    pub const SHORT: u16 = 3;      // 16-bit unsigned integer
    pub const LONG: u16 = 4;       // 32-bit unsigned integer
    pub const RATIONAL: u16 = 5;   // Two LONGs: numerator and denominator
    pub const SBYTE: u16 = 6;      // 8-bit signed integer
    pub const UNDEFINED: u16 = 7;  // 8-bit byte with unspecified format
    pub const SSHORT: u16 = 8;     // 16-bit signed integer
    pub const SLONG: u16 = 9;      // 32-bit signed integer
    pub const SRATIONAL: u16 = 10; // Two SLONGs: numerator and denominator
    pub const FLOAT: u16 = 11;     // Single precision IEEE floating point
    pub const DOUBLE: u16 = 12;    // Double precision IEEE floating point
}

/// Identifies the concrete type of a metadata value
///
/// The first twelve variants correspond one-to-one to the TIFF wire field
/// types. The remaining variants are logical types used by IPTC datasets
/// and XMP properties and never appear in an IFD entry directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeId {
    UnsignedByte,
    AsciiString,
    UnsignedShort,
    UnsignedLong,
    UnsignedRational,
    SignedByte,
    Undefined,
    SignedShort,
    SignedLong,
    SignedRational,
    TiffFloat,
    TiffDouble,
    /// IPTC date (YYYYMMDD)
    Date,
    /// IPTC time (HHMMSS+HHMM)
    Time,
    /// Exif user comment with charset header
    Comment,
    /// Simple XMP text property
    XmpText,
    /// XMP language alternative array
    XmpAlt,
    /// XMP unordered array
    XmpBag,
    /// XMP ordered array
    XmpSeq,
    /// XMP alternative keyed by language tag
    LangAlt,
}

impl TypeId {
    /// Maps a TIFF wire field type to a TypeId
    pub fn from_wire(field_type: u16) -> Option<TypeId> {
        match field_type {
            field_types::BYTE => Some(TypeId::UnsignedByte),
            field_types::ASCII => Some(TypeId::AsciiString),
            field_types::SHORT => Some(TypeId::UnsignedShort),
            field_types::LONG => Some(TypeId::UnsignedLong),
            field_types::RATIONAL => Some(TypeId::UnsignedRational),
            field_types::SBYTE => Some(TypeId::SignedByte),
            field_types::UNDEFINED => Some(TypeId::Undefined),
            field_types::SSHORT => Some(TypeId::SignedShort),
            field_types::SLONG => Some(TypeId::SignedLong),
            field_types::SRATIONAL => Some(TypeId::SignedRational),
            field_types::FLOAT => Some(TypeId::TiffFloat),
            field_types::DOUBLE => Some(TypeId::TiffDouble),
            _ => None,
        }
    }

    /// Maps this TypeId to the TIFF wire field type used when encoding
    ///
    /// The textual types serialize as ASCII or UNDEFINED on the wire;
    /// XMP types have no wire representation and return 0.
    pub fn to_wire(self) -> u16 {
        match self {
            TypeId::UnsignedByte => field_types::BYTE,
            TypeId::AsciiString => field_types::ASCII,
            TypeId::UnsignedShort => field_types::SHORT,
            TypeId::UnsignedLong => field_types::LONG,
            TypeId::UnsignedRational => field_types::RATIONAL,
            TypeId::SignedByte => field_types::SBYTE,
            TypeId::Undefined => field_types::UNDEFINED,
            TypeId::SignedShort => field_types::SSHORT,
            TypeId::SignedLong => field_types::SLONG,
            TypeId::SignedRational => field_types::SRATIONAL,
            TypeId::TiffFloat => field_types::FLOAT,
            TypeId::TiffDouble => field_types::DOUBLE,
            TypeId::Date | TypeId::Time => field_types::ASCII,
            TypeId::Comment => field_types::UNDEFINED,
            TypeId::XmpText | TypeId::XmpAlt | TypeId::XmpBag
            | TypeId::XmpSeq | TypeId::LangAlt => 0,
        }
    }

    /// Size in bytes of a single component of this type
    pub fn type_size(self) -> usize {
        match self {
            TypeId::UnsignedByte | TypeId::AsciiString | TypeId::SignedByte
            | TypeId::Undefined | TypeId::Comment => 1,
            TypeId::UnsignedShort | TypeId::SignedShort => 2,
            TypeId::UnsignedLong | TypeId::SignedLong | TypeId::TiffFloat => 4,
            TypeId::UnsignedRational | TypeId::SignedRational | TypeId::TiffDouble => 8,
            // Textual and XMP types have no fixed component width
            _ => 1,
        }
    }

    /// Human-readable type name, as printed by the CLI
    pub fn name(self) -> &'static str {
        match self {
            TypeId::UnsignedByte => "Byte",
            TypeId::AsciiString => "Ascii",
            TypeId::UnsignedShort => "Short",
            TypeId::UnsignedLong => "Long",
            TypeId::UnsignedRational => "Rational",
            TypeId::SignedByte => "SByte",
            TypeId::Undefined => "Undefined",
            TypeId::SignedShort => "SShort",
            TypeId::SignedLong => "SLong",
            TypeId::SignedRational => "SRational",
            TypeId::TiffFloat => "Float",
            TypeId::TiffDouble => "Double",
            TypeId::Date => "Date",
            TypeId::Time => "Time",
            TypeId::Comment => "Comment",
            TypeId::XmpText => "XmpText",
            TypeId::XmpAlt => "XmpAlt",
            TypeId::XmpBag => "XmpBag",
            TypeId::XmpSeq => "XmpSeq",
            TypeId::LangAlt => "LangAlt",
        }
    }
}

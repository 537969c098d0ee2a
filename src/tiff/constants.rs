//! Exif/TIFF format constants
//!
//! This module defines constants used throughout the TIFF processing code,
//! making the code more readable and maintainable by replacing magic numbers
//! with descriptive names.

/// TIFF header constants
pub mod header {
    /// Standard TIFF magic number (42)
    pub const TIFF_MAGIC: u16 = 42;

    /// "II" byte order marker for little-endian
    pub const LITTLE_ENDIAN_MARKER: [u8; 2] = [0x49, 0x49];

    /// "MM" byte order marker for big-endian
    pub const BIG_ENDIAN_MARKER: [u8; 2] = [0x4D, 0x4D];

    /// Total size of the TIFF header in bytes
    pub const SIZE: u64 = 8;
}

/// Standard Exif/TIFF tags
pub mod tags {
    // IFD0 / IFD1 (Image and Thumbnail groups)
    pub const IMAGE_WIDTH: u16 = 0x0100;
    pub const IMAGE_LENGTH: u16 = 0x0101;
    pub const BITS_PER_SAMPLE: u16 = 0x0102;
    pub const COMPRESSION: u16 = 0x0103;
    pub const IMAGE_DESCRIPTION: u16 = 0x010E;
    pub const MAKE: u16 = 0x010F;
    pub const MODEL: u16 = 0x0110;
    pub const ORIENTATION: u16 = 0x0112;
    pub const X_RESOLUTION: u16 = 0x011A;
    pub const Y_RESOLUTION: u16 = 0x011B;
    pub const RESOLUTION_UNIT: u16 = 0x0128;
    pub const SOFTWARE: u16 = 0x0131;
    pub const DATE_TIME: u16 = 0x0132;
    pub const ARTIST: u16 = 0x013B;
    pub const JPEG_INTERCHANGE_FORMAT: u16 = 0x0201;
    pub const JPEG_INTERCHANGE_FORMAT_LENGTH: u16 = 0x0202;
    pub const YCBCR_POSITIONING: u16 = 0x0213;
    pub const COPYRIGHT: u16 = 0x8298;
    pub const IPTC_NAA: u16 = 0x83BB;
    pub const XML_PACKET: u16 = 0x02BC;

    // Pointer tags that spawn sub-IFDs
    pub const EXIF_IFD_POINTER: u16 = 0x8769;
    pub const GPS_INFO_IFD_POINTER: u16 = 0x8825;
    pub const INTEROP_IFD_POINTER: u16 = 0xA005;

    // Exif IFD (Photo group)
    pub const EXPOSURE_TIME: u16 = 0x829A;
    pub const F_NUMBER: u16 = 0x829D;
    pub const EXPOSURE_PROGRAM: u16 = 0x8822;
    pub const ISO_SPEED_RATINGS: u16 = 0x8827;
    pub const EXIF_VERSION: u16 = 0x9000;
    pub const DATE_TIME_ORIGINAL: u16 = 0x9003;
    pub const DATE_TIME_DIGITIZED: u16 = 0x9004;
    pub const SHUTTER_SPEED_VALUE: u16 = 0x9201;
    pub const APERTURE_VALUE: u16 = 0x9202;
    pub const EXPOSURE_BIAS_VALUE: u16 = 0x9204;
    pub const METERING_MODE: u16 = 0x9207;
    pub const FLASH: u16 = 0x9209;
    pub const FOCAL_LENGTH: u16 = 0x920A;
    pub const MAKER_NOTE: u16 = 0x927C;
    pub const USER_COMMENT: u16 = 0x9286;
    pub const COLOR_SPACE: u16 = 0xA001;
    pub const PIXEL_X_DIMENSION: u16 = 0xA002;
    pub const PIXEL_Y_DIMENSION: u16 = 0xA003;
    pub const FOCAL_PLANE_X_RESOLUTION: u16 = 0xA20E;
    pub const FOCAL_PLANE_Y_RESOLUTION: u16 = 0xA20F;
    pub const EXPOSURE_MODE: u16 = 0xA402;
    pub const WHITE_BALANCE: u16 = 0xA403;
    pub const FOCAL_LENGTH_35MM: u16 = 0xA405;
    pub const LENS_MODEL: u16 = 0xA434;

    // GPS IFD
    pub const GPS_VERSION_ID: u16 = 0x0000;
    pub const GPS_LATITUDE_REF: u16 = 0x0001;
    pub const GPS_LATITUDE: u16 = 0x0002;
    pub const GPS_LONGITUDE_REF: u16 = 0x0003;
    pub const GPS_LONGITUDE: u16 = 0x0004;
    pub const GPS_ALTITUDE_REF: u16 = 0x0005;
    pub const GPS_ALTITUDE: u16 = 0x0006;
    pub const GPS_TIME_STAMP: u16 = 0x0007;
    pub const GPS_MAP_DATUM: u16 = 0x0012;
    pub const GPS_DATE_STAMP: u16 = 0x001D;

    // Interoperability IFD
    pub const INTEROP_INDEX: u16 = 0x0001;
    pub const INTEROP_VERSION: u16 = 0x0002;
}

/// The IFD group a tag entry belongs to
///
/// The group selects both the tag name table and the directory the entry
/// is emitted into at encode time. Vendor groups carry the MakerNote
/// vendor label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    /// IFD0, the primary image directory
    Image,
    /// IFD1, the thumbnail directory
    Thumbnail,
    /// The Exif sub-IFD
    Photo,
    /// The GPS sub-IFD
    GpsInfo,
    /// The Interoperability sub-IFD
    Iop,
    /// A vendor MakerNote sub-tree, labelled by vendor
    Vendor(&'static str),
}

impl Group {
    /// The group name as it appears in metadata keys
    pub fn name(&self) -> &'static str {
        match self {
            Group::Image => "Image",
            Group::Thumbnail => "Thumbnail",
            Group::Photo => "Photo",
            Group::GpsInfo => "GPSInfo",
            Group::Iop => "Iop",
            Group::Vendor(label) => label,
        }
    }

    /// Parses a standard group name; vendor groups are resolved by the
    /// MakerNote registry instead
    pub fn from_name(name: &str) -> Option<Group> {
        match name {
            "Image" => Some(Group::Image),
            "Thumbnail" => Some(Group::Thumbnail),
            "Photo" => Some(Group::Photo),
            "GPSInfo" => Some(Group::GpsInfo),
            "Iop" => Some(Group::Iop),
            _ => None,
        }
    }
}

/// Tag names for IFD0/IFD1 entries
const IMAGE_TAG_NAMES: &[(u16, &str)] = &[
    (tags::IMAGE_WIDTH, "ImageWidth"),
    (tags::IMAGE_LENGTH, "ImageLength"),
    (tags::BITS_PER_SAMPLE, "BitsPerSample"),
    (tags::COMPRESSION, "Compression"),
    (tags::IMAGE_DESCRIPTION, "ImageDescription"),
    (tags::MAKE, "Make"),
    (tags::MODEL, "Model"),
    (tags::ORIENTATION, "Orientation"),
    (tags::X_RESOLUTION, "XResolution"),
    (tags::Y_RESOLUTION, "YResolution"),
    (tags::RESOLUTION_UNIT, "ResolutionUnit"),
    (tags::SOFTWARE, "Software"),
    (tags::DATE_TIME, "DateTime"),
    (tags::ARTIST, "Artist"),
    (tags::JPEG_INTERCHANGE_FORMAT, "JPEGInterchangeFormat"),
    (tags::JPEG_INTERCHANGE_FORMAT_LENGTH, "JPEGInterchangeFormatLength"),
    (tags::YCBCR_POSITIONING, "YCbCrPositioning"),
    (tags::COPYRIGHT, "Copyright"),
    (tags::IPTC_NAA, "IPTCNAA"),
    (tags::XML_PACKET, "XMLPacket"),
    (tags::EXIF_IFD_POINTER, "ExifTag"),
    (tags::GPS_INFO_IFD_POINTER, "GPSTag"),
];

/// Tag names for the Exif sub-IFD
const PHOTO_TAG_NAMES: &[(u16, &str)] = &[
    (tags::EXPOSURE_TIME, "ExposureTime"),
    (tags::F_NUMBER, "FNumber"),
    (tags::EXPOSURE_PROGRAM, "ExposureProgram"),
    (tags::ISO_SPEED_RATINGS, "ISOSpeedRatings"),
    (tags::EXIF_VERSION, "ExifVersion"),
    (tags::DATE_TIME_ORIGINAL, "DateTimeOriginal"),
    (tags::DATE_TIME_DIGITIZED, "DateTimeDigitized"),
    (tags::SHUTTER_SPEED_VALUE, "ShutterSpeedValue"),
    (tags::APERTURE_VALUE, "ApertureValue"),
    (tags::EXPOSURE_BIAS_VALUE, "ExposureBiasValue"),
    (tags::METERING_MODE, "MeteringMode"),
    (tags::FLASH, "Flash"),
    (tags::FOCAL_LENGTH, "FocalLength"),
    (tags::MAKER_NOTE, "MakerNote"),
    (tags::USER_COMMENT, "UserComment"),
    (tags::COLOR_SPACE, "ColorSpace"),
    (tags::PIXEL_X_DIMENSION, "PixelXDimension"),
    (tags::PIXEL_Y_DIMENSION, "PixelYDimension"),
    (tags::FOCAL_PLANE_X_RESOLUTION, "FocalPlaneXResolution"),
    (tags::FOCAL_PLANE_Y_RESOLUTION, "FocalPlaneYResolution"),
    (tags::EXPOSURE_MODE, "ExposureMode"),
    (tags::WHITE_BALANCE, "WhiteBalance"),
    (tags::FOCAL_LENGTH_35MM, "FocalLengthIn35mmFilm"),
    (tags::LENS_MODEL, "LensModel"),
    (tags::INTEROP_IFD_POINTER, "InteroperabilityTag"),
];

/// Tag names for the GPS sub-IFD
const GPS_TAG_NAMES: &[(u16, &str)] = &[
    (tags::GPS_VERSION_ID, "GPSVersionID"),
    (tags::GPS_LATITUDE_REF, "GPSLatitudeRef"),
    (tags::GPS_LATITUDE, "GPSLatitude"),
    (tags::GPS_LONGITUDE_REF, "GPSLongitudeRef"),
    (tags::GPS_LONGITUDE, "GPSLongitude"),
    (tags::GPS_ALTITUDE_REF, "GPSAltitudeRef"),
    (tags::GPS_ALTITUDE, "GPSAltitude"),
    (tags::GPS_TIME_STAMP, "GPSTimeStamp"),
    (tags::GPS_MAP_DATUM, "GPSMapDatum"),
    (tags::GPS_DATE_STAMP, "GPSDateStamp"),
];

/// Tag names for the Interoperability sub-IFD
const IOP_TAG_NAMES: &[(u16, &str)] = &[
    (tags::INTEROP_INDEX, "InteroperabilityIndex"),
    (tags::INTEROP_VERSION, "InteroperabilityVersion"),
];

fn table_for(group: Group) -> &'static [(u16, &'static str)] {
    match group {
        Group::Image | Group::Thumbnail => IMAGE_TAG_NAMES,
        Group::Photo => PHOTO_TAG_NAMES,
        Group::GpsInfo => GPS_TAG_NAMES,
        Group::Iop => IOP_TAG_NAMES,
        Group::Vendor(_) => &[],
    }
}

/// The name of a tag within a group, if known
pub fn tag_name(group: Group, tag: u16) -> Option<&'static str> {
    table_for(group).iter().find(|(t, _)| *t == tag).map(|(_, n)| *n)
}

/// The tag id for a name within a group
///
/// Accepts either a table name or a hexadecimal `0xNNNN` form, so
/// unknown tags survive a key round trip.
pub fn tag_by_name(group: Group, name: &str) -> Option<u16> {
    if let Some(hex) = name.strip_prefix("0x") {
        return u16::from_str_radix(hex, 16).ok();
    }
    table_for(group).iter().find(|(_, n)| *n == name).map(|(t, _)| *t)
}

/// Formats a tag for use in a metadata key
pub fn tag_label(group: Group, tag: u16) -> String {
    match tag_name(group, tag) {
        Some(name) => name.to_string(),
        None => format!("0x{:04x}", tag),
    }
}

//! IPTC IIM record and dataset constants
//!
//! Dataset numbers and names follow the IPTC-NAA Information Interchange
//! Model. Only the envelope and application records are modeled; the
//! object-data records carry binary payloads out of scope here.

use crate::value::TypeId;

/// Record 1: envelope
pub const ENVELOPE: u8 = 1;
/// Record 2: application
pub const APPLICATION2: u8 = 2;

/// The dataset tag marker that starts every IIM dataset
pub const DATASET_MARKER: u8 = 0x1C;

/// Envelope record datasets
pub mod envelope {
    pub const MODEL_VERSION: u8 = 0;
    pub const CHARACTER_SET: u8 = 90;
}

/// Application record datasets
pub mod application2 {
    pub const RECORD_VERSION: u8 = 0;
    pub const OBJECT_NAME: u8 = 5;
    pub const URGENCY: u8 = 10;
    pub const CATEGORY: u8 = 15;
    pub const KEYWORDS: u8 = 25;
    pub const SPECIAL_INSTRUCTIONS: u8 = 40;
    pub const DATE_CREATED: u8 = 55;
    pub const TIME_CREATED: u8 = 60;
    pub const BYLINE: u8 = 80;
    pub const CITY: u8 = 90;
    pub const PROVINCE_STATE: u8 = 95;
    pub const COUNTRY_NAME: u8 = 101;
    pub const HEADLINE: u8 = 105;
    pub const CREDIT: u8 = 110;
    pub const SOURCE: u8 = 115;
    pub const COPYRIGHT_NOTICE: u8 = 116;
    pub const CAPTION: u8 = 120;
    pub const WRITER: u8 = 122;
}

/// Static description of one dataset
pub struct DatasetInfo {
    pub record: u8,
    pub dataset: u8,
    pub name: &'static str,
    pub type_id: TypeId,
    /// Whether the dataset may occur more than once
    pub repeatable: bool,
}

const DATASETS: &[DatasetInfo] = &[
    DatasetInfo { record: ENVELOPE, dataset: envelope::MODEL_VERSION, name: "ModelVersion", type_id: TypeId::UnsignedShort, repeatable: false },
    DatasetInfo { record: ENVELOPE, dataset: envelope::CHARACTER_SET, name: "CharacterSet", type_id: TypeId::Undefined, repeatable: false },
    DatasetInfo { record: APPLICATION2, dataset: application2::RECORD_VERSION, name: "RecordVersion", type_id: TypeId::UnsignedShort, repeatable: false },
    DatasetInfo { record: APPLICATION2, dataset: application2::OBJECT_NAME, name: "ObjectName", type_id: TypeId::AsciiString, repeatable: false },
    DatasetInfo { record: APPLICATION2, dataset: application2::URGENCY, name: "Urgency", type_id: TypeId::AsciiString, repeatable: false },
    DatasetInfo { record: APPLICATION2, dataset: application2::CATEGORY, name: "Category", type_id: TypeId::AsciiString, repeatable: false },
    DatasetInfo { record: APPLICATION2, dataset: application2::KEYWORDS, name: "Keywords", type_id: TypeId::AsciiString, repeatable: true },
    DatasetInfo { record: APPLICATION2, dataset: application2::SPECIAL_INSTRUCTIONS, name: "SpecialInstructions", type_id: TypeId::AsciiString, repeatable: false },
    DatasetInfo { record: APPLICATION2, dataset: application2::DATE_CREATED, name: "DateCreated", type_id: TypeId::Date, repeatable: false },
    DatasetInfo { record: APPLICATION2, dataset: application2::TIME_CREATED, name: "TimeCreated", type_id: TypeId::Time, repeatable: false },
    DatasetInfo { record: APPLICATION2, dataset: application2::BYLINE, name: "Byline", type_id: TypeId::AsciiString, repeatable: true },
    DatasetInfo { record: APPLICATION2, dataset: application2::CITY, name: "City", type_id: TypeId::AsciiString, repeatable: false },
    DatasetInfo { record: APPLICATION2, dataset: application2::PROVINCE_STATE, name: "ProvinceState", type_id: TypeId::AsciiString, repeatable: false },
    DatasetInfo { record: APPLICATION2, dataset: application2::COUNTRY_NAME, name: "CountryName", type_id: TypeId::AsciiString, repeatable: false },
    DatasetInfo { record: APPLICATION2, dataset: application2::HEADLINE, name: "Headline", type_id: TypeId::AsciiString, repeatable: false },
    DatasetInfo { record: APPLICATION2, dataset: application2::CREDIT, name: "Credit", type_id: TypeId::AsciiString, repeatable: false },
    DatasetInfo { record: APPLICATION2, dataset: application2::SOURCE, name: "Source", type_id: TypeId::AsciiString, repeatable: false },
    DatasetInfo { record: APPLICATION2, dataset: application2::COPYRIGHT_NOTICE, name: "CopyrightNotice", type_id: TypeId::AsciiString, repeatable: false },
    DatasetInfo { record: APPLICATION2, dataset: application2::CAPTION, name: "Caption", type_id: TypeId::AsciiString, repeatable: false },
    DatasetInfo { record: APPLICATION2, dataset: application2::WRITER, name: "Writer", type_id: TypeId::AsciiString, repeatable: false },
];

/// The record name as it appears in metadata keys
pub fn record_name(record: u8) -> Option<&'static str> {
    match record {
        ENVELOPE => Some("Envelope"),
        APPLICATION2 => Some("Application2"),
        _ => None,
    }
}

/// Parses a record name from a metadata key
pub fn record_by_name(name: &str) -> Option<u8> {
    match name {
        "Envelope" => Some(ENVELOPE),
        "Application2" => Some(APPLICATION2),
        _ => None,
    }
}

/// Looks up the static info for a dataset
pub fn dataset_info(record: u8, dataset: u8) -> Option<&'static DatasetInfo> {
    DATASETS.iter().find(|d| d.record == record && d.dataset == dataset)
}

/// The dataset name for key formatting, hex form for unknown datasets
pub fn dataset_label(record: u8, dataset: u8) -> String {
    match dataset_info(record, dataset) {
        Some(info) => info.name.to_string(),
        None => format!("0x{:04x}", dataset),
    }
}

/// Parses a dataset name or hex form back to its number
pub fn dataset_by_name(record: u8, name: &str) -> Option<u8> {
    if let Some(hex) = name.strip_prefix("0x") {
        return u8::from_str_radix(hex.trim_start_matches('0'), 16)
            .ok()
            .or_else(|| u8::from_str_radix(hex, 16).ok());
    }
    DATASETS
        .iter()
        .find(|d| d.record == record && d.name == name)
        .map(|d| d.dataset)
}

/// Whether a dataset may legally repeat
pub fn is_repeatable(record: u8, dataset: u8) -> bool {
    dataset_info(record, dataset).map(|d| d.repeatable).unwrap_or(true)
}

//! Metadata key parsing and formatting
//!
//! Keys are three-part strings of the form `Family.Group.TagName`. The
//! family selects the container (Exif, Iptc or Xmp), the middle part the
//! IFD group, IIM record or XMP namespace prefix, and the last part the
//! tag. Unknown tags are written in hexadecimal so every decoded key can
//! be parsed back.

use std::fmt;

use crate::errors::{MetaError, MetaResult};
use crate::iptc::datasets;
use crate::makernote;
use crate::tiff::constants::{self, Group};
use crate::xmp::registry as xmp_registry;

fn split_key(key: &str) -> MetaResult<(&str, &str, &str)> {
    let mut parts = key.splitn(3, '.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(family), Some(group), Some(tag)) if !group.is_empty() && !tag.is_empty() => {
            Ok((family, group, tag))
        }
        _ => Err(MetaError::InvalidKey(key.to_string())),
    }
}

/// A parsed Exif key, e.g. `Exif.Photo.ExposureTime`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExifKey {
    pub group: Group,
    pub tag: u16,
}

impl ExifKey {
    pub fn new(group: Group, tag: u16) -> Self {
        Self { group, tag }
    }

    /// Parses a key string
    ///
    /// The group is resolved against the standard groups first and the
    /// MakerNote vendor registry second, so vendor keys like
    /// `Exif.Canon.0x0001` parse once the vendor is registered.
    pub fn parse(key: &str) -> MetaResult<ExifKey> {
        let (family, group_name, tag_name) = split_key(key)?;
        if family != "Exif" {
            return Err(MetaError::InvalidKey(key.to_string()));
        }
        let group = Group::from_name(group_name)
            .or_else(|| makernote::vendor_group(group_name))
            .ok_or_else(|| MetaError::InvalidKey(key.to_string()))?;
        let tag = constants::tag_by_name(group, tag_name)
            .ok_or_else(|| MetaError::InvalidKey(key.to_string()))?;
        Ok(ExifKey { group, tag })
    }
}

impl fmt::Display for ExifKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Exif.{}.{}",
            self.group.name(),
            constants::tag_label(self.group, self.tag)
        )
    }
}

/// A parsed IPTC key, e.g. `Iptc.Application2.Keywords`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IptcKey {
    pub record: u8,
    pub dataset: u8,
}

impl IptcKey {
    pub fn new(record: u8, dataset: u8) -> Self {
        Self { record, dataset }
    }

    pub fn parse(key: &str) -> MetaResult<IptcKey> {
        let (family, record_name, dataset_name) = split_key(key)?;
        if family != "Iptc" {
            return Err(MetaError::InvalidKey(key.to_string()));
        }
        let record = datasets::record_by_name(record_name)
            .ok_or_else(|| MetaError::InvalidKey(key.to_string()))?;
        let dataset = datasets::dataset_by_name(record, dataset_name)
            .ok_or_else(|| MetaError::InvalidKey(key.to_string()))?;
        Ok(IptcKey { record, dataset })
    }

    /// Whether this dataset may occur more than once in a record
    pub fn is_repeatable(&self) -> bool {
        datasets::is_repeatable(self.record, self.dataset)
    }
}

impl fmt::Display for IptcKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = datasets::record_name(self.record).unwrap_or("Unknown");
        write!(
            f,
            "Iptc.{}.{}",
            record,
            datasets::dataset_label(self.record, self.dataset)
        )
    }
}

/// A parsed XMP key, e.g. `Xmp.dc.subject`
///
/// The prefix must name a registered namespace; properties themselves
/// are open-ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmpKey {
    pub prefix: String,
    pub property: String,
}

impl XmpKey {
    pub fn new(prefix: &str, property: &str) -> Self {
        Self { prefix: prefix.to_string(), property: property.to_string() }
    }

    pub fn parse(key: &str) -> MetaResult<XmpKey> {
        let (family, prefix, property) = split_key(key)?;
        if family != "Xmp" {
            return Err(MetaError::InvalidKey(key.to_string()));
        }
        if xmp_registry::namespace_uri(prefix).is_none() {
            return Err(MetaError::InvalidKey(format!(
                "{} (unregistered namespace prefix '{}')",
                key, prefix
            )));
        }
        Ok(XmpKey::new(prefix, property))
    }
}

impl fmt::Display for XmpKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Xmp.{}.{}", self.prefix, self.property)
    }
}

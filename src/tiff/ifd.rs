//! Image File Directory (IFD) structures and methods
//!
//! This module implements the core TIFF IFD structures that carry Exif
//! metadata. IFDs are organized as collections of tag entries; entries
//! whose payload does not fit the inline value field point to external
//! data elsewhere in the blob.

use std::fmt;

use log::trace;

use crate::tiff::constants::{self, Group};
use crate::value::type_id::{field_types, TypeId};

/// Represents an entry in an Image File Directory
///
/// Each entry carries the tag id, the wire field type, the component
/// count, and the raw payload bytes (already resolved, whether they were
/// stored inline or behind an offset).
#[derive(Debug, Clone)]
pub struct IfdEntry {
    /// TIFF tag identifier
    pub tag: u16,
    /// Wire field type
    pub field_type: u16,
    /// Number of components
    pub count: u32,
    /// Raw payload bytes in the byte order of the surrounding blob
    pub data: Vec<u8>,
}

impl IfdEntry {
    /// Creates a new IFD entry
    pub fn new(tag: u16, field_type: u16, count: u32, data: Vec<u8>) -> Self {
        trace!(
            "Creating IFD entry: tag={:#06x}, type={}, count={}, {} data bytes",
            tag, field_type, count, data.len()
        );
        Self { tag, field_type, count, data }
    }

    /// Size in bytes of a single component of this entry's field type
    pub fn field_type_size(&self) -> usize {
        match self.field_type {
            field_types::BYTE | field_types::ASCII | field_types::SBYTE
            | field_types::UNDEFINED => 1,
            field_types::SHORT | field_types::SSHORT => 2,
            field_types::LONG | field_types::SLONG | field_types::FLOAT => 4,
            field_types::RATIONAL | field_types::SRATIONAL | field_types::DOUBLE => 8,
            _ => 1,
        }
    }

    /// Total payload size in bytes
    pub fn data_size(&self) -> usize {
        self.field_type_size() * self.count as usize
    }

    /// Whether the payload fits the 4-byte inline value field
    pub fn is_value_inline(&self) -> bool {
        self.data_size() <= 4
    }

    /// The logical type of this entry, defaulting to Undefined for
    /// unknown wire types
    pub fn type_id(&self) -> TypeId {
        TypeId::from_wire(self.field_type).unwrap_or(TypeId::Undefined)
    }

    /// Returns a human-readable description of this entry
    pub fn description(&self, group: Group) -> String {
        format!(
            "Tag: {:#06x} ({}), Type: {}, Count: {}, Size: {}",
            self.tag,
            constants::tag_label(group, self.tag),
            self.type_id().name(),
            self.count,
            self.data_size()
        )
    }
}

/// Represents one Image File Directory
///
/// Exif data is a tree of these: IFD0 (Image), the Exif sub-IFD (Photo),
/// GPS and Interoperability sub-IFDs, the thumbnail directory IFD1, and
/// vendor MakerNote sub-trees.
#[derive(Debug, Clone)]
pub struct Ifd {
    /// The group this directory belongs to
    pub group: Group,
    /// Entries in this IFD, in decode order
    pub entries: Vec<IfdEntry>,
}

impl Ifd {
    /// Creates a new, empty IFD for a group
    pub fn new(group: Group) -> Self {
        Self { group, entries: Vec::new() }
    }

    /// Adds an entry to this IFD
    pub fn add_entry(&mut self, entry: IfdEntry) {
        trace!("Adding entry to {} IFD: {}", self.group.name(), entry.description(self.group));
        self.entries.push(entry);
    }

    /// Gets an entry by tag
    pub fn get_entry(&self, tag: u16) -> Option<&IfdEntry> {
        self.entries.iter().find(|e| e.tag == tag)
    }

    /// Checks if this IFD has a specific tag
    pub fn has_tag(&self, tag: u16) -> bool {
        self.entries.iter().any(|e| e.tag == tag)
    }

    /// Number of entries
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Entries sorted by tag id with duplicates removed, as the TIFF
    /// spec requires for an encoded directory (last occurrence wins)
    pub fn unique_sorted_entries(&self) -> Vec<IfdEntry> {
        let mut unique: Vec<IfdEntry> = Vec::with_capacity(self.entries.len());
        let mut seen = std::collections::HashSet::new();
        for entry in self.entries.iter().rev() {
            if seen.insert(entry.tag) {
                unique.push(entry.clone());
            }
        }
        unique.sort_by_key(|e| e.tag);
        unique
    }

    /// Serialized directory size: count field, entries, next-IFD link
    pub fn directory_size(&self) -> u64 {
        2 + 12 * self.unique_sorted_entries().len() as u64 + 4
    }
}

impl fmt::Display for Ifd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} IFD ({} entries)", self.group.name(), self.entries.len())?;
        for entry in &self.entries {
            writeln!(f, "  {}", entry.description(self.group))?;
        }
        Ok(())
    }
}

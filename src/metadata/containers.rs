//! In-memory metadata containers
//!
//! One container per metadata family. All three are ordered collections
//! of key/value pairs; duplicate keys are legal and preserved in
//! insertion order. `find_key` always returns the first match.

use std::fmt;
use std::slice;

use log::debug;

use crate::errors::{MetaError, MetaResult};
use crate::io::byte_order::ByteOrder;
use crate::metadata::key::{ExifKey, IptcKey, XmpKey};
use crate::value::{TypeId, Value, XmpArrayType, XmpArrayValue};
use crate::xmp::registry as xmp_registry;

/// One key/value pair in a container
#[derive(Debug, Clone)]
pub struct Metadatum {
    pub key: String,
    pub value: Value,
}

impl fmt::Display for Metadatum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.key, self.value)
    }
}

macro_rules! container_common {
    () => {
        /// First entry matching the key, if any
        pub fn find_key(&self, key: &str) -> Option<&Value> {
            self.entries.iter().find(|m| m.key == key).map(|m| &m.value)
        }

        /// Mutable access to the first entry matching the key
        pub fn find_key_mut(&mut self, key: &str) -> Option<&mut Value> {
            self.entries.iter_mut().find(|m| m.key == key).map(|m| &mut m.value)
        }

        /// Removes the first entry matching the key and returns it
        pub fn erase(&mut self, key: &str) -> Option<Metadatum> {
            let pos = self.entries.iter().position(|m| m.key == key)?;
            Some(self.entries.remove(pos))
        }

        /// Removes every entry matching the key, returning the count
        pub fn erase_all(&mut self, key: &str) -> usize {
            let before = self.entries.len();
            self.entries.retain(|m| m.key != key);
            before - self.entries.len()
        }

        pub fn clear(&mut self) {
            self.entries.clear();
        }

        pub fn iter(&self) -> slice::Iter<'_, Metadatum> {
            self.entries.iter()
        }

        pub fn iter_mut(&mut self) -> slice::IterMut<'_, Metadatum> {
            self.entries.iter_mut()
        }

        pub fn len(&self) -> usize {
            self.entries.len()
        }

        pub fn is_empty(&self) -> bool {
            self.entries.is_empty()
        }
    };
}

/// The Exif metadata container
///
/// Carries the decoded IFD tree as a flat, ordered list plus the
/// properties that do not live in any entry: the blob byte order and the
/// IFD1 thumbnail image.
#[derive(Debug, Clone, Default)]
pub struct ExifData {
    pub(crate) entries: Vec<Metadatum>,
    /// Byte order the source blob used, reused when re-encoding
    pub byte_order: ByteOrder,
    /// Raw thumbnail image referenced from IFD1
    pub thumbnail: Option<Vec<u8>>,
}

impl ExifData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry after validating the key
    pub fn add(&mut self, key: &str, value: Value) -> MetaResult<()> {
        ExifKey::parse(key)?;
        self.entries.push(Metadatum { key: key.to_string(), value });
        Ok(())
    }

    /// Replaces the first entry with this key, or appends a new one
    pub fn set(&mut self, key: &str, value: Value) -> MetaResult<()> {
        ExifKey::parse(key)?;
        match self.entries.iter_mut().find(|m| m.key == key) {
            Some(entry) => entry.value = value,
            None => self.entries.push(Metadatum { key: key.to_string(), value }),
        }
        Ok(())
    }

    container_common!();
}

/// The IPTC metadata container
#[derive(Debug, Clone, Default)]
pub struct IptcData {
    pub(crate) entries: Vec<Metadatum>,
}

impl IptcData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a dataset
    ///
    /// A second occurrence of a non-repeatable dataset is rejected; use
    /// `set` to overwrite instead.
    pub fn add(&mut self, key: &str, value: Value) -> MetaResult<()> {
        let parsed = IptcKey::parse(key)?;
        if !parsed.is_repeatable() && self.find_key(key).is_some() {
            return Err(MetaError::InvalidValue(format!(
                "dataset {} is not repeatable",
                key
            )));
        }
        self.entries.push(Metadatum { key: key.to_string(), value });
        Ok(())
    }

    /// Replaces the first entry with this key, or appends a new one
    pub fn set(&mut self, key: &str, value: Value) -> MetaResult<()> {
        IptcKey::parse(key)?;
        match self.entries.iter_mut().find(|m| m.key == key) {
            Some(entry) => entry.value = value,
            None => self.entries.push(Metadatum { key: key.to_string(), value }),
        }
        Ok(())
    }

    container_common!();
}

/// The XMP metadata container
#[derive(Debug, Clone, Default)]
pub struct XmpData {
    pub(crate) entries: Vec<Metadatum>,
}

impl XmpData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a property without array accumulation
    pub fn add(&mut self, key: &str, value: Value) -> MetaResult<()> {
        XmpKey::parse(key)?;
        self.entries.push(Metadatum { key: key.to_string(), value });
        Ok(())
    }

    /// Sets a property, accumulating into registered array properties
    ///
    /// When the property is registered as a Bag or Seq, each call appends
    /// one item to the array value, creating it on first use. Other
    /// properties are replaced in place.
    pub fn set(&mut self, key: &str, value: Value) -> MetaResult<()> {
        let parsed = XmpKey::parse(key)?;
        let prop_type = xmp_registry::property_type(&parsed.prefix, &parsed.property);

        let array_type = match prop_type {
            TypeId::XmpBag => Some(XmpArrayType::Bag),
            TypeId::XmpSeq => Some(XmpArrayType::Seq),
            _ => None,
        };

        if let Some(array_type) = array_type {
            let item = value.to_string();
            match self.find_key_mut(key) {
                Some(Value::XmpArray(array)) => {
                    debug!("Appending to {} array {}", array.array_type.rdf_name(), key);
                    array.items.push(item);
                }
                Some(other) => {
                    let mut array = XmpArrayValue::new(array_type);
                    array.items.push(item);
                    *other = Value::XmpArray(array);
                }
                None => {
                    let mut array = XmpArrayValue::new(array_type);
                    array.items.push(item);
                    self.entries.push(Metadatum {
                        key: key.to_string(),
                        value: Value::XmpArray(array),
                    });
                }
            }
            return Ok(());
        }

        match self.entries.iter_mut().find(|m| m.key == key) {
            Some(entry) => entry.value = value,
            None => self.entries.push(Metadatum { key: key.to_string(), value }),
        }
        Ok(())
    }

    container_common!();
}

//! Process-wide MakerNote vendor registry
//!
//! A lazily-constructed singleton guarded by a mutex. Lookup scores
//! registered (make, model) patterns against the camera strings decoded
//! from IFD0 and returns the best-scoring descriptor.

use std::sync::Mutex;

use lazy_static::lazy_static;
use log::{debug, trace};

use crate::io::byte_order::ByteOrder;
use crate::makernote::{OffsetBase, BUILTIN_VENDORS};
use crate::tiff::constants::Group;

/// Describes one vendor's MakerNote layout
#[derive(Debug, Clone, Copy)]
pub struct VendorSpec {
    /// Camera make pattern; a trailing `*` matches any suffix
    pub make: &'static str,
    /// Camera model pattern within this make
    pub model: &'static str,
    /// Group label used in metadata keys, e.g. `Exif.Canon.0x0001`
    pub label: &'static str,
    /// Magic prefix expected at the start of the MakerNote
    pub header: &'static [u8],
    /// Bytes to skip before the directory (may exceed the magic length)
    pub header_len: usize,
    /// How directory offsets are interpreted
    pub offset_base: OffsetBase,
    /// Whether a complete TIFF header follows the magic (Nikon)
    pub embedded_tiff: bool,
    /// Byte order override, when the vendor fixes one
    pub forced_order: Option<ByteOrder>,
}

impl VendorSpec {
    /// Validates the magic prefix; entries are only trusted after this
    /// succeeds
    pub fn check_header(&self, data: &[u8]) -> bool {
        data.len() >= self.header_len && data.starts_with(self.header)
    }
}

lazy_static! {
    static ref REGISTRY: Mutex<Vec<VendorSpec>> = Mutex::new(BUILTIN_VENDORS.to_vec());
}

/// Registers an additional vendor descriptor
pub fn register(spec: VendorSpec) {
    REGISTRY.lock().unwrap().push(spec);
}

/// Tears down the registry, restoring the built-in descriptors
pub fn shutdown() {
    let mut registry = REGISTRY.lock().unwrap();
    registry.clear();
    registry.extend_from_slice(BUILTIN_VENDORS);
}

/// Scores a pattern against a value, case-insensitively
///
/// An exact match scores highest, a trailing-wildcard prefix match
/// scores by the length of the matched literal, and a bare `*` scores 1.
/// A non-match scores 0.
pub fn match_score(pattern: &str, value: &str) -> usize {
    let pattern_lower = pattern.to_ascii_lowercase();
    let value_lower = value.to_ascii_lowercase();

    match pattern_lower.strip_suffix('*') {
        Some(literal) => {
            if value_lower.starts_with(literal) {
                literal.len() + 1
            } else {
                0
            }
        }
        None => {
            if pattern_lower == value_lower {
                pattern_lower.len() + 2
            } else {
                0
            }
        }
    }
}

/// Finds the best vendor descriptor for a camera make and model
///
/// The best-scoring make is chosen first, then the best-scoring model
/// among that make's entries. Returns None when nothing matches.
pub fn create(make: &str, model: &str) -> Option<VendorSpec> {
    let registry = REGISTRY.lock().unwrap();

    let best_make_score = registry
        .iter()
        .map(|spec| match_score(spec.make, make))
        .max()
        .unwrap_or(0);
    if best_make_score == 0 {
        trace!("No MakerNote vendor registered for make '{}'", make);
        return None;
    }

    let spec = registry
        .iter()
        .filter(|spec| match_score(spec.make, make) == best_make_score)
        .max_by_key(|spec| match_score(spec.model, model))
        .filter(|spec| match_score(spec.model, model) > 0)
        .copied();

    if let Some(spec) = &spec {
        debug!("Selected MakerNote decoder '{}' for {}/{}", spec.label, make, model);
    }
    spec
}

/// Resolves a vendor group label to its Group, for key parsing
pub fn vendor_group(label: &str) -> Option<Group> {
    REGISTRY
        .lock()
        .unwrap()
        .iter()
        .find(|spec| spec.label == label)
        .map(|spec| Group::Vendor(spec.label))
}

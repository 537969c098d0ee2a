//! Metadata containers, keys and conversions
//!
//! The three container types hold decoded metadata as ordered key/value
//! lists. Format adapters fill them on read and serialize them back on
//! write; everything in between (lookup, editing, conversion) happens
//! here, independent of any container format.

pub mod containers;
pub mod convert;
pub mod key;
#[cfg(test)]
mod tests;

pub use containers::{ExifData, IptcData, Metadatum, XmpData};
pub use convert::{copy_exif_to_xmp, copy_xmp_to_exif};
pub use key::{ExifKey, IptcKey, XmpKey};

//! TIFF/IFD structure processing
//!
//! The Exif payload of every supported container is a TIFF blob: a
//! header naming the byte order, then a chain of IFDs with sub-IFD
//! pointer tags. This module decodes such blobs into the Exif container
//! and re-encodes containers into fresh blobs with relocated offsets.

pub mod constants;
pub mod ifd;
pub mod reader;
pub mod writer;
#[cfg(test)]
mod tests;

pub use constants::Group;
pub use ifd::{Ifd, IfdEntry};
pub use reader::ExifReader;
pub use writer::ExifWriter;

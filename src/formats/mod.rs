//! Container format adapters
//!
//! Each adapter knows how to locate the raw metadata byte ranges inside
//! one file format and hands them to the Exif, IPTC and XMP codecs. The
//! adapters share the ImageFile trait so callers can work with any
//! format through one interface.

use std::fs::File;
use std::io::Read;

use log::debug;

use crate::errors::{MetaError, MetaResult};
use crate::metadata::{ExifData, IptcData, XmpData};

pub mod exv;
pub mod jpeg;
pub mod png;
pub mod tiff;
#[cfg(test)]
mod tests;

pub use exv::ExvFile;
pub use jpeg::JpegFile;
pub use png::PngFile;
pub use tiff::TiffFile;

/// Common interface over all container formats
///
/// An adapter owns the path of its file plus one container per metadata
/// family. `read_metadata` populates the containers from the file;
/// `write_metadata` re-serializes the containers and splices them back,
/// preserving all non-metadata bytes.
pub trait ImageFile {
    /// Short format name for diagnostics
    fn format_name(&self) -> &'static str;

    fn exif_data(&self) -> &ExifData;
    fn exif_data_mut(&mut self) -> &mut ExifData;

    fn iptc_data(&self) -> &IptcData;
    fn iptc_data_mut(&mut self) -> &mut IptcData;

    fn xmp_data(&self) -> &XmpData;
    fn xmp_data_mut(&mut self) -> &mut XmpData;

    /// The file comment, where the format has one (JPEG COM)
    fn comment(&self) -> Option<&str> {
        None
    }

    fn set_comment(&mut self, _comment: &str) -> MetaResult<()> {
        Err(MetaError::NotSupported("comments in this format"))
    }

    fn clear_comment(&mut self) {}

    /// Loads all metadata families from the file
    ///
    /// One family failing to decode leaves that family empty and the
    /// others intact; only I/O and container-level framing errors abort.
    fn read_metadata(&mut self) -> MetaResult<()>;

    /// Writes the current containers back into the file
    fn write_metadata(&mut self) -> MetaResult<()>;
}

/// Opens an image file, sniffing the format from its leading bytes
///
/// Probes each known format in sequence; a mismatch moves on to the
/// next candidate and only an unrecognized signature is an error.
pub fn open(path: &str) -> MetaResult<Box<dyn ImageFile>> {
    let mut file = File::open(path)?;
    let mut header = [0u8; 8];
    let read = file.read(&mut header)?;
    let header = &header[..read];

    if JpegFile::is_this_type(header) {
        debug!("Opening {} as JPEG", path);
        return Ok(Box::new(JpegFile::new(path)));
    }
    if PngFile::is_this_type(header) {
        debug!("Opening {} as PNG", path);
        return Ok(Box::new(PngFile::new(path)));
    }
    if TiffFile::is_this_type(header) {
        debug!("Opening {} as TIFF", path);
        return Ok(Box::new(TiffFile::new(path)));
    }
    if ExvFile::is_this_type(header) {
        debug!("Opening {} as EXV", path);
        return Ok(Box::new(ExvFile::new(path)));
    }

    Err(MetaError::NotThisFormat)
}

/// Writes `data` to a temporary file next to `path` and renames it over
/// the original, so a failed write never leaves a half-written file.
pub(crate) fn replace_file(path: &str, data: &[u8]) -> MetaResult<()> {
    let tmp = format!("{}.tmp", path);
    std::fs::write(&tmp, data)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

//! EXV sidecar adapter
//!
//! A metadata-only container: a 7-byte magic signature followed by the
//! same marker segments a JPEG would carry (APP1 Exif, APP1 XMP, APP13
//! IPTC, COM), terminated by EOI. Writing regenerates the whole file
//! from the containers.

use std::fs;

use crate::errors::{MetaError, MetaResult};
use crate::formats::jpeg::{extract_families, metadata_segments, scan_segments, EOI, MARKER_PREFIX};
use crate::formats::{replace_file, ImageFile};
use crate::metadata::{ExifData, IptcData, XmpData};
use crate::utils::string_utils;

pub const EXV_SIGNATURE: [u8; 7] = [0xFF, 0x01, b'E', b'x', b'i', b'v', b'2'];

/// EXV sidecar file adapter
pub struct ExvFile {
    path: String,
    exif: ExifData,
    iptc: IptcData,
    xmp: XmpData,
    comment: Option<String>,
}

impl ExvFile {
    pub fn new(path: &str) -> Self {
        ExvFile {
            path: path.to_string(),
            exif: ExifData::new(),
            iptc: IptcData::new(),
            xmp: XmpData::new(),
            comment: None,
        }
    }

    pub fn is_this_type(header: &[u8]) -> bool {
        header.starts_with(&EXV_SIGNATURE)
    }

    pub(crate) fn read_from_bytes(&mut self, buf: &[u8]) -> MetaResult<()> {
        if !Self::is_this_type(buf) {
            return Err(MetaError::NotThisFormat);
        }
        let (segments, _) = scan_segments(buf, EXV_SIGNATURE.len())?;

        self.exif = ExifData::new();
        self.iptc = IptcData::new();
        self.xmp = XmpData::new();
        self.comment = None;
        extract_families(
            buf,
            &segments,
            &mut self.exif,
            &mut self.iptc,
            &mut self.xmp,
            &mut self.comment,
        );
        Ok(())
    }

    pub(crate) fn assemble_bytes(&self) -> MetaResult<Vec<u8>> {
        let mut out = EXV_SIGNATURE.to_vec();
        out.extend_from_slice(&metadata_segments(
            &self.exif,
            &self.iptc,
            &self.xmp,
            self.comment.as_deref(),
        )?);
        out.push(MARKER_PREFIX);
        out.push(EOI);
        Ok(out)
    }
}

impl ImageFile for ExvFile {
    fn format_name(&self) -> &'static str {
        "EXV"
    }

    fn exif_data(&self) -> &ExifData {
        &self.exif
    }

    fn exif_data_mut(&mut self) -> &mut ExifData {
        &mut self.exif
    }

    fn iptc_data(&self) -> &IptcData {
        &self.iptc
    }

    fn iptc_data_mut(&mut self) -> &mut IptcData {
        &mut self.iptc
    }

    fn xmp_data(&self) -> &XmpData {
        &self.xmp
    }

    fn xmp_data_mut(&mut self) -> &mut XmpData {
        &mut self.xmp
    }

    fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    fn set_comment(&mut self, comment: &str) -> MetaResult<()> {
        let bytes = string_utils::until_first_nul(comment.as_bytes());
        self.comment = Some(String::from_utf8_lossy(bytes).to_string());
        Ok(())
    }

    fn clear_comment(&mut self) {
        self.comment = None;
    }

    fn read_metadata(&mut self) -> MetaResult<()> {
        let buf = fs::read(&self.path)?;
        self.read_from_bytes(&buf)
    }

    /// The sidecar is regenerated wholesale, so the file does not need
    /// to exist beforehand.
    fn write_metadata(&mut self) -> MetaResult<()> {
        let out = self.assemble_bytes()?;
        replace_file(&self.path, &out)
    }
}

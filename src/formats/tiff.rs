//! TIFF file adapter
//!
//! The whole file is one Exif blob, so reading is a straight pass
//! through the TIFF parser. IPTC and XMP piggyback on IFD0 tags
//! (IPTCNAA and XMLPacket); they are lifted out of the Exif container
//! into their own families on read and folded back in on write.
//!
//! Writing re-encodes the metadata tree only, which suits metadata-only
//! files; pixel strips are not relocated.

use std::fs;

use log::warn;

use crate::errors::{MetaError, MetaResult};
use crate::formats::{replace_file, ImageFile};
use crate::metadata::{ExifData, IptcData, XmpData};
use crate::tiff::{ExifReader, ExifWriter};
use crate::value::Value;
use crate::{iptc, xmp};

const IPTC_KEY: &str = "Exif.Image.IPTCNAA";
const XMP_KEY: &str = "Exif.Image.XMLPacket";

/// TIFF file adapter
pub struct TiffFile {
    path: String,
    exif: ExifData,
    iptc: IptcData,
    xmp: XmpData,
}

impl TiffFile {
    pub fn new(path: &str) -> Self {
        TiffFile {
            path: path.to_string(),
            exif: ExifData::new(),
            iptc: IptcData::new(),
            xmp: XmpData::new(),
        }
    }

    pub fn is_this_type(header: &[u8]) -> bool {
        header.len() >= 4
            && (header.starts_with(&[0x49, 0x49, 0x2A, 0x00])
                || header.starts_with(&[0x4D, 0x4D, 0x00, 0x2A]))
    }

    pub(crate) fn read_from_bytes(&mut self, buf: &[u8]) -> MetaResult<()> {
        self.exif = ExifReader::new().decode(buf)?;
        self.iptc = IptcData::new();
        self.xmp = XmpData::new();

        if let Some(metadatum) = self.exif.erase(IPTC_KEY) {
            match value_bytes(&metadatum.value) {
                Some(block) => match iptc::decode(block) {
                    Ok(decoded) => self.iptc = decoded,
                    Err(err) => warn!("IPTCNAA tag failed to decode: {}", err),
                },
                None => warn!("IPTCNAA tag has no byte payload, skipping"),
            }
        }

        if let Some(metadatum) = self.exif.erase(XMP_KEY) {
            match value_bytes(&metadatum.value) {
                Some(packet) => match xmp::codec::decode(packet) {
                    Ok(decoded) => self.xmp = decoded,
                    Err(err) => warn!("XMLPacket tag failed to decode: {}", err),
                },
                None => warn!("XMLPacket tag has no byte payload, skipping"),
            }
        }
        Ok(())
    }

    pub(crate) fn assemble_bytes(&self) -> MetaResult<Vec<u8>> {
        let mut merged = self.exif.clone();
        if !self.iptc.is_empty() {
            let block = iptc::encode(&self.iptc)?;
            merged.set(IPTC_KEY, Value::Undefined(block))?;
        }
        if !self.xmp.is_empty() {
            let packet = xmp::codec::encode(&self.xmp)?;
            merged.set(XMP_KEY, Value::Byte(packet.into_bytes()))?;
        }
        ExifWriter::new(merged.byte_order).encode(&merged)
    }
}

fn value_bytes(value: &Value) -> Option<&[u8]> {
    match value {
        Value::Byte(bytes) | Value::Undefined(bytes) | Value::Ascii(bytes) => Some(bytes),
        _ => None,
    }
}

impl ImageFile for TiffFile {
    fn format_name(&self) -> &'static str {
        "TIFF"
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

    fn read_metadata(&mut self) -> MetaResult<()> {
        let buf = fs::read(&self.path)?;
        self.read_from_bytes(&buf)
    }

    fn write_metadata(&mut self) -> MetaResult<()> {
        if !Self::is_this_type(&fs::read(&self.path)?) {
            return Err(MetaError::NotThisFormat);
        }
        let out = self.assemble_bytes()?;
        replace_file(&self.path, &out)
    }
}

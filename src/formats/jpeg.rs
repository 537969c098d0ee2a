//! JPEG container adapter
//!
//! Metadata lives in marker segments between SOI and SOS: Exif and XMP
//! in APP1 segments distinguished by an ASCII signature, IPTC inside
//! APP13 "Photoshop 3.0" image resource blocks, and the comment in COM.
//! Writing rebuilds the metadata segments after the leading APP0 run and
//! copies every other segment byte-for-byte.

use std::fs;

use log::{debug, warn};

use crate::errors::{MetaError, MetaResult};
use crate::formats::{replace_file, ImageFile};
use crate::metadata::{ExifData, IptcData, XmpData};
use crate::tiff::{ExifReader, ExifWriter};
use crate::utils::string_utils;
use crate::{iptc, xmp};

pub const MARKER_PREFIX: u8 = 0xFF;
pub const SOI: u8 = 0xD8;
pub const EOI: u8 = 0xD9;
pub const SOS: u8 = 0xDA;
pub const APP0: u8 = 0xE0;
pub const APP1: u8 = 0xE1;
pub const APP13: u8 = 0xED;
pub const COM: u8 = 0xFE;

pub const EXIF_SIGNATURE: &[u8] = b"Exif\0\0";
pub const XMP_SIGNATURE: &[u8] = b"http://ns.adobe.com/xap/1.0/\0";
pub const PHOTOSHOP_SIGNATURE: &[u8] = b"Photoshop 3.0\0";
const IRB_MARKER: &[u8] = b"8BIM";
const IRB_IPTC: u16 = 0x0404;

/// Largest payload a marker segment can carry: the 16-bit size field
/// includes its own two bytes.
const MAX_SEGMENT_PAYLOAD: usize = 0xFFFF - 2;

/// One marker segment, payload addressed into the source buffer
pub(crate) struct Segment {
    pub marker: u8,
    pub start: usize,
    pub end: usize,
}

impl Segment {
    pub fn payload<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        &buf[self.start..self.end]
    }
}

/// Walks marker segments from `pos` until SOS, EOI or end of buffer.
/// Returns the segments plus the offset where the walk stopped.
pub(crate) fn scan_segments(buf: &[u8], mut pos: usize) -> MetaResult<(Vec<Segment>, usize)> {
    let mut segments = Vec::new();
    while pos + 2 <= buf.len() {
        if buf[pos] != MARKER_PREFIX {
            return Err(MetaError::InvalidHeader);
        }
        let marker = buf[pos + 1];
        if marker == SOS || marker == EOI {
            break;
        }
        // 0xFF fill bytes pad the stream up to the next marker
        if marker == MARKER_PREFIX {
            pos += 1;
            continue;
        }
        // Standalone markers carry no length field
        if marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
            pos += 2;
            continue;
        }
        if pos + 4 > buf.len() {
            return Err(MetaError::OffsetOutOfBounds {
                offset: pos as u64 + 4,
                size: buf.len() as u64,
            });
        }
        let size = u16::from_be_bytes([buf[pos + 2], buf[pos + 3]]) as usize;
        if size < 2 || pos + 2 + size > buf.len() {
            return Err(MetaError::OffsetOutOfBounds {
                offset: (pos + 2 + size) as u64,
                size: buf.len() as u64,
            });
        }
        segments.push(Segment {
            marker,
            start: pos + 4,
            end: pos + 2 + size,
        });
        pos += 2 + size;
    }
    Ok((segments, pos))
}

/// Appends one marker segment, rejecting payloads the size field
/// cannot express
pub(crate) fn push_segment(out: &mut Vec<u8>, marker: u8, payload: &[u8]) -> MetaResult<()> {
    if payload.len() > MAX_SEGMENT_PAYLOAD {
        return Err(MetaError::NotSupported(
            "metadata larger than one JPEG segment",
        ));
    }
    out.push(MARKER_PREFIX);
    out.push(marker);
    out.extend_from_slice(&((payload.len() as u16 + 2).to_be_bytes()));
    out.extend_from_slice(payload);
    Ok(())
}

/// True when the segment holds metadata this adapter owns
pub(crate) fn is_metadata_segment(buf: &[u8], segment: &Segment) -> bool {
    let payload = segment.payload(buf);
    match segment.marker {
        APP1 => payload.starts_with(EXIF_SIGNATURE) || payload.starts_with(XMP_SIGNATURE),
        APP13 => payload.starts_with(PHOTOSHOP_SIGNATURE),
        COM => true,
        _ => false,
    }
}

/// Extracts all metadata families from the scanned segments
///
/// Any one family failing to decode leaves that family empty; the
/// failure is logged and the rest of the file is still honored.
pub(crate) fn extract_families(
    buf: &[u8],
    segments: &[Segment],
    exif: &mut ExifData,
    iptc: &mut IptcData,
    xmp_data: &mut XmpData,
    comment: &mut Option<String>,
) {
    let mut irb = Vec::new();

    for segment in segments {
        let payload = segment.payload(buf);
        match segment.marker {
            APP1 if payload.starts_with(EXIF_SIGNATURE) => {
                let blob = &payload[EXIF_SIGNATURE.len()..];
                match ExifReader::new().decode(blob) {
                    Ok(decoded) => *exif = decoded,
                    Err(err) => warn!("Exif segment failed to decode: {}", err),
                }
            }
            APP1 if payload.starts_with(XMP_SIGNATURE) => {
                let packet = &payload[XMP_SIGNATURE.len()..];
                match xmp::codec::decode(packet) {
                    Ok(decoded) => *xmp_data = decoded,
                    Err(err) => warn!("XMP segment failed to decode: {}", err),
                }
            }
            APP13 if payload.starts_with(PHOTOSHOP_SIGNATURE) => {
                // Multiple APP13 segments form one logical resource stream
                irb.extend_from_slice(&payload[PHOTOSHOP_SIGNATURE.len()..]);
            }
            COM if comment.is_none() => {
                *comment = Some(String::from_utf8_lossy(payload).to_string());
            }
            _ => {}
        }
    }

    if let Some(block) = find_iptc_resource(&irb) {
        match iptc::decode(block) {
            Ok(decoded) => *iptc = decoded,
            Err(err) => warn!("IPTC resource failed to decode: {}", err),
        }
    }
}

/// Locates the IPTC resource (0x0404) inside a Photoshop IRB stream
fn find_iptc_resource(irb: &[u8]) -> Option<&[u8]> {
    let mut pos = 0;
    while pos + 12 <= irb.len() {
        if &irb[pos..pos + 4] != IRB_MARKER {
            return None;
        }
        let id = u16::from_be_bytes([irb[pos + 4], irb[pos + 5]]);
        pos += 6;

        // Pascal name, padded so the length byte plus name is even
        let name_len = irb[pos] as usize;
        pos += 1 + name_len;
        if (1 + name_len) % 2 == 1 {
            pos += 1;
        }
        if pos + 4 > irb.len() {
            return None;
        }
        let size = u32::from_be_bytes([irb[pos], irb[pos + 1], irb[pos + 2], irb[pos + 3]]) as usize;
        pos += 4;
        if pos + size > irb.len() {
            return None;
        }
        if id == IRB_IPTC {
            return Some(&irb[pos..pos + size]);
        }
        pos += size;
        if size % 2 == 1 {
            pos += 1;
        }
    }
    None
}

/// Serializes the containers as a run of fresh metadata segments
pub(crate) fn metadata_segments(
    exif: &ExifData,
    iptc: &IptcData,
    xmp_data: &XmpData,
    comment: Option<&str>,
) -> MetaResult<Vec<u8>> {
    let mut out = Vec::new();

    if !exif.is_empty() || exif.thumbnail.is_some() {
        let blob = ExifWriter::new(exif.byte_order).encode(exif)?;
        let mut payload = EXIF_SIGNATURE.to_vec();
        payload.extend_from_slice(&blob);
        push_segment(&mut out, APP1, &payload)?;
    }

    if !xmp_data.is_empty() {
        let packet = xmp::codec::encode(xmp_data)?;
        let mut payload = XMP_SIGNATURE.to_vec();
        payload.extend_from_slice(packet.as_bytes());
        push_segment(&mut out, APP1, &payload)?;
    }

    if !iptc.is_empty() {
        let block = iptc::encode(iptc)?;
        let mut payload = PHOTOSHOP_SIGNATURE.to_vec();
        payload.extend_from_slice(IRB_MARKER);
        payload.extend_from_slice(&IRB_IPTC.to_be_bytes());
        // Empty pascal name plus its padding byte
        payload.extend_from_slice(&[0, 0]);
        payload.extend_from_slice(&(block.len() as u32).to_be_bytes());
        payload.extend_from_slice(&block);
        if block.len() % 2 == 1 {
            payload.push(0);
        }
        push_segment(&mut out, APP13, &payload)?;
    }

    if let Some(text) = comment {
        push_segment(&mut out, COM, text.as_bytes())?;
    }

    Ok(out)
}

/// JPEG file adapter
pub struct JpegFile {
    path: String,
    exif: ExifData,
    iptc: IptcData,
    xmp: XmpData,
    comment: Option<String>,
}

impl JpegFile {
    pub fn new(path: &str) -> Self {
        JpegFile {
            path: path.to_string(),
            exif: ExifData::new(),
            iptc: IptcData::new(),
            xmp: XmpData::new(),
            comment: None,
        }
    }

    pub fn is_this_type(header: &[u8]) -> bool {
        header.len() >= 3 && header[0] == MARKER_PREFIX && header[1] == SOI && header[2] == MARKER_PREFIX
    }

    /// Decodes all metadata families from a complete JPEG byte stream
    pub(crate) fn read_from_bytes(&mut self, buf: &[u8]) -> MetaResult<()> {
        if !Self::is_this_type(buf) {
            return Err(MetaError::NotThisFormat);
        }
        let (segments, _) = scan_segments(buf, 2)?;
        debug!("Scanned {} JPEG segments", segments.len());

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

    /// Builds a new JPEG stream with fresh metadata segments spliced in
    /// after the leading APP0 run; every other segment and the entropy
    /// coded image data are copied byte-for-byte.
    pub(crate) fn assemble_bytes(&self, original: &[u8]) -> MetaResult<Vec<u8>> {
        if !Self::is_this_type(original) {
            return Err(MetaError::NotThisFormat);
        }
        let (segments, tail) = scan_segments(original, 2)?;
        let fresh = metadata_segments(&self.exif, &self.iptc, &self.xmp, self.comment.as_deref())?;

        let mut out = vec![MARKER_PREFIX, SOI];
        let mut inserted = false;
        for segment in &segments {
            if !inserted && segment.marker != APP0 {
                out.extend_from_slice(&fresh);
                inserted = true;
            }
            if is_metadata_segment(original, segment) {
                continue;
            }
            push_segment(&mut out, segment.marker, segment.payload(original))?;
        }
        if !inserted {
            out.extend_from_slice(&fresh);
        }
        out.extend_from_slice(&original[tail..]);
        Ok(out)
    }
}

impl ImageFile for JpegFile {
    fn format_name(&self) -> &'static str {
        "JPEG"
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

    fn write_metadata(&mut self) -> MetaResult<()> {
        let original = fs::read(&self.path)?;
        let out = self.assemble_bytes(&original)?;
        replace_file(&self.path, &out)
    }
}

//! PNG container adapter
//!
//! Exif travels in the eXIf chunk as a raw TIFF blob, XMP in an iTXt
//! chunk keyed "XML:com.adobe.xmp", and IPTC in a tEXt/zTXt raw profile
//! ("Raw profile type iptc", hex-encoded). Writing rebuilds the chunk
//! stream with fresh metadata chunks right after IHDR and recomputes the
//! CRC of every chunk it emits.

use std::fs;
use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::{Compression, Crc};
use log::{debug, warn};

use crate::errors::{MetaError, MetaResult};
use crate::formats::{replace_file, ImageFile};
use crate::metadata::{ExifData, IptcData, XmpData};
use crate::tiff::{ExifReader, ExifWriter};
use crate::{iptc, xmp};

pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

const XMP_KEYWORD: &[u8] = b"XML:com.adobe.xmp";
const IPTC_PROFILE_KEYWORD: &[u8] = b"Raw profile type iptc";

/// One chunk, data addressed into the source buffer
struct Chunk {
    kind: [u8; 4],
    start: usize,
    end: usize,
}

impl Chunk {
    fn data<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        &buf[self.start..self.end]
    }
}

fn scan_chunks(buf: &[u8]) -> MetaResult<Vec<Chunk>> {
    let mut chunks = Vec::new();
    let mut pos = PNG_SIGNATURE.len();
    while pos + 8 <= buf.len() {
        let len = u32::from_be_bytes([buf[pos], buf[pos + 1], buf[pos + 2], buf[pos + 3]]) as usize;
        let kind = [buf[pos + 4], buf[pos + 5], buf[pos + 6], buf[pos + 7]];
        let start = pos + 8;
        let end = start + len;
        if end + 4 > buf.len() {
            return Err(MetaError::OffsetOutOfBounds {
                offset: (end + 4) as u64,
                size: buf.len() as u64,
            });
        }
        chunks.push(Chunk { kind, start, end });
        pos = end + 4;
        if &kind == b"IEND" {
            break;
        }
    }
    Ok(chunks)
}

/// Appends one chunk with a freshly computed CRC over type and data
fn push_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    let mut crc = Crc::new();
    crc.update(kind);
    crc.update(data);
    out.extend_from_slice(&crc.sum().to_be_bytes());
}

fn inflate(data: &[u8]) -> MetaResult<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}

fn deflate(data: &[u8]) -> MetaResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Splits text-chunk data at the first NUL into keyword and remainder
fn split_keyword(data: &[u8]) -> Option<(&[u8], &[u8])> {
    let pos = data.iter().position(|b| *b == 0)?;
    Some((&data[..pos], &data[pos + 1..]))
}

/// Extracts the XMP packet from iTXt chunk data, inflating when the
/// compression flag is set
fn itxt_text(rest: &[u8]) -> MetaResult<Vec<u8>> {
    if rest.len() < 2 {
        return Err(MetaError::InvalidHeader);
    }
    let compressed = rest[0] == 1;
    let mut pos = 2;
    // Skip the language tag and translated keyword
    for _ in 0..2 {
        match rest[pos..].iter().position(|b| *b == 0) {
            Some(nul) => pos += nul + 1,
            None => return Err(MetaError::InvalidHeader),
        }
    }
    let text = &rest[pos..];
    if compressed {
        inflate(text)
    } else {
        Ok(text.to_vec())
    }
}

/// Decodes an ImageMagick raw profile: a name line, a length line, then
/// hex digits with embedded newlines
fn parse_raw_profile(text: &[u8]) -> Option<Vec<u8>> {
    let text = String::from_utf8_lossy(text);
    let mut lines = text.splitn(4, '\n');
    lines.next()?;
    lines.next()?;
    let length: usize = lines.next()?.trim().parse().ok()?;
    let hex: Vec<u8> = lines
        .next()?
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    let mut out = Vec::with_capacity(length);
    for pair in hex.chunks_exact(2) {
        let high = (pair[0] as char).to_digit(16)?;
        let low = (pair[1] as char).to_digit(16)?;
        out.push((high * 16 + low) as u8);
    }
    if out.len() != length {
        return None;
    }
    Some(out)
}

fn encode_raw_profile(name: &str, data: &[u8]) -> Vec<u8> {
    let mut text = format!("\n{}\n{:8}\n", name, data.len());
    for (i, byte) in data.iter().enumerate() {
        if i > 0 && i % 36 == 0 {
            text.push('\n');
        }
        text.push_str(&format!("{:02x}", byte));
    }
    text.push('\n');
    text.into_bytes()
}

/// True when the chunk holds metadata this adapter owns
fn is_metadata_chunk(buf: &[u8], chunk: &Chunk) -> bool {
    match &chunk.kind {
        b"eXIf" => true,
        b"iTXt" | b"tEXt" | b"zTXt" => match split_keyword(chunk.data(buf)) {
            Some((keyword, _)) => keyword == XMP_KEYWORD || keyword == IPTC_PROFILE_KEYWORD,
            None => false,
        },
        _ => false,
    }
}

/// PNG file adapter
pub struct PngFile {
    path: String,
    exif: ExifData,
    iptc: IptcData,
    xmp: XmpData,
}

impl PngFile {
    pub fn new(path: &str) -> Self {
        PngFile {
            path: path.to_string(),
            exif: ExifData::new(),
            iptc: IptcData::new(),
            xmp: XmpData::new(),
        }
    }

    pub fn is_this_type(header: &[u8]) -> bool {
        header.starts_with(&PNG_SIGNATURE)
    }

    pub(crate) fn read_from_bytes(&mut self, buf: &[u8]) -> MetaResult<()> {
        if !Self::is_this_type(buf) {
            return Err(MetaError::NotThisFormat);
        }
        let chunks = scan_chunks(buf)?;
        debug!("Scanned {} PNG chunks", chunks.len());

        self.exif = ExifData::new();
        self.iptc = IptcData::new();
        self.xmp = XmpData::new();

        for chunk in &chunks {
            match &chunk.kind {
                b"eXIf" => match ExifReader::new().decode(chunk.data(buf)) {
                    Ok(decoded) => self.exif = decoded,
                    Err(err) => warn!("eXIf chunk failed to decode: {}", err),
                },
                b"iTXt" => {
                    let Some((keyword, rest)) = split_keyword(chunk.data(buf)) else {
                        continue;
                    };
                    if keyword != XMP_KEYWORD {
                        continue;
                    }
                    match itxt_text(rest).and_then(|packet| xmp::codec::decode(&packet)) {
                        Ok(decoded) => self.xmp = decoded,
                        Err(err) => warn!("XMP iTXt chunk failed to decode: {}", err),
                    }
                }
                b"tEXt" | b"zTXt" => {
                    let Some((keyword, rest)) = split_keyword(chunk.data(buf)) else {
                        continue;
                    };
                    if keyword != IPTC_PROFILE_KEYWORD {
                        continue;
                    }
                    let text = if &chunk.kind == b"zTXt" {
                        if rest.is_empty() {
                            continue;
                        }
                        match inflate(&rest[1..]) {
                            Ok(text) => text,
                            Err(err) => {
                                warn!("IPTC zTXt chunk failed to inflate: {}", err);
                                continue;
                            }
                        }
                    } else {
                        rest.to_vec()
                    };
                    match parse_raw_profile(&text) {
                        Some(block) => match iptc::decode(&block) {
                            Ok(decoded) => self.iptc = decoded,
                            Err(err) => warn!("IPTC profile failed to decode: {}", err),
                        },
                        None => warn!("Malformed raw IPTC profile, skipping"),
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub(crate) fn assemble_bytes(&self, original: &[u8]) -> MetaResult<Vec<u8>> {
        if !Self::is_this_type(original) {
            return Err(MetaError::NotThisFormat);
        }
        let chunks = scan_chunks(original)?;

        let mut out = PNG_SIGNATURE.to_vec();
        for chunk in &chunks {
            if is_metadata_chunk(original, chunk) {
                continue;
            }
            push_chunk(&mut out, &chunk.kind, chunk.data(original));

            if &chunk.kind == b"IHDR" {
                if !self.exif.is_empty() || self.exif.thumbnail.is_some() {
                    let blob = ExifWriter::new(self.exif.byte_order).encode(&self.exif)?;
                    push_chunk(&mut out, b"eXIf", &blob);
                }
                if !self.xmp.is_empty() {
                    let packet = xmp::codec::encode(&self.xmp)?;
                    let mut data = XMP_KEYWORD.to_vec();
                    // NUL, compression flag and method, empty language
                    // tag and translated keyword
                    data.extend_from_slice(&[0, 0, 0, 0, 0]);
                    data.extend_from_slice(packet.as_bytes());
                    push_chunk(&mut out, b"iTXt", &data);
                }
                if !self.iptc.is_empty() {
                    let block = iptc::encode(&self.iptc)?;
                    let profile = encode_raw_profile("iptc", &block);
                    let mut data = IPTC_PROFILE_KEYWORD.to_vec();
                    data.push(0);
                    data.push(0); // deflate method
                    data.extend_from_slice(&deflate(&profile)?);
                    push_chunk(&mut out, b"zTXt", &data);
                }
            }
        }
        Ok(out)
    }
}

impl ImageFile for PngFile {
    fn format_name(&self) -> &'static str {
        "PNG"
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
        let original = fs::read(&self.path)?;
        let out = self.assemble_bytes(&original)?;
        replace_file(&self.path, &out)
    }
}

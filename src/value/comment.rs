//! Exif user comment value
//!
//! Exif.Photo.UserComment carries an 8-byte charset header followed by the
//! comment payload. Unicode payloads are UCS-2 in the byte order of the
//! surrounding TIFF blob; Undefined payloads are sniffed for a BOM.

use std::fmt;

use crate::errors::{MetaError, MetaResult};
use crate::io::byte_order::ByteOrder;
use crate::utils::string_utils;

/// Charset identifiers defined by the Exif spec for UserComment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharsetId {
    Ascii,
    Jis,
    Unicode,
    #[default]
    Undefined,
}

impl CharsetId {
    /// The fixed 8-byte header for this charset
    pub fn header(&self) -> [u8; 8] {
        match self {
            CharsetId::Ascii => *b"ASCII\0\0\0",
            CharsetId::Jis => *b"JIS\0\0\0\0\0",
            CharsetId::Unicode => *b"UNICODE\0",
            CharsetId::Undefined => [0u8; 8],
        }
    }

    /// Parses the 8-byte header into a charset id
    pub fn from_header(header: &[u8]) -> Option<CharsetId> {
        if header.len() < 8 {
            return None;
        }
        match &header[..8] {
            b"ASCII\0\0\0" => Some(CharsetId::Ascii),
            b"JIS\0\0\0\0\0" => Some(CharsetId::Jis),
            b"UNICODE\0" => Some(CharsetId::Unicode),
            [0, 0, 0, 0, 0, 0, 0, 0] => Some(CharsetId::Undefined),
            _ => None,
        }
    }

    /// Parses a charset name from the textual `charset="..."` prefix
    pub fn from_name(name: &str) -> MetaResult<CharsetId> {
        match name {
            "Ascii" => Ok(CharsetId::Ascii),
            "Jis" => Ok(CharsetId::Jis),
            "Unicode" => Ok(CharsetId::Unicode),
            "Undefined" => Ok(CharsetId::Undefined),
            _ => Err(MetaError::InvalidValue(format!("invalid charset name: {}", name))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharsetId::Ascii => "Ascii",
            CharsetId::Jis => "Jis",
            CharsetId::Unicode => "Unicode",
            CharsetId::Undefined => "Undefined",
        }
    }
}

/// An Exif user comment: charset id plus the raw payload bytes
///
/// The payload is kept in its wire encoding so unmodified comments
/// round-trip byte-for-byte; `comment()` decodes on demand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentValue {
    pub charset: CharsetId,
    /// Payload bytes after the charset header, still charset-encoded
    pub raw: Vec<u8>,
    /// Byte order of the surrounding blob, fixed at read time
    pub order: ByteOrder,
}

impl CommentValue {
    /// Decodes the wire form: 8-byte charset header plus payload
    pub fn read_binary(&mut self, buf: &[u8], order: ByteOrder) -> MetaResult<()> {
        if buf.len() < 8 {
            return Err(MetaError::InvalidValue(
                "user comment shorter than charset header".to_string(),
            ));
        }
        self.charset = CharsetId::from_header(buf).ok_or_else(|| {
            MetaError::InvalidValue("unrecognized comment charset header".to_string())
        })?;
        self.raw = buf[8..].to_vec();
        self.order = order;
        Ok(())
    }

    /// Parses the textual form, with an optional `charset="..."` prefix
    pub fn read_str(&mut self, s: &str) -> MetaResult<()> {
        let (charset, text) = match s.strip_prefix("charset=") {
            Some(rest) => {
                let rest = rest.trim_start();
                let (name, tail) = if let Some(stripped) = rest.strip_prefix('"') {
                    let end = stripped.find('"').ok_or_else(|| {
                        MetaError::InvalidValue(format!("unterminated charset name: {}", s))
                    })?;
                    (&stripped[..end], stripped[end + 1..].trim_start())
                } else {
                    match rest.split_once(' ') {
                        Some((name, tail)) => (name, tail),
                        None => (rest, ""),
                    }
                };
                (CharsetId::from_name(name)?, tail)
            }
            None => (CharsetId::Undefined, s),
        };

        self.charset = charset;
        self.raw = match charset {
            CharsetId::Unicode => string_utils::utf8_to_ucs2(text, self.order),
            _ => text.as_bytes().to_vec(),
        };
        Ok(())
    }

    /// Serializes to the wire form: charset header plus payload
    ///
    /// Unicode payloads are UCS-2 in the byte order of the target blob,
    /// so the raw bytes are swapped when `order` differs from the order
    /// they were read or encoded with.
    pub fn copy(&self, order: ByteOrder) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 + self.raw.len());
        out.extend_from_slice(&self.charset.header());
        if self.charset == CharsetId::Unicode && order != self.order {
            for pair in self.raw.chunks(2) {
                match pair {
                    [lo, hi] => out.extend_from_slice(&[*hi, *lo]),
                    odd => out.extend_from_slice(odd),
                }
            }
        } else {
            out.extend_from_slice(&self.raw);
        }
        out
    }

    /// The decoded comment text
    ///
    /// Ascii and Undefined payloads strip trailing NULs; Undefined also
    /// sniffs for a UTF-8 or UCS-2 BOM when no charset was declared.
    pub fn comment(&self) -> String {
        match self.charset {
            CharsetId::Unicode => {
                if self.raw.starts_with(&[0xFF, 0xFE]) {
                    string_utils::ucs2_to_utf8(&self.raw[2..], ByteOrder::LittleEndian)
                } else if self.raw.starts_with(&[0xFE, 0xFF]) {
                    string_utils::ucs2_to_utf8(&self.raw[2..], ByteOrder::BigEndian)
                } else {
                    string_utils::ucs2_to_utf8(&self.raw, self.order)
                }
            }
            CharsetId::Undefined => {
                if self.raw.starts_with(&[0xEF, 0xBB, 0xBF]) {
                    String::from_utf8_lossy(&self.raw[3..]).to_string()
                } else if self.raw.starts_with(&[0xFF, 0xFE]) {
                    string_utils::ucs2_to_utf8(&self.raw[2..], ByteOrder::LittleEndian)
                } else if self.raw.starts_with(&[0xFE, 0xFF]) {
                    string_utils::ucs2_to_utf8(&self.raw[2..], ByteOrder::BigEndian)
                } else {
                    let mut bytes = self.raw.clone();
                    string_utils::trim_trailing_nulls(&mut bytes);
                    String::from_utf8_lossy(&bytes).to_string()
                }
            }
            _ => {
                let mut bytes = self.raw.clone();
                string_utils::trim_trailing_nulls(&mut bytes);
                String::from_utf8_lossy(&bytes).to_string()
            }
        }
    }

    /// Total serialized size: header plus payload
    pub fn size(&self) -> usize {
        8 + self.raw.len()
    }
}

impl fmt::Display for CommentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.comment())
    }
}

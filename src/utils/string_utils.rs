//! String utility functions
//!
//! Utilities for working with strings, NUL-terminated byte buffers and
//! the UCS-2 encoding used by Exif Unicode comments.

use crate::io::byte_order::ByteOrder;

/// Trims trailing null characters from a byte buffer
pub fn trim_trailing_nulls(buffer: &mut Vec<u8>) {
    while !buffer.is_empty() && buffer[buffer.len() - 1] == 0 {
        buffer.pop();
    }
}

/// Returns the string content up to the first NUL byte
pub fn until_first_nul(buffer: &[u8]) -> &[u8] {
    match buffer.iter().position(|b| *b == 0) {
        Some(pos) => &buffer[..pos],
        None => buffer,
    }
}

/// Encodes UTF-8 text as UCS-2 in the given byte order
pub fn utf8_to_ucs2(text: &str, order: ByteOrder) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for unit in text.encode_utf16() {
        let bytes = match order {
            ByteOrder::LittleEndian => unit.to_le_bytes(),
            ByteOrder::BigEndian => unit.to_be_bytes(),
        };
        out.extend_from_slice(&bytes);
    }
    out
}

/// Decodes UCS-2 bytes in the given byte order to UTF-8 text
///
/// An odd trailing byte is ignored; invalid code units are replaced.
pub fn ucs2_to_utf8(bytes: &[u8], order: ByteOrder) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| match order {
            ByteOrder::LittleEndian => u16::from_le_bytes([pair[0], pair[1]]),
            ByteOrder::BigEndian => u16::from_be_bytes([pair[0], pair[1]]),
        })
        .collect();
    String::from_utf16_lossy(&units)
}

//! Metadata value model
//!
//! This module implements the closed sum type over all metadata value
//! types: the twelve TIFF wire types, the IPTC date/time and Exif comment
//! textual types, and the XMP text/array/language-alternative types.
//! Every variant supports the same read-from-binary, read-from-string,
//! copy-to-binary and string conversion contracts.

pub mod type_id;
pub mod date_time;
pub mod comment;
pub mod lang_alt;
pub mod xmp;
#[cfg(test)]
mod tests;

pub use type_id::{field_types, TypeId};
pub use date_time::{DateValue, TimeValue};
pub use comment::{CharsetId, CommentValue};
pub use lang_alt::{LangAltValue, DEFAULT_LANG};
pub use xmp::{XmpArrayType, XmpArrayValue, XmpTextValue};

use std::fmt;

use byteorder::{BigEndian, ByteOrder as ByteOrderExt, LittleEndian};

use crate::errors::{MetaError, MetaResult};
use crate::io::byte_order::ByteOrder;
use crate::utils::string_utils;

/// A metadata value
///
/// Each variant owns its decoded representation. The binary read/copy
/// contracts operate on the value's native wire width; `count()` is the
/// number of logical components independent of byte size.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Byte(Vec<u8>),
    /// NUL-terminated byte string; a missing terminator is appended on read
    Ascii(Vec<u8>),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<(u32, u32)>),
    SByte(Vec<i8>),
    Undefined(Vec<u8>),
    SShort(Vec<i16>),
    SLong(Vec<i32>),
    SRational(Vec<(i32, i32)>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    Date(DateValue),
    Time(TimeValue),
    Comment(CommentValue),
    XmpText(XmpTextValue),
    XmpArray(XmpArrayValue),
    LangAlt(LangAltValue),
}

impl Value {
    /// Factory: creates an empty value of the given type
    pub fn create(type_id: TypeId) -> Value {
        match type_id {
            TypeId::UnsignedByte => Value::Byte(Vec::new()),
            TypeId::AsciiString => Value::Ascii(Vec::new()),
            TypeId::UnsignedShort => Value::Short(Vec::new()),
            TypeId::UnsignedLong => Value::Long(Vec::new()),
            TypeId::UnsignedRational => Value::Rational(Vec::new()),
            TypeId::SignedByte => Value::SByte(Vec::new()),
            TypeId::Undefined => Value::Undefined(Vec::new()),
            TypeId::SignedShort => Value::SShort(Vec::new()),
            TypeId::SignedLong => Value::SLong(Vec::new()),
            TypeId::SignedRational => Value::SRational(Vec::new()),
            TypeId::TiffFloat => Value::Float(Vec::new()),
            TypeId::TiffDouble => Value::Double(Vec::new()),
            TypeId::Date => Value::Date(DateValue::default()),
            TypeId::Time => Value::Time(TimeValue::default()),
            TypeId::Comment => Value::Comment(CommentValue::default()),
            TypeId::XmpText => Value::XmpText(XmpTextValue::default()),
            TypeId::XmpAlt => Value::XmpArray(XmpArrayValue::new(XmpArrayType::Alt)),
            TypeId::XmpBag => Value::XmpArray(XmpArrayValue::new(XmpArrayType::Bag)),
            TypeId::XmpSeq => Value::XmpArray(XmpArrayValue::new(XmpArrayType::Seq)),
            TypeId::LangAlt => Value::LangAlt(LangAltValue::new()),
        }
    }

    /// Creates an ASCII value from text, appending the NUL terminator
    pub fn ascii_from_str(s: &str) -> Value {
        let mut bytes = s.as_bytes().to_vec();
        bytes.push(0);
        Value::Ascii(bytes)
    }

    /// The type id of this value
    pub fn type_id(&self) -> TypeId {
        match self {
            Value::Byte(_) => TypeId::UnsignedByte,
            Value::Ascii(_) => TypeId::AsciiString,
            Value::Short(_) => TypeId::UnsignedShort,
            Value::Long(_) => TypeId::UnsignedLong,
            Value::Rational(_) => TypeId::UnsignedRational,
            Value::SByte(_) => TypeId::SignedByte,
            Value::Undefined(_) => TypeId::Undefined,
            Value::SShort(_) => TypeId::SignedShort,
            Value::SLong(_) => TypeId::SignedLong,
            Value::SRational(_) => TypeId::SignedRational,
            Value::Float(_) => TypeId::TiffFloat,
            Value::Double(_) => TypeId::TiffDouble,
            Value::Date(_) => TypeId::Date,
            Value::Time(_) => TypeId::Time,
            Value::Comment(_) => TypeId::Comment,
            Value::XmpText(_) => TypeId::XmpText,
            Value::XmpArray(v) => v.array_type.type_id(),
            Value::LangAlt(_) => TypeId::LangAlt,
        }
    }

    /// Number of logical components
    pub fn count(&self) -> usize {
        match self {
            Value::Byte(v) => v.len(),
            Value::Ascii(v) => v.len(),
            Value::Short(v) => v.len(),
            Value::Long(v) => v.len(),
            Value::Rational(v) => v.len(),
            Value::SByte(v) => v.len(),
            Value::Undefined(v) => v.len(),
            Value::SShort(v) => v.len(),
            Value::SLong(v) => v.len(),
            Value::SRational(v) => v.len(),
            Value::Float(v) => v.len(),
            Value::Double(v) => v.len(),
            Value::Date(_) => 8,
            Value::Time(_) => 11,
            Value::Comment(v) => v.size(),
            Value::XmpText(_) => 1,
            Value::XmpArray(v) => v.count(),
            Value::LangAlt(v) => v.count(),
        }
    }

    /// Serialized size in bytes in the type's native width
    pub fn size(&self) -> usize {
        match self {
            Value::Date(_) => 8,
            Value::Time(_) => 11,
            Value::Comment(v) => v.size(),
            Value::XmpText(v) => v.text.len(),
            Value::XmpArray(v) => v.size(),
            Value::LangAlt(v) => v.size(),
            _ => self.count() * self.type_id().type_size(),
        }
    }

    /// Decodes the value from its binary wire form
    ///
    /// Numeric variants require the buffer length to be a multiple of the
    /// component width; the textual variants enforce their own syntax.
    pub fn read_binary(&mut self, buf: &[u8], order: ByteOrder) -> MetaResult<()> {
        fn chunked<T>(
            buf: &[u8],
            width: usize,
            f: impl Fn(&[u8]) -> T,
        ) -> MetaResult<Vec<T>> {
            if buf.len() % width != 0 {
                return Err(MetaError::InvalidValue(format!(
                    "buffer length {} is not a multiple of component width {}",
                    buf.len(),
                    width
                )));
            }
            Ok(buf.chunks_exact(width).map(f).collect())
        }

        match self {
            Value::Byte(v) => {
                *v = buf.to_vec();
            }
            Value::Ascii(v) => {
                *v = buf.to_vec();
                // Exif ASCII convention requires a NUL terminator
                if v.last() != Some(&0) {
                    v.push(0);
                }
            }
            Value::Undefined(v) => {
                *v = buf.to_vec();
            }
            Value::SByte(v) => {
                *v = buf.iter().map(|b| *b as i8).collect();
            }
            Value::Short(v) => {
                *v = chunked(buf, 2, |c| match order {
                    ByteOrder::LittleEndian => LittleEndian::read_u16(c),
                    ByteOrder::BigEndian => BigEndian::read_u16(c),
                })?;
            }
            Value::SShort(v) => {
                *v = chunked(buf, 2, |c| match order {
                    ByteOrder::LittleEndian => LittleEndian::read_i16(c),
                    ByteOrder::BigEndian => BigEndian::read_i16(c),
                })?;
            }
            Value::Long(v) => {
                *v = chunked(buf, 4, |c| match order {
                    ByteOrder::LittleEndian => LittleEndian::read_u32(c),
                    ByteOrder::BigEndian => BigEndian::read_u32(c),
                })?;
            }
            Value::SLong(v) => {
                *v = chunked(buf, 4, |c| match order {
                    ByteOrder::LittleEndian => LittleEndian::read_i32(c),
                    ByteOrder::BigEndian => BigEndian::read_i32(c),
                })?;
            }
            Value::Float(v) => {
                *v = chunked(buf, 4, |c| match order {
                    ByteOrder::LittleEndian => LittleEndian::read_f32(c),
                    ByteOrder::BigEndian => BigEndian::read_f32(c),
                })?;
            }
            Value::Double(v) => {
                *v = chunked(buf, 8, |c| match order {
                    ByteOrder::LittleEndian => LittleEndian::read_f64(c),
                    ByteOrder::BigEndian => BigEndian::read_f64(c),
                })?;
            }
            Value::Rational(v) => {
                *v = chunked(buf, 8, |c| match order {
                    ByteOrder::LittleEndian => {
                        (LittleEndian::read_u32(&c[..4]), LittleEndian::read_u32(&c[4..]))
                    }
                    ByteOrder::BigEndian => {
                        (BigEndian::read_u32(&c[..4]), BigEndian::read_u32(&c[4..]))
                    }
                })?;
            }
            Value::SRational(v) => {
                *v = chunked(buf, 8, |c| match order {
                    ByteOrder::LittleEndian => {
                        (LittleEndian::read_i32(&c[..4]), LittleEndian::read_i32(&c[4..]))
                    }
                    ByteOrder::BigEndian => {
                        (BigEndian::read_i32(&c[..4]), BigEndian::read_i32(&c[4..]))
                    }
                })?;
            }
            Value::Date(v) => {
                let s = String::from_utf8_lossy(string_utils::until_first_nul(buf)).to_string();
                v.read_str(s.trim())?;
            }
            Value::Time(v) => {
                let s = String::from_utf8_lossy(string_utils::until_first_nul(buf)).to_string();
                v.read_str(s.trim())?;
            }
            Value::Comment(v) => {
                v.read_binary(buf, order)?;
            }
            Value::XmpText(v) => {
                v.text = String::from_utf8_lossy(buf).to_string();
            }
            Value::XmpArray(v) => {
                v.items = vec![String::from_utf8_lossy(buf).to_string()];
            }
            Value::LangAlt(v) => {
                let s = String::from_utf8_lossy(buf).to_string();
                v.read_str(&s)?;
            }
        }
        Ok(())
    }

    /// Parses the value from its human-entered textual form
    ///
    /// Numeric variants parse whitespace-separated tokens; rationals use
    /// the `numerator/denominator` form. XMP array values append one item
    /// per call.
    pub fn read_str(&mut self, s: &str) -> MetaResult<()> {
        fn parse_tokens<T: std::str::FromStr>(s: &str) -> MetaResult<Vec<T>> {
            s.split_whitespace()
                .map(|tok| {
                    tok.parse::<T>().map_err(|_| {
                        MetaError::InvalidValue(format!("invalid numeric token: {}", tok))
                    })
                })
                .collect()
        }

        fn parse_rationals<T: std::str::FromStr + Copy>(s: &str) -> MetaResult<Vec<(T, T)>> {
            s.split_whitespace()
                .map(|tok| {
                    let (num, den) = tok.split_once('/').unwrap_or((tok, "1"));
                    let n = num.parse::<T>().map_err(|_| {
                        MetaError::InvalidValue(format!("invalid rational: {}", tok))
                    })?;
                    let d = den.parse::<T>().map_err(|_| {
                        MetaError::InvalidValue(format!("invalid rational: {}", tok))
                    })?;
                    Ok((n, d))
                })
                .collect()
        }

        match self {
            Value::Byte(v) => *v = parse_tokens(s)?,
            Value::Ascii(v) => {
                *v = s.as_bytes().to_vec();
                v.push(0);
            }
            Value::Short(v) => *v = parse_tokens(s)?,
            Value::Long(v) => *v = parse_tokens(s)?,
            Value::Rational(v) => *v = parse_rationals(s)?,
            Value::SByte(v) => *v = parse_tokens(s)?,
            Value::Undefined(v) => *v = parse_tokens(s)?,
            Value::SShort(v) => *v = parse_tokens(s)?,
            Value::SLong(v) => *v = parse_tokens(s)?,
            Value::SRational(v) => *v = parse_rationals(s)?,
            Value::Float(v) => *v = parse_tokens(s)?,
            Value::Double(v) => *v = parse_tokens(s)?,
            Value::Date(v) => v.read_str(s)?,
            Value::Time(v) => v.read_str(s)?,
            Value::Comment(v) => v.read_str(s)?,
            Value::XmpText(v) => v.read_str(s)?,
            Value::XmpArray(v) => v.read_str(s)?,
            Value::LangAlt(v) => v.read_str(s)?,
        }
        Ok(())
    }

    /// Encodes the value to its binary wire form
    pub fn copy(&self, order: ByteOrder) -> Vec<u8> {
        fn put<const N: usize>(out: &mut Vec<u8>, le: [u8; N], be: [u8; N], order: ByteOrder) {
            match order {
                ByteOrder::LittleEndian => out.extend_from_slice(&le),
                ByteOrder::BigEndian => out.extend_from_slice(&be),
            }
        }

        let mut out = Vec::with_capacity(self.size());
        match self {
            Value::Byte(v) | Value::Ascii(v) | Value::Undefined(v) => {
                out.extend_from_slice(v);
            }
            Value::SByte(v) => {
                out.extend(v.iter().map(|b| *b as u8));
            }
            Value::Short(v) => {
                for x in v {
                    put(&mut out, x.to_le_bytes(), x.to_be_bytes(), order);
                }
            }
            Value::SShort(v) => {
                for x in v {
                    put(&mut out, x.to_le_bytes(), x.to_be_bytes(), order);
                }
            }
            Value::Long(v) => {
                for x in v {
                    put(&mut out, x.to_le_bytes(), x.to_be_bytes(), order);
                }
            }
            Value::SLong(v) => {
                for x in v {
                    put(&mut out, x.to_le_bytes(), x.to_be_bytes(), order);
                }
            }
            Value::Float(v) => {
                for x in v {
                    put(&mut out, x.to_le_bytes(), x.to_be_bytes(), order);
                }
            }
            Value::Double(v) => {
                for x in v {
                    put(&mut out, x.to_le_bytes(), x.to_be_bytes(), order);
                }
            }
            Value::Rational(v) => {
                for (n, d) in v {
                    put(&mut out, n.to_le_bytes(), n.to_be_bytes(), order);
                    put(&mut out, d.to_le_bytes(), d.to_be_bytes(), order);
                }
            }
            Value::SRational(v) => {
                for (n, d) in v {
                    put(&mut out, n.to_le_bytes(), n.to_be_bytes(), order);
                    put(&mut out, d.to_le_bytes(), d.to_be_bytes(), order);
                }
            }
            Value::Date(v) => out.extend_from_slice(v.to_wire_string().as_bytes()),
            Value::Time(v) => out.extend_from_slice(v.to_wire_string().as_bytes()),
            Value::Comment(v) => out = v.copy(order),
            Value::XmpText(v) => out.extend_from_slice(v.text.as_bytes()),
            Value::XmpArray(v) => out.extend_from_slice(v.items.join("\0").as_bytes()),
            Value::LangAlt(v) => out.extend_from_slice(v.to_string().as_bytes()),
        }
        out
    }

    /// The component at `idx` as a signed 64-bit integer
    pub fn to_i64(&self, idx: usize) -> Option<i64> {
        match self {
            Value::Byte(v) => v.get(idx).map(|x| *x as i64),
            Value::Ascii(v) => v.get(idx).map(|x| *x as i64),
            Value::Short(v) => v.get(idx).map(|x| *x as i64),
            Value::Long(v) => v.get(idx).map(|x| *x as i64),
            Value::Rational(v) => v.get(idx).and_then(|(n, d)| {
                if *d == 0 {
                    None
                } else {
                    Some(*n as i64 / *d as i64)
                }
            }),
            Value::SByte(v) => v.get(idx).map(|x| *x as i64),
            Value::Undefined(v) => v.get(idx).map(|x| *x as i64),
            Value::SShort(v) => v.get(idx).map(|x| *x as i64),
            Value::SLong(v) => v.get(idx).map(|x| *x as i64),
            Value::SRational(v) => v.get(idx).and_then(|(n, d)| {
                if *d == 0 {
                    None
                } else {
                    Some(*n as i64 / *d as i64)
                }
            }),
            Value::Float(v) => v.get(idx).map(|x| *x as i64),
            Value::Double(v) => v.get(idx).map(|x| *x as i64),
            Value::Date(v) => v.to_i64(),
            Value::Time(v) => v.to_i64(),
            _ => None,
        }
    }

    /// The component at `idx` as an unsigned 32-bit integer
    pub fn to_u32(&self, idx: usize) -> Option<u32> {
        self.to_i64(idx).and_then(|x| u32::try_from(x).ok())
    }

    /// The component at `idx` as a floating point number
    pub fn to_f64(&self, idx: usize) -> Option<f64> {
        match self {
            Value::Float(v) => v.get(idx).map(|x| *x as f64),
            Value::Double(v) => v.get(idx).copied(),
            Value::Rational(v) => v.get(idx).and_then(|(n, d)| {
                if *d == 0 {
                    None
                } else {
                    Some(*n as f64 / *d as f64)
                }
            }),
            Value::SRational(v) => v.get(idx).and_then(|(n, d)| {
                if *d == 0 {
                    None
                } else {
                    Some(*n as f64 / *d as f64)
                }
            }),
            _ => self.to_i64(idx).map(|x| x as f64),
        }
    }

    /// The component at `idx` as a signed rational
    pub fn to_rational(&self, idx: usize) -> Option<(i32, i32)> {
        match self {
            Value::Rational(v) => v
                .get(idx)
                .and_then(|(n, d)| Some((i32::try_from(*n).ok()?, i32::try_from(*d).ok()?))),
            Value::SRational(v) => v.get(idx).copied(),
            _ => self.to_i64(idx).and_then(|x| Some((i32::try_from(x).ok()?, 1))),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, v: &[T]) -> fmt::Result {
            let mut first = true;
            for x in v {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{}", x)?;
                first = false;
            }
            Ok(())
        }

        match self {
            Value::Byte(v) => join(f, v),
            Value::Ascii(v) => {
                let text = string_utils::until_first_nul(v);
                write!(f, "{}", String::from_utf8_lossy(text))
            }
            Value::Short(v) => join(f, v),
            Value::Long(v) => join(f, v),
            Value::Rational(v) => {
                let parts: Vec<String> =
                    v.iter().map(|(n, d)| format!("{}/{}", n, d)).collect();
                write!(f, "{}", parts.join(" "))
            }
            Value::SByte(v) => join(f, v),
            Value::Undefined(v) => join(f, v),
            Value::SShort(v) => join(f, v),
            Value::SLong(v) => join(f, v),
            Value::SRational(v) => {
                let parts: Vec<String> =
                    v.iter().map(|(n, d)| format!("{}/{}", n, d)).collect();
                write!(f, "{}", parts.join(" "))
            }
            Value::Float(v) => join(f, v),
            Value::Double(v) => join(f, v),
            Value::Date(v) => write!(f, "{}", v),
            Value::Time(v) => write!(f, "{}", v),
            Value::Comment(v) => write!(f, "{}", v),
            Value::XmpText(v) => write!(f, "{}", v),
            Value::XmpArray(v) => write!(f, "{}", v),
            Value::LangAlt(v) => write!(f, "{}", v),
        }
    }
}

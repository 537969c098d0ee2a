//! Byte order handling for TIFF-derived metadata blobs
//!
//! This module implements the Strategy pattern for handling different
//! byte orders (little-endian vs big-endian) when reading and writing
//! Exif/TIFF data.

use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::Result;

use crate::errors::{MetaError, MetaResult};
use crate::io::seekable::{SeekableReader, SeekableWriter};

/// Represents the byte order of a TIFF-derived blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Little-endian byte order (II)
    #[default]
    LittleEndian,
    /// Big-endian byte order (MM)
    BigEndian,
}

impl ByteOrder {
    /// Detects the byte order from the TIFF header marker
    pub fn detect(reader: &mut dyn SeekableReader) -> MetaResult<Self> {
        let byte_order = reader.read_u16::<LittleEndian>()?;
        match byte_order {
            0x4949 => Ok(ByteOrder::LittleEndian), // "II" (Intel)
            0x4D4D => Ok(ByteOrder::BigEndian),    // "MM" (Motorola)
            _ => Err(MetaError::InvalidByteOrder(byte_order)),
        }
    }

    /// Returns the two-byte marker for this byte order
    pub fn marker(&self) -> [u8; 2] {
        match self {
            ByteOrder::LittleEndian => [0x49, 0x49],
            ByteOrder::BigEndian => [0x4D, 0x4D],
        }
    }

    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian (II)",
            ByteOrder::BigEndian => "Big Endian (MM)",
        }
    }

    /// Creates the appropriate handler for this byte order
    pub fn create_handler(&self) -> Box<dyn ByteOrderHandler> {
        match self {
            ByteOrder::LittleEndian => Box::new(LittleEndianHandler),
            ByteOrder::BigEndian => Box::new(BigEndianHandler),
        }
    }
}

/// Trait for byte order handling strategies
///
/// Implementations convert between fixed-width values and their wire
/// representation. Callers guarantee buffer capacity; only genuine I/O
/// failures surface here.
pub trait ByteOrderHandler: Send + Sync {
    /// Read a u16 value
    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16>;

    /// Read an i16 value
    fn read_i16(&self, reader: &mut dyn SeekableReader) -> Result<i16>;

    /// Read a u32 value
    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32>;

    /// Read an i32 value
    fn read_i32(&self, reader: &mut dyn SeekableReader) -> Result<i32>;

    /// Read a u64 value
    fn read_u64(&self, reader: &mut dyn SeekableReader) -> Result<u64>;

    /// Read an f32 value
    fn read_f32(&self, reader: &mut dyn SeekableReader) -> Result<f32>;

    /// Read an f64 value
    fn read_f64(&self, reader: &mut dyn SeekableReader) -> Result<f64>;

    /// Read a rational value (two u32 values as numerator/denominator)
    fn read_rational(&self, reader: &mut dyn SeekableReader) -> Result<(u32, u32)>;

    /// Read a signed rational value (two i32 values as numerator/denominator)
    fn read_srational(&self, reader: &mut dyn SeekableReader) -> Result<(i32, i32)>;

    /// Write a u16 value
    fn write_u16(&self, writer: &mut dyn SeekableWriter, value: u16) -> Result<()>;

    /// Write an i16 value
    fn write_i16(&self, writer: &mut dyn SeekableWriter, value: i16) -> Result<()>;

    /// Write a u32 value
    fn write_u32(&self, writer: &mut dyn SeekableWriter, value: u32) -> Result<()>;

    /// Write an i32 value
    fn write_i32(&self, writer: &mut dyn SeekableWriter, value: i32) -> Result<()>;

    /// Write a u64 value
    fn write_u64(&self, writer: &mut dyn SeekableWriter, value: u64) -> Result<()>;

    /// Write an f32 value
    fn write_f32(&self, writer: &mut dyn SeekableWriter, value: f32) -> Result<()>;

    /// Write an f64 value
    fn write_f64(&self, writer: &mut dyn SeekableWriter, value: f64) -> Result<()>;

    /// Write a rational value (two u32 values as numerator/denominator)
    fn write_rational(&self, writer: &mut dyn SeekableWriter, value: (u32, u32)) -> Result<()>;

    /// Write a signed rational value (two i32 values as numerator/denominator)
    fn write_srational(&self, writer: &mut dyn SeekableWriter, value: (i32, i32)) -> Result<()>;
}

/// Little-endian byte order handler
pub struct LittleEndianHandler;

impl ByteOrderHandler for LittleEndianHandler {
    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16> {
        reader.read_u16::<LittleEndian>()
    }

    fn read_i16(&self, reader: &mut dyn SeekableReader) -> Result<i16> {
        reader.read_i16::<LittleEndian>()
    }

    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32> {
        reader.read_u32::<LittleEndian>()
    }

    fn read_i32(&self, reader: &mut dyn SeekableReader) -> Result<i32> {
        reader.read_i32::<LittleEndian>()
    }

    fn read_u64(&self, reader: &mut dyn SeekableReader) -> Result<u64> {
        reader.read_u64::<LittleEndian>()
    }

    fn read_f32(&self, reader: &mut dyn SeekableReader) -> Result<f32> {
        reader.read_f32::<LittleEndian>()
    }

    fn read_f64(&self, reader: &mut dyn SeekableReader) -> Result<f64> {
        reader.read_f64::<LittleEndian>()
    }

    fn read_rational(&self, reader: &mut dyn SeekableReader) -> Result<(u32, u32)> {
        let numerator = reader.read_u32::<LittleEndian>()?;
        let denominator = reader.read_u32::<LittleEndian>()?;
        Ok((numerator, denominator))
    }

    fn read_srational(&self, reader: &mut dyn SeekableReader) -> Result<(i32, i32)> {
        let numerator = reader.read_i32::<LittleEndian>()?;
        let denominator = reader.read_i32::<LittleEndian>()?;
        Ok((numerator, denominator))
    }

    fn write_u16(&self, writer: &mut dyn SeekableWriter, value: u16) -> Result<()> {
        writer.write_u16::<LittleEndian>(value)
    }

    fn write_i16(&self, writer: &mut dyn SeekableWriter, value: i16) -> Result<()> {
        writer.write_i16::<LittleEndian>(value)
    }

    fn write_u32(&self, writer: &mut dyn SeekableWriter, value: u32) -> Result<()> {
        writer.write_u32::<LittleEndian>(value)
    }

    fn write_i32(&self, writer: &mut dyn SeekableWriter, value: i32) -> Result<()> {
        writer.write_i32::<LittleEndian>(value)
    }

    fn write_u64(&self, writer: &mut dyn SeekableWriter, value: u64) -> Result<()> {
        writer.write_u64::<LittleEndian>(value)
    }

    fn write_f32(&self, writer: &mut dyn SeekableWriter, value: f32) -> Result<()> {
        writer.write_f32::<LittleEndian>(value)
    }

    fn write_f64(&self, writer: &mut dyn SeekableWriter, value: f64) -> Result<()> {
        writer.write_f64::<LittleEndian>(value)
    }

    fn write_rational(&self, writer: &mut dyn SeekableWriter, value: (u32, u32)) -> Result<()> {
        writer.write_u32::<LittleEndian>(value.0)?;
        writer.write_u32::<LittleEndian>(value.1)
    }

    fn write_srational(&self, writer: &mut dyn SeekableWriter, value: (i32, i32)) -> Result<()> {
        writer.write_i32::<LittleEndian>(value.0)?;
        writer.write_i32::<LittleEndian>(value.1)
    }
}

/// Big-endian byte order handler
pub struct BigEndianHandler;

impl ByteOrderHandler for BigEndianHandler {
    fn read_u16(&self, reader: &mut dyn SeekableReader) -> Result<u16> {
        reader.read_u16::<BigEndian>()
    }

    fn read_i16(&self, reader: &mut dyn SeekableReader) -> Result<i16> {
        reader.read_i16::<BigEndian>()
    }

    fn read_u32(&self, reader: &mut dyn SeekableReader) -> Result<u32> {
        reader.read_u32::<BigEndian>()
    }

    fn read_i32(&self, reader: &mut dyn SeekableReader) -> Result<i32> {
        reader.read_i32::<BigEndian>()
    }

    fn read_u64(&self, reader: &mut dyn SeekableReader) -> Result<u64> {
        reader.read_u64::<BigEndian>()
    }

    fn read_f32(&self, reader: &mut dyn SeekableReader) -> Result<f32> {
        reader.read_f32::<BigEndian>()
    }

    fn read_f64(&self, reader: &mut dyn SeekableReader) -> Result<f64> {
        reader.read_f64::<BigEndian>()
    }

    fn read_rational(&self, reader: &mut dyn SeekableReader) -> Result<(u32, u32)> {
        let numerator = reader.read_u32::<BigEndian>()?;
        let denominator = reader.read_u32::<BigEndian>()?;
        Ok((numerator, denominator))
    }

    fn read_srational(&self, reader: &mut dyn SeekableReader) -> Result<(i32, i32)> {
        let numerator = reader.read_i32::<BigEndian>()?;
        let denominator = reader.read_i32::<BigEndian>()?;
        Ok((numerator, denominator))
    }

    fn write_u16(&self, writer: &mut dyn SeekableWriter, value: u16) -> Result<()> {
        writer.write_u16::<BigEndian>(value)
    }

    fn write_i16(&self, writer: &mut dyn SeekableWriter, value: i16) -> Result<()> {
        writer.write_i16::<BigEndian>(value)
    }

    fn write_u32(&self, writer: &mut dyn SeekableWriter, value: u32) -> Result<()> {
        writer.write_u32::<BigEndian>(value)
    }

    fn write_i32(&self, writer: &mut dyn SeekableWriter, value: i32) -> Result<()> {
        writer.write_i32::<BigEndian>(value)
    }

    fn write_u64(&self, writer: &mut dyn SeekableWriter, value: u64) -> Result<()> {
        writer.write_u64::<BigEndian>(value)
    }

    fn write_f32(&self, writer: &mut dyn SeekableWriter, value: f32) -> Result<()> {
        writer.write_f32::<BigEndian>(value)
    }

    fn write_f64(&self, writer: &mut dyn SeekableWriter, value: f64) -> Result<()> {
        writer.write_f64::<BigEndian>(value)
    }

    fn write_rational(&self, writer: &mut dyn SeekableWriter, value: (u32, u32)) -> Result<()> {
        writer.write_u32::<BigEndian>(value.0)?;
        writer.write_u32::<BigEndian>(value.1)
    }

    fn write_srational(&self, writer: &mut dyn SeekableWriter, value: (i32, i32)) -> Result<()> {
        writer.write_i32::<BigEndian>(value.0)?;
        writer.write_i32::<BigEndian>(value.1)
    }
}

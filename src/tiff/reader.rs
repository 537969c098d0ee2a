//! Exif blob reader
//!
//! Decodes a TIFF-structured Exif blob into the ExifData container. The
//! reader walks IFD0, the Photo/GPS/Interoperability sub-IFDs reached
//! through pointer tags, the IFD1 thumbnail directory, and any vendor
//! MakerNote sub-tree the registry recognizes. Every offset is validated
//! against the blob size before it is followed.

use std::io::{Cursor, Read, Seek, SeekFrom};

use log::{debug, info, warn};

use crate::errors::{MetaError, MetaResult};
use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::makernote;
use crate::makernote::OffsetBase;
use crate::metadata::containers::{ExifData, Metadatum};
use crate::tiff::constants::{self, header, tags, Group};
use crate::value::{TypeId, Value};

/// Bound on the next-IFD chain, against cyclic links
const MAX_IFD_CHAIN: usize = 32;

/// Bound on sub-IFD nesting
const MAX_SUBIFD_DEPTH: usize = 8;

/// Reader for TIFF-structured Exif blobs
pub struct ExifReader {
    /// Byte order of the blob being decoded
    byte_order: ByteOrder,
    /// Location of the raw MakerNote payload, when one was seen
    maker_note: Option<(usize, usize)>,
}

impl ExifReader {
    /// Creates a new Exif reader
    pub fn new() -> Self {
        ExifReader {
            byte_order: ByteOrder::default(),
            maker_note: None,
        }
    }

    /// Decodes an Exif blob into a container
    ///
    /// This is the main entry point. It parses the TIFF header, walks
    /// the IFD chain and sub-IFDs, captures the IFD1 thumbnail image and
    /// finally decodes the MakerNote once Make and Model are known.
    pub fn decode(&mut self, buf: &[u8]) -> MetaResult<ExifData> {
        if buf.len() < header::SIZE as usize {
            return Err(MetaError::InvalidHeader);
        }

        let mut cursor = Cursor::new(buf);
        let byte_order = ByteOrder::detect(&mut cursor)?;
        let handler = byte_order.create_handler();

        let magic = handler.read_u16(&mut cursor)?;
        if magic != header::TIFF_MAGIC {
            return Err(MetaError::UnsupportedVersion(magic));
        }
        let first_ifd_offset = handler.read_u32(&mut cursor)? as u64;
        debug!("Exif blob: {}, IFD0 at {}", byte_order.name(), first_ifd_offset);

        self.byte_order = byte_order;
        self.maker_note = None;

        let mut data = ExifData::new();
        data.byte_order = byte_order;

        let mut offset = first_ifd_offset;
        let mut number = 0;
        while offset != 0 && number < MAX_IFD_CHAIN {
            let group = match number {
                0 => Group::Image,
                1 => Group::Thumbnail,
                _ => {
                    warn!("Ignoring IFD {} beyond the thumbnail directory", number);
                    break;
                }
            };
            offset = self.process_directory(buf, offset, group, &*handler, 0, &mut data, 0)?;
            number += 1;
        }

        // Vendor decode needs the Make and Model strings from IFD0,
        // which may appear after the MakerNote entry in decode order
        if let Some((start, length)) = self.maker_note {
            self.decode_maker_note(buf, start, length, &mut data);
        }

        self.capture_thumbnail(buf, &mut data);

        info!("Decoded {} Exif entries ({})", data.len(), byte_order.name());
        Ok(data)
    }

    /// The byte order detected by the last decode
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Reads one directory, storing its entries and recursing into
    /// sub-IFDs reached through pointer tags
    ///
    /// `base` is added to every offset in the directory; it is 0 for the
    /// main tree and non-zero only inside MakerNotes whose offsets are
    /// relative to the note itself.
    ///
    /// Returns the offset of the next IFD in the chain, 0 for none.
    fn process_directory(
        &mut self,
        buf: &[u8],
        offset: u64,
        group: Group,
        handler: &dyn ByteOrderHandler,
        base: u64,
        data: &mut ExifData,
        depth: usize,
    ) -> MetaResult<u64> {
        if depth > MAX_SUBIFD_DEPTH {
            return Err(MetaError::GenericError("sub-IFD nesting too deep".to_string()));
        }

        let mut cursor = Cursor::new(buf);
        cursor.seek(SeekFrom::Start(offset))?;
        let entry_count = handler.read_u16(&mut cursor)? as u64;

        let dir_end = offset + 2 + 12 * entry_count + 4;
        if dir_end > buf.len() as u64 {
            return Err(MetaError::OffsetOutOfBounds { offset: dir_end, size: buf.len() as u64 });
        }
        debug!("Reading {} IFD at {} with {} entries", group.name(), offset, entry_count);

        for _ in 0..entry_count {
            let tag = handler.read_u16(&mut cursor)?;
            let field_type = handler.read_u16(&mut cursor)?;
            let count = handler.read_u32(&mut cursor)?;
            let mut value_field = [0u8; 4];
            cursor.read_exact(&mut value_field)?;

            let Some(type_id) = TypeId::from_wire(field_type) else {
                warn!("Skipping tag {:#06x} with unknown field type {}", tag, field_type);
                continue;
            };
            let data_size = count as u64 * type_id.type_size() as u64;

            let payload: Vec<u8> = if data_size <= 4 {
                value_field[..data_size as usize].to_vec()
            } else {
                let raw_offset = read_u32_field(&value_field, self.byte_order) as u64;
                let absolute = base + raw_offset;
                let end = absolute + data_size;
                if end > buf.len() as u64 {
                    return Err(MetaError::OffsetOutOfBounds { offset: end, size: buf.len() as u64 });
                }
                if matches!(group, Group::Photo) && tag == tags::MAKER_NOTE {
                    self.maker_note = Some((absolute as usize, data_size as usize));
                }
                buf[absolute as usize..end as usize].to_vec()
            };

            match (group, tag) {
                (Group::Image, tags::EXIF_IFD_POINTER) => {
                    self.process_pointer(buf, &payload, Group::Photo, handler, base, data, depth)?;
                }
                (Group::Image, tags::GPS_INFO_IFD_POINTER) => {
                    self.process_pointer(buf, &payload, Group::GpsInfo, handler, base, data, depth)?;
                }
                (Group::Photo, tags::INTEROP_IFD_POINTER) => {
                    self.process_pointer(buf, &payload, Group::Iop, handler, base, data, depth)?;
                }
                _ => {
                    let key = format!("Exif.{}.{}", group.name(), constants::tag_label(group, tag));
                    let value = self.entry_to_value(group, tag, type_id, &payload);
                    data.entries.push(Metadatum { key, value });
                }
            }
        }

        let next = handler.read_u32(&mut cursor)? as u64;
        Ok(if next == 0 { 0 } else { base + next })
    }

    /// Follows a sub-IFD pointer tag
    fn process_pointer(
        &mut self,
        buf: &[u8],
        payload: &[u8],
        group: Group,
        handler: &dyn ByteOrderHandler,
        base: u64,
        data: &mut ExifData,
        depth: usize,
    ) -> MetaResult<()> {
        if payload.len() != 4 {
            warn!("Malformed {} pointer, skipping sub-IFD", group.name());
            return Ok(());
        }
        let offset = base + read_u32_field(payload, self.byte_order) as u64;
        // The next-IFD link of a sub-IFD is deliberately not followed
        self.process_directory(buf, offset, group, handler, base, data, depth + 1)?;
        Ok(())
    }

    /// Builds the Value for a decoded entry
    ///
    /// UserComment gets the charset-aware Comment type; a payload that
    /// fails its typed parse is kept as raw bytes so the load continues.
    fn entry_to_value(&self, group: Group, tag: u16, type_id: TypeId, payload: &[u8]) -> Value {
        let type_id = if group == Group::Photo && tag == tags::USER_COMMENT {
            TypeId::Comment
        } else {
            type_id
        };

        let mut value = Value::create(type_id);
        if let Err(e) = value.read_binary(payload, self.byte_order) {
            warn!(
                "Keeping Exif.{}.{} as raw bytes: {}",
                group.name(),
                constants::tag_label(group, tag),
                e
            );
            value = Value::Undefined(payload.to_vec());
        }
        value
    }

    /// Decodes the vendor MakerNote sub-tree, when the registry knows
    /// the camera
    ///
    /// Failures here are never fatal: the raw MakerNote entry is already
    /// in the container and survives a round trip untouched.
    fn decode_maker_note(&mut self, buf: &[u8], start: usize, length: usize, data: &mut ExifData) {
        let make = data
            .find_key("Exif.Image.Make")
            .map(|v| v.to_string())
            .unwrap_or_default();
        let model = data
            .find_key("Exif.Image.Model")
            .map(|v| v.to_string())
            .unwrap_or_default();

        let Some(spec) = makernote::create(&make, &model) else {
            debug!("No MakerNote decoder for {}/{}", make, model);
            return;
        };
        let note = &buf[start..start + length];
        if !spec.check_header(note) {
            warn!("MakerNote header mismatch for {}, keeping raw bytes only", spec.label);
            return;
        }

        let group = Group::Vendor(spec.label);
        let result = if spec.embedded_tiff {
            self.decode_embedded_tiff_note(&note[spec.header_len..], group, data)
        } else {
            let order = spec.forced_order.unwrap_or(self.byte_order);
            let handler = order.create_handler();
            let base = match spec.offset_base {
                OffsetBase::MakerNoteStart => start as u64,
                OffsetBase::TiffHeader | OffsetBase::Absolute => 0,
            };
            let directory = (start + spec.header_len) as u64;
            let saved = self.byte_order;
            self.byte_order = order;
            let result = self
                .process_directory(buf, directory, group, &*handler, base, data, 0)
                .map(|_| ());
            self.byte_order = saved;
            result
        };

        if let Err(e) = result {
            warn!("MakerNote decode for {} failed: {}", spec.label, e);
        }
    }

    /// Decodes a MakerNote that embeds its own TIFF header (Nikon)
    ///
    /// Offsets inside the note are relative to the embedded header, so
    /// the note body is decoded as a self-contained blob.
    fn decode_embedded_tiff_note(
        &mut self,
        note: &[u8],
        group: Group,
        data: &mut ExifData,
    ) -> MetaResult<()> {
        if note.len() < header::SIZE as usize {
            return Err(MetaError::InvalidHeader);
        }
        let mut cursor = Cursor::new(note);
        let order = ByteOrder::detect(&mut cursor)?;
        let handler = order.create_handler();
        let magic = handler.read_u16(&mut cursor)?;
        if magic != header::TIFF_MAGIC {
            return Err(MetaError::UnsupportedVersion(magic));
        }
        let root = handler.read_u32(&mut cursor)? as u64;

        let saved = self.byte_order;
        self.byte_order = order;
        let result = self
            .process_directory(note, root, group, &*handler, 0, data, 0)
            .map(|_| ());
        self.byte_order = saved;
        result
    }

    /// Pulls the thumbnail image referenced from IFD1 into the container
    fn capture_thumbnail(&self, buf: &[u8], data: &mut ExifData) {
        let offset = data
            .find_key("Exif.Thumbnail.JPEGInterchangeFormat")
            .and_then(|v| v.to_u32(0));
        let length = data
            .find_key("Exif.Thumbnail.JPEGInterchangeFormatLength")
            .and_then(|v| v.to_u32(0));

        if let (Some(offset), Some(length)) = (offset, length) {
            let end = offset as u64 + length as u64;
            if end <= buf.len() as u64 && length > 0 {
                debug!("Captured {} byte thumbnail at offset {}", length, offset);
                data.thumbnail = Some(buf[offset as usize..end as usize].to_vec());
            } else {
                warn!("Thumbnail range {}..{} out of bounds, ignoring", offset, end);
            }
        }
    }
}

impl Default for ExifReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads the 4-byte value field as an offset
fn read_u32_field(field: &[u8], order: ByteOrder) -> u32 {
    let bytes = [field[0], field[1], field[2], field[3]];
    match order {
        ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
        ByteOrder::BigEndian => u32::from_be_bytes(bytes),
    }
}

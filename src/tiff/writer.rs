//! Exif blob writer
//!
//! Re-encodes an ExifData container into a fresh TIFF-structured blob.
//! Entries are grouped back into their directories, pointer tags are
//! synthesized for non-empty sub-IFDs and every external payload gets a
//! newly computed offset. The layout is header, IFD0, Photo, Iop, GPS,
//! IFD1, thumbnail image; payloads are padded to even offsets.

use std::io::Cursor;

use log::{debug, warn};

use crate::errors::{MetaError, MetaResult};
use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::metadata::containers::ExifData;
use crate::metadata::key::ExifKey;
use crate::tiff::constants::{header, tags, Group};
use crate::tiff::ifd::{Ifd, IfdEntry};
use crate::value::field_types;

/// Writer for TIFF-structured Exif blobs
pub struct ExifWriter {
    byte_order: ByteOrder,
}

/// One directory prepared for serialization
struct Section {
    entries: Vec<IfdEntry>,
    /// Absolute position of the directory
    dir_offset: u64,
    /// Absolute position of its external payload area
    ext_offset: u64,
}

impl Section {
    fn new(entries: Vec<IfdEntry>) -> Self {
        Section { entries, dir_offset: 0, ext_offset: 0 }
    }

    fn dir_size(&self) -> u64 {
        2 + 12 * self.entries.len() as u64 + 4
    }

    fn ext_size(&self) -> u64 {
        self.entries
            .iter()
            .filter(|e| !e.is_value_inline())
            .map(|e| pad_even(e.data.len() as u64))
            .sum()
    }

    fn total_size(&self) -> u64 {
        self.dir_size() + self.ext_size()
    }

    /// Overwrites the payload of a tag, for pointer and offset fixups
    fn patch(&mut self, tag: u16, value: u32, order: ByteOrder) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.tag == tag) {
            entry.data = match order {
                ByteOrder::LittleEndian => value.to_le_bytes().to_vec(),
                ByteOrder::BigEndian => value.to_be_bytes().to_vec(),
            };
        }
    }
}

fn pad_even(n: u64) -> u64 {
    n + (n & 1)
}

impl ExifWriter {
    /// Creates a writer emitting the given byte order
    pub fn new(byte_order: ByteOrder) -> Self {
        ExifWriter { byte_order }
    }

    /// Encodes a container into a TIFF-structured blob
    pub fn encode(&self, data: &ExifData) -> MetaResult<Vec<u8>> {
        let mut image = Ifd::new(Group::Image);
        let mut thumbnail = Ifd::new(Group::Thumbnail);
        let mut photo = Ifd::new(Group::Photo);
        let mut gps = Ifd::new(Group::GpsInfo);
        let mut iop = Ifd::new(Group::Iop);

        for metadatum in data.iter() {
            let key = ExifKey::parse(&metadatum.key)?;
            let target = match key.group {
                Group::Image => &mut image,
                Group::Thumbnail => &mut thumbnail,
                Group::Photo => &mut photo,
                Group::GpsInfo => &mut gps,
                Group::Iop => &mut iop,
                // Vendor entries are decoded views; the raw MakerNote
                // entry under Photo carries their bytes
                Group::Vendor(_) => continue,
            };

            if is_pointer_tag(key.group, key.tag) {
                continue;
            }
            if key.group == Group::Thumbnail
                && (key.tag == tags::JPEG_INTERCHANGE_FORMAT
                    || key.tag == tags::JPEG_INTERCHANGE_FORMAT_LENGTH)
            {
                // Only ever derived from the relocated thumbnail image;
                // a stale offset entry would dangle
                continue;
            }

            let wire = metadatum.value.type_id().to_wire();
            if wire == 0 {
                warn!("Skipping {}: type has no TIFF wire form", metadatum.key);
                continue;
            }
            let payload = metadatum.value.copy(self.byte_order);
            let count = metadatum.value.count() as u32;
            target.add_entry(IfdEntry::new(key.tag, wire, count, payload));
        }

        // Pointer tags exist only when the sub-IFD they point to does
        if !iop.entries.is_empty() {
            photo.add_entry(pointer_entry(tags::INTEROP_IFD_POINTER));
        }
        if !photo.entries.is_empty() {
            image.add_entry(pointer_entry(tags::EXIF_IFD_POINTER));
        }
        if !gps.entries.is_empty() {
            image.add_entry(pointer_entry(tags::GPS_INFO_IFD_POINTER));
        }
        if let Some(thumb) = &data.thumbnail {
            thumbnail.add_entry(pointer_entry(tags::JPEG_INTERCHANGE_FORMAT));
            let mut length = pointer_entry(tags::JPEG_INTERCHANGE_FORMAT_LENGTH);
            length.data = self.u32_bytes(thumb.len() as u32);
            thumbnail.add_entry(length);
        }

        let mut image = Section::new(image.unique_sorted_entries());
        let mut photo = Section::new(photo.unique_sorted_entries());
        let mut iop = Section::new(iop.unique_sorted_entries());
        let mut gps = Section::new(gps.unique_sorted_entries());
        let mut thumbnail = Section::new(thumbnail.unique_sorted_entries());

        // Layout pass: directory sizes are known, assign every offset.
        // IFD0 is always present, the other directories only when they
        // have entries.
        let mut pos = header::SIZE;
        image.dir_offset = pos;
        image.ext_offset = pos + image.dir_size();
        pos += image.total_size();
        for section in [&mut photo, &mut iop, &mut gps, &mut thumbnail] {
            if section.entries.is_empty() {
                continue;
            }
            section.dir_offset = pos;
            section.ext_offset = pos + section.dir_size();
            pos += section.total_size();
        }
        let thumb_image_offset = pos;
        let total = pos + data.thumbnail.as_ref().map(|t| t.len() as u64).unwrap_or(0);
        if total > u32::MAX as u64 {
            return Err(MetaError::GenericError(format!(
                "encoded blob size {} exceeds the 32-bit offset space",
                total
            )));
        }

        // Link pass: fill pointer payloads with the assigned offsets
        image.patch(tags::EXIF_IFD_POINTER, photo.dir_offset as u32, self.byte_order);
        image.patch(tags::GPS_INFO_IFD_POINTER, gps.dir_offset as u32, self.byte_order);
        photo.patch(tags::INTEROP_IFD_POINTER, iop.dir_offset as u32, self.byte_order);
        thumbnail.patch(
            tags::JPEG_INTERCHANGE_FORMAT,
            thumb_image_offset as u32,
            self.byte_order,
        );

        let handler = self.byte_order.create_handler();
        let mut out = Vec::with_capacity(total as usize);
        out.extend_from_slice(&self.byte_order.marker());
        {
            let mut cursor = Cursor::new(&mut out);
            cursor.set_position(2);
            handler.write_u16(&mut cursor, header::TIFF_MAGIC)?;
            handler.write_u32(&mut cursor, header::SIZE as u32)?;
        }

        let next_after_image = if thumbnail.dir_offset != 0 { thumbnail.dir_offset } else { 0 };
        self.write_section(&mut out, &image, &*handler, next_after_image)?;
        for section in [&photo, &iop, &gps, &thumbnail] {
            if section.dir_offset != 0 {
                self.write_section(&mut out, section, &*handler, 0)?;
            }
        }
        if let Some(thumb) = &data.thumbnail {
            out.extend_from_slice(thumb);
        }

        debug!("Encoded {} byte Exif blob ({})", out.len(), self.byte_order.name());
        Ok(out)
    }

    /// Serializes one directory and its external payload area
    ///
    /// The output vector is already positioned at the section's
    /// directory offset when this is called.
    fn write_section(
        &self,
        out: &mut Vec<u8>,
        section: &Section,
        handler: &dyn ByteOrderHandler,
        next_ifd: u64,
    ) -> MetaResult<()> {
        debug_assert_eq!(out.len() as u64, section.dir_offset);

        let mut dir = Cursor::new(Vec::new());
        let mut ext: Vec<u8> = Vec::new();
        let mut ext_cursor = section.ext_offset;

        handler.write_u16(&mut dir, section.entries.len() as u16)?;
        for entry in &section.entries {
            handler.write_u16(&mut dir, entry.tag)?;
            handler.write_u16(&mut dir, entry.field_type)?;
            handler.write_u32(&mut dir, entry.count)?;
            if entry.is_value_inline() {
                let mut field = [0u8; 4];
                field[..entry.data.len()].copy_from_slice(&entry.data);
                std::io::Write::write_all(&mut dir, &field)?;
            } else {
                handler.write_u32(&mut dir, ext_cursor as u32)?;
                ext.extend_from_slice(&entry.data);
                if entry.data.len() % 2 != 0 {
                    ext.push(0);
                }
                ext_cursor += pad_even(entry.data.len() as u64);
            }
        }
        handler.write_u32(&mut dir, next_ifd as u32)?;

        out.extend_from_slice(&dir.into_inner());
        out.extend_from_slice(&ext);
        Ok(())
    }

    fn u32_bytes(&self, value: u32) -> Vec<u8> {
        match self.byte_order {
            ByteOrder::LittleEndian => value.to_le_bytes().to_vec(),
            ByteOrder::BigEndian => value.to_be_bytes().to_vec(),
        }
    }
}

/// A placeholder LONG entry whose payload is filled in the link pass
fn pointer_entry(tag: u16) -> IfdEntry {
    IfdEntry::new(tag, field_types::LONG, 1, vec![0; 4])
}

fn is_pointer_tag(group: Group, tag: u16) -> bool {
    match group {
        Group::Image => tag == tags::EXIF_IFD_POINTER || tag == tags::GPS_INFO_IFD_POINTER,
        Group::Photo => tag == tags::INTEROP_IFD_POINTER,
        _ => false,
    }
}

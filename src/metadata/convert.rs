//! Exif to XMP conversion
//!
//! A static table maps Exif keys to their XMP counterparts. Conversion
//! renders the Exif value as text and stores it under the target
//! property's registered type, so `Exif.Image.Artist` lands in the
//! `Xmp.dc.creator` Seq and `Exif.Image.ImageDescription` becomes an
//! `x-default` language alternative.

use log::debug;

use crate::errors::MetaResult;
use crate::metadata::containers::{ExifData, XmpData};
use crate::metadata::key::XmpKey;
use crate::value::{LangAltValue, TypeId, Value, XmpTextValue, DEFAULT_LANG};
use crate::xmp::registry as xmp_registry;

const CONVERSIONS: &[(&str, &str)] = &[
    ("Exif.Image.ImageWidth", "Xmp.tiff.ImageWidth"),
    ("Exif.Image.ImageLength", "Xmp.tiff.ImageLength"),
    ("Exif.Image.Make", "Xmp.tiff.Make"),
    ("Exif.Image.Model", "Xmp.tiff.Model"),
    ("Exif.Image.Orientation", "Xmp.tiff.Orientation"),
    ("Exif.Image.XResolution", "Xmp.tiff.XResolution"),
    ("Exif.Image.YResolution", "Xmp.tiff.YResolution"),
    ("Exif.Image.ResolutionUnit", "Xmp.tiff.ResolutionUnit"),
    ("Exif.Image.Software", "Xmp.xmp.CreatorTool"),
    ("Exif.Image.DateTime", "Xmp.xmp.ModifyDate"),
    ("Exif.Image.Artist", "Xmp.dc.creator"),
    ("Exif.Image.ImageDescription", "Xmp.dc.description"),
    ("Exif.Image.Copyright", "Xmp.dc.rights"),
    ("Exif.Photo.DateTimeOriginal", "Xmp.photoshop.DateCreated"),
    ("Exif.Photo.ExposureTime", "Xmp.exif.ExposureTime"),
    ("Exif.Photo.FNumber", "Xmp.exif.FNumber"),
    ("Exif.Photo.ExposureProgram", "Xmp.exif.ExposureProgram"),
    ("Exif.Photo.ISOSpeedRatings", "Xmp.exif.ISOSpeedRatings"),
    ("Exif.Photo.FocalLength", "Xmp.exif.FocalLength"),
    ("Exif.Photo.ColorSpace", "Xmp.exif.ColorSpace"),
    ("Exif.Photo.PixelXDimension", "Xmp.exif.PixelXDimension"),
    ("Exif.Photo.PixelYDimension", "Xmp.exif.PixelYDimension"),
];

/// Copies convertible Exif entries into the XMP container
///
/// Existing XMP properties with the same key are overwritten. When
/// `erase` is set, converted entries are removed from the Exif
/// container.
pub fn copy_exif_to_xmp(exif: &mut ExifData, xmp: &mut XmpData, erase: bool) -> MetaResult<()> {
    for (exif_key, xmp_key) in CONVERSIONS {
        let Some(value) = exif.find_key(exif_key) else {
            continue;
        };
        let text = value.to_string();
        debug!("Converting {} -> {}", exif_key, xmp_key);

        let parsed = XmpKey::parse(xmp_key)?;
        match xmp_registry::property_type(&parsed.prefix, &parsed.property) {
            TypeId::LangAlt => {
                let mut alt = LangAltValue::new();
                alt.set(DEFAULT_LANG, &text)?;
                xmp.set(xmp_key, Value::LangAlt(alt))?;
            }
            TypeId::XmpBag | TypeId::XmpSeq => {
                // set() accumulates into the registered array
                xmp.erase_all(xmp_key);
                xmp.set(xmp_key, Value::XmpText(XmpTextValue::new(&text)))?;
            }
            _ => {
                xmp.set(xmp_key, Value::XmpText(XmpTextValue::new(&text)))?;
            }
        }

        if erase {
            exif.erase_all(exif_key);
        }
    }
    Ok(())
}

/// Copies convertible XMP properties back into the Exif container
///
/// The textual rendering of the XMP value is parsed by the Exif value
/// model; array properties contribute their first item and language
/// alternatives their default entry.
pub fn copy_xmp_to_exif(xmp: &mut XmpData, exif: &mut ExifData, erase: bool) -> MetaResult<()> {
    for (exif_key, xmp_key) in CONVERSIONS {
        let Some(value) = xmp.find_key(xmp_key) else {
            continue;
        };
        let text = match value {
            Value::LangAlt(alt) => match alt.get(DEFAULT_LANG) {
                Some(text) => text.to_string(),
                None => continue,
            },
            Value::XmpArray(array) => match array.items.first() {
                Some(item) => item.clone(),
                None => continue,
            },
            other => other.to_string(),
        };
        debug!("Converting {} -> {}", xmp_key, exif_key);

        exif.set(exif_key, Value::ascii_from_str(&text))?;
        if erase {
            xmp.erase_all(xmp_key);
        }
    }
    Ok(())
}

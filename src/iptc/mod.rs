//! IPTC IIM binary codec
//!
//! IIM data is a flat sequence of datasets, each a 5-byte header (marker
//! 0x1C, record, dataset, big-endian length) followed by the payload.
//! Extended-length datasets (high bit of the length set) are rejected.

pub mod datasets;
#[cfg(test)]
mod tests;

use byteorder::{BigEndian, ByteOrder as ByteOrderExt};
use log::{debug, warn};

use crate::errors::{MetaError, MetaResult};
use crate::io::byte_order::ByteOrder;
use crate::metadata::containers::{IptcData, Metadatum};
use crate::metadata::key::IptcKey;
use crate::utils::string_utils;
use crate::value::{TypeId, Value};

/// Decodes an IIM blob into an IPTC container
///
/// Datasets from unknown records are skipped with a warning; a payload
/// that fails its typed parse is kept as raw Undefined bytes so the
/// container load continues.
pub fn decode(buf: &[u8]) -> MetaResult<IptcData> {
    let mut data = IptcData::new();
    let mut pos = 0;

    while pos < buf.len() {
        if buf[pos] != datasets::DATASET_MARKER {
            return Err(MetaError::InvalidValue(format!(
                "invalid IPTC dataset marker 0x{:02x} at offset {}",
                buf[pos], pos
            )));
        }
        if pos + 5 > buf.len() {
            return Err(MetaError::OffsetOutOfBounds {
                offset: (pos + 5) as u64,
                size: buf.len() as u64,
            });
        }

        let record = buf[pos + 1];
        let dataset = buf[pos + 2];
        let length = BigEndian::read_u16(&buf[pos + 3..pos + 5]);
        if length & 0x8000 != 0 {
            return Err(MetaError::NotSupported("extended IPTC dataset lengths"));
        }

        let start = pos + 5;
        let end = start + length as usize;
        if end > buf.len() {
            return Err(MetaError::OffsetOutOfBounds {
                offset: end as u64,
                size: buf.len() as u64,
            });
        }
        let payload = &buf[start..end];

        match datasets::record_name(record) {
            Some(record_name) => {
                let label = datasets::dataset_label(record, dataset);
                let key = format!("Iptc.{}.{}", record_name, label);
                let type_id = datasets::dataset_info(record, dataset)
                    .map(|info| info.type_id)
                    .unwrap_or(TypeId::AsciiString);

                let mut value = Value::create(type_id);
                if let Err(e) = value.read_binary(payload, ByteOrder::BigEndian) {
                    warn!("Keeping {} as raw bytes: {}", key, e);
                    value = Value::Undefined(payload.to_vec());
                }
                debug!("Decoded {} ({} bytes)", key, payload.len());
                // Pushed directly: duplicates in the source are preserved
                data.entries.push(Metadatum { key, value });
            }
            None => {
                warn!("Skipping dataset {}:{} in unknown record", record, dataset);
            }
        }

        pos = end;
    }

    Ok(data)
}

/// Encodes an IPTC container back to an IIM blob
///
/// Entries are written in container order. ASCII payloads are written
/// without a NUL terminator as IIM strings are length-delimited.
pub fn encode(data: &IptcData) -> MetaResult<Vec<u8>> {
    let mut out = Vec::new();

    for metadatum in data.iter() {
        let key = IptcKey::parse(&metadatum.key)?;
        let payload: Vec<u8> = match &metadatum.value {
            Value::Ascii(v) => string_utils::until_first_nul(v).to_vec(),
            Value::Date(d) => d.to_wire_string().into_bytes(),
            Value::Time(t) => t.to_wire_string().into_bytes(),
            other => other.copy(ByteOrder::BigEndian),
        };
        if payload.len() > 0x7FFF {
            return Err(MetaError::NotSupported("extended IPTC dataset lengths"));
        }

        out.push(datasets::DATASET_MARKER);
        out.push(key.record);
        out.push(key.dataset);
        out.extend_from_slice(&(payload.len() as u16).to_be_bytes());
        out.extend_from_slice(&payload);
    }

    Ok(out)
}

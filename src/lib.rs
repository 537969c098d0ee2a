pub mod errors;
pub mod io;
pub mod value;
pub mod tiff;
pub mod makernote;
pub mod metadata;
pub mod iptc;
pub mod xmp;
pub mod formats;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::MetaKit;

pub use errors::{MetaError, MetaResult};
pub use formats::{open, ImageFile};
pub use metadata::{ExifData, IptcData, Metadatum, XmpData};
pub use tiff::{ExifReader, ExifWriter};
pub use value::Value;

//! Custom error types for metadata processing

use std::fmt;
use std::io;

/// Metadata-specific error types
#[derive(Debug)]
pub enum MetaError {
    /// I/O error
    IoError(io::Error),
    /// Invalid TIFF header
    InvalidHeader,
    /// Invalid byte order marker
    InvalidByteOrder(u16),
    /// Unsupported TIFF version
    UnsupportedVersion(u16),
    /// Offset points past the end of the blob
    OffsetOutOfBounds { offset: u64, size: u64 },
    /// Unsupported field type
    UnsupportedFieldType(u16),
    /// The file is not in the format this adapter handles
    NotThisFormat,
    /// Feature recognized but deliberately not handled
    NotSupported(&'static str),
    /// Malformed metadata key
    InvalidKey(String),
    /// Malformed value text or payload
    InvalidValue(String),
    /// Key not present in the container
    KeyNotFound(String),
    /// XMP packet parsing or serialization failure
    XmpError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for MetaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaError::IoError(e) => write!(f, "I/O error: {}", e),
            MetaError::InvalidHeader => write!(f, "Invalid TIFF header"),
            MetaError::InvalidByteOrder(v) => write!(f, "Invalid byte order marker: {:#06x}", v),
            MetaError::UnsupportedVersion(v) => write!(f, "Unsupported TIFF version: {}", v),
            MetaError::OffsetOutOfBounds { offset, size } => {
                write!(f, "Offset {} out of bounds (blob size {})", offset, size)
            }
            MetaError::UnsupportedFieldType(ft) => write!(f, "Unsupported field type: {}", ft),
            MetaError::NotThisFormat => write!(f, "File is not in this format"),
            MetaError::NotSupported(what) => write!(f, "Not supported: {}", what),
            MetaError::InvalidKey(key) => write!(f, "Invalid metadata key: {}", key),
            MetaError::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
            MetaError::KeyNotFound(key) => write!(f, "Key not found: {}", key),
            MetaError::XmpError(msg) => write!(f, "XMP error: {}", msg),
            MetaError::GenericError(msg) => write!(f, "Metadata error: {}", msg),
        }
    }
}

impl std::error::Error for MetaError {}

impl From<io::Error> for MetaError {
    fn from(error: io::Error) -> Self {
        MetaError::IoError(error)
    }
}

/// Result type for metadata operations
pub type MetaResult<T> = Result<T, MetaError>;

impl From<String> for MetaError {
    fn from(msg: String) -> Self {
        MetaError::GenericError(msg)
    }
}

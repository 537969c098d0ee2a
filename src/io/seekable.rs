//! Seekable reader and writer traits
//!
//! This module provides unified traits for streams that support both
//! data transfer and seeking operations.

use std::io::{Read, Seek, Write};

/// Trait for readers that can both read and seek
///
/// This trait combines the Read and Seek traits for use with
/// various readers throughout the crate.
pub trait SeekableReader: Read + Seek + Send + Sync {}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek + Send + Sync> SeekableReader for T {}

/// Trait for writers that can both write and seek
///
/// Used by the TIFF encoder, which patches directory offsets after
/// the surrounding data has been laid out.
pub trait SeekableWriter: Write + Seek + Send + Sync {}

impl<T: Write + Seek + Send + Sync> SeekableWriter for T {}

//! Tests for the TIFF blob reader and writer

mod reader_tests;
mod writer_tests;

//! Tests for metadata containers, keys and conversions

mod containers_tests;
mod convert_tests;
mod key_tests;

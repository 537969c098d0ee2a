//! Tests for the container format adapters

mod exv_tests;
mod png_tests;
mod tiff_tests;

//! Utility modules for common functionality

pub mod logger;
pub(crate) mod string_utils;

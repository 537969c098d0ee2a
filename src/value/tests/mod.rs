//! Tests for the value model

mod date_time_tests;
mod comment_tests;
mod lang_alt_tests;

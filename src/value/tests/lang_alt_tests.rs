//! Tests for the language alternative value

use crate::value::lang_alt::{is_valid_lang_tag, LangAltValue, DEFAULT_LANG};

#[test]
fn test_lang_tag_grammar() {
    assert!(is_valid_lang_tag("en"));
    assert!(is_valid_lang_tag("en-US"));
    assert!(is_valid_lang_tag("x-default"));
    assert!(is_valid_lang_tag("zh-Hant-TW"));
    assert!(!is_valid_lang_tag(""));
    assert!(!is_valid_lang_tag("en_US"));
    assert!(!is_valid_lang_tag("-en"));
    assert!(!is_valid_lang_tag("en-"));
    assert!(!is_valid_lang_tag("verylongtag1"));
}

#[test]
fn test_read_str_with_and_without_prefix() {
    let mut value = LangAltValue::new();
    value.read_str("plain text").unwrap();
    assert_eq!(value.get(DEFAULT_LANG), Some("plain text"));

    value.read_str("lang=\"de-DE\" Hallo").unwrap();
    assert_eq!(value.get("de-DE"), Some("Hallo"));
    assert_eq!(value.count(), 2);

    assert!(value.read_str("lang=\"no_good\" text").is_err());
}

#[test]
fn test_default_language_serializes_first() {
    // Insertion order must not matter
    let mut value = LangAltValue::new();
    value.set("fr", "bonjour").unwrap();
    value.set("de", "hallo").unwrap();
    value.set(DEFAULT_LANG, "hello").unwrap();
    value.set("aa", "first-alphabetically").unwrap();

    let order = value.write_order();
    assert_eq!(order[0], DEFAULT_LANG);
    assert_eq!(&order[1..], &["aa", "de", "fr"]);

    let display = value.to_string();
    assert!(display.starts_with("lang=\"x-default\" hello"));
    assert!(display.contains("lang=\"de\" hallo"));
    assert!(display.contains("lang=\"fr\" bonjour"));
}

#[test]
fn test_language_keys_are_case_folded() {
    let mut value = LangAltValue::new();
    value.set("EN-us", "hi").unwrap();
    assert_eq!(value.get("en-US"), Some("hi"));
}

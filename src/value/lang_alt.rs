//! XMP language alternative value
//!
//! An rdf:Alt keyed by RFC-3066 language tags. Insertion order is not
//! preserved; serialization always emits the `x-default` entry first and
//! the remaining entries in sorted order.

use std::collections::BTreeMap;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::{MetaError, MetaResult};

/// The language key used when no explicit tag is given
pub const DEFAULT_LANG: &str = "x-default";

lazy_static! {
    /// RFC-3066: a primary alpha subtag followed by alphanumeric subtags
    static ref LANG_TAG: Regex =
        Regex::new(r"^[a-zA-Z]{1,8}(-[a-zA-Z0-9]{1,8})*$").unwrap();
}

/// Checks a language tag against the RFC-3066 grammar
pub fn is_valid_lang_tag(tag: &str) -> bool {
    LANG_TAG.is_match(tag)
}

/// A language-alternative XMP property value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LangAltValue {
    entries: BTreeMap<String, String>,
}

impl LangAltValue {
    pub fn new() -> Self {
        LangAltValue { entries: BTreeMap::new() }
    }

    /// Sets the text for a language, validating the tag grammar
    pub fn set(&mut self, lang: &str, text: &str) -> MetaResult<()> {
        if !is_valid_lang_tag(lang) {
            return Err(MetaError::InvalidValue(format!("invalid language tag: {}", lang)));
        }
        self.entries.insert(lang.to_ascii_lowercase(), text.to_string());
        Ok(())
    }

    /// Gets the text for a language
    pub fn get(&self, lang: &str) -> Option<&str> {
        self.entries.get(&lang.to_ascii_lowercase()).map(|s| s.as_str())
    }

    /// Parses the textual form, with an optional `lang="xx-YY"` prefix
    ///
    /// Without the prefix the text is stored under `x-default`.
    pub fn read_str(&mut self, s: &str) -> MetaResult<()> {
        match s.strip_prefix("lang=") {
            Some(rest) => {
                let rest = rest.trim_start();
                let (tag, text) = if let Some(stripped) = rest.strip_prefix('"') {
                    let end = stripped.find('"').ok_or_else(|| {
                        MetaError::InvalidValue(format!("unterminated language tag: {}", s))
                    })?;
                    (&stripped[..end], stripped[end + 1..].trim_start())
                } else {
                    match rest.split_once(' ') {
                        Some((tag, text)) => (tag, text),
                        None => (rest, ""),
                    }
                };
                self.set(tag, text)
            }
            None => self.set(DEFAULT_LANG, s),
        }
    }

    /// Number of language entries
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Languages in serialization order: `x-default` first, rest sorted
    pub fn write_order(&self) -> Vec<&str> {
        let mut order = Vec::with_capacity(self.entries.len());
        if self.entries.contains_key(DEFAULT_LANG) {
            order.push(DEFAULT_LANG);
        }
        for lang in self.entries.keys() {
            if lang != DEFAULT_LANG {
                order.push(lang.as_str());
            }
        }
        order
    }

    /// Serialized size in bytes of all entries
    pub fn size(&self) -> usize {
        self.entries
            .iter()
            .map(|(lang, text)| lang.len() + text.len() + 2)
            .sum()
    }
}

impl fmt::Display for LangAltValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for lang in self.write_order() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "lang=\"{}\" {}", lang, self.entries[lang])?;
            first = false;
        }
        Ok(())
    }
}

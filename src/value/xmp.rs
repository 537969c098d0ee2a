//! XMP text and array value types

use std::fmt;

use crate::errors::{MetaError, MetaResult};
use crate::value::type_id::TypeId;

/// XMP array forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmpArrayType {
    /// rdf:Alt
    Alt,
    /// rdf:Bag
    Bag,
    /// rdf:Seq
    Seq,
}

impl XmpArrayType {
    pub fn type_id(self) -> TypeId {
        match self {
            XmpArrayType::Alt => TypeId::XmpAlt,
            XmpArrayType::Bag => TypeId::XmpBag,
            XmpArrayType::Seq => TypeId::XmpSeq,
        }
    }

    /// RDF element name for this array form
    pub fn rdf_name(self) -> &'static str {
        match self {
            XmpArrayType::Alt => "rdf:Alt",
            XmpArrayType::Bag => "rdf:Bag",
            XmpArrayType::Seq => "rdf:Seq",
        }
    }
}

/// A simple XMP text property
///
/// The textual form accepts a `type="Alt|Bag|Seq|Struct"` prefix which is
/// recorded as metadata about the property rather than as payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmpTextValue {
    pub text: String,
    /// Declared structure type, when the property is a container
    pub xmp_type: Option<String>,
}

impl XmpTextValue {
    pub fn new(text: &str) -> Self {
        XmpTextValue { text: text.to_string(), xmp_type: None }
    }

    /// Parses the textual form, honoring a `type="..."` prefix
    pub fn read_str(&mut self, s: &str) -> MetaResult<()> {
        match s.strip_prefix("type=") {
            Some(rest) => {
                let rest = rest.trim_start();
                let (name, tail) = if let Some(stripped) = rest.strip_prefix('"') {
                    let end = stripped.find('"').ok_or_else(|| {
                        MetaError::InvalidValue(format!("unterminated type name: {}", s))
                    })?;
                    (&stripped[..end], stripped[end + 1..].trim_start())
                } else {
                    match rest.split_once(' ') {
                        Some((name, tail)) => (name, tail),
                        None => (rest, ""),
                    }
                };
                match name {
                    "Alt" | "Bag" | "Seq" | "Struct" => {
                        self.xmp_type = Some(name.to_string());
                        self.text = tail.to_string();
                        Ok(())
                    }
                    _ => Err(MetaError::InvalidValue(format!("invalid XMP type: {}", name))),
                }
            }
            None => {
                self.text = s.to_string();
                Ok(())
            }
        }
    }
}

impl fmt::Display for XmpTextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// An XMP array property (Bag, Seq or non-language Alt)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmpArrayValue {
    pub array_type: XmpArrayType,
    pub items: Vec<String>,
}

impl XmpArrayValue {
    pub fn new(array_type: XmpArrayType) -> Self {
        XmpArrayValue { array_type, items: Vec::new() }
    }

    /// Appends one item; the textual form adds a single array element
    pub fn read_str(&mut self, s: &str) -> MetaResult<()> {
        self.items.push(s.to_string());
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn size(&self) -> usize {
        self.items.iter().map(|i| i.len() + 1).sum()
    }
}

impl fmt::Display for XmpArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.items.join(", "))
    }
}

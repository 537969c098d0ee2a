//! XMP namespace and property registry
//!
//! A lazily-constructed singleton mapping namespace prefixes to URIs,
//! plus a table of properties with a registered container form. The
//! property table is what makes `XmpData::set` accumulate `dc:subject`
//! into a Bag while plain properties replace in place.

use std::collections::HashMap;
use std::sync::Mutex;

use lazy_static::lazy_static;
use log::debug;

use crate::value::TypeId;

/// Prefix/URI pairs registered at startup
const BUILTIN_NAMESPACES: &[(&str, &str)] = &[
    ("x", "adobe:ns:meta/"),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("dc", "http://purl.org/dc/elements/1.1/"),
    ("xmp", "http://ns.adobe.com/xap/1.0/"),
    ("xmpRights", "http://ns.adobe.com/xap/1.0/rights/"),
    ("tiff", "http://ns.adobe.com/tiff/1.0/"),
    ("exif", "http://ns.adobe.com/exif/1.0/"),
    ("photoshop", "http://ns.adobe.com/photoshop/1.0/"),
];

/// Properties whose registered type is not plain text
const PROPERTY_TYPES: &[(&str, &str, TypeId)] = &[
    ("dc", "subject", TypeId::XmpBag),
    ("dc", "creator", TypeId::XmpSeq),
    ("dc", "title", TypeId::LangAlt),
    ("dc", "description", TypeId::LangAlt),
    ("dc", "rights", TypeId::LangAlt),
    ("xmpRights", "UsageTerms", TypeId::LangAlt),
];

lazy_static! {
    static ref NAMESPACES: Mutex<HashMap<String, String>> = Mutex::new(
        BUILTIN_NAMESPACES
            .iter()
            .map(|(prefix, uri)| (prefix.to_string(), uri.to_string()))
            .collect()
    );
}

/// Registers a namespace prefix for use in XMP keys
pub fn register_namespace(uri: &str, prefix: &str) {
    debug!("Registering XMP namespace {} -> {}", prefix, uri);
    NAMESPACES
        .lock()
        .unwrap()
        .insert(prefix.to_string(), uri.to_string());
}

/// Tears down the registry, restoring the built-in namespaces
pub fn shutdown() {
    let mut namespaces = NAMESPACES.lock().unwrap();
    namespaces.clear();
    namespaces.extend(
        BUILTIN_NAMESPACES
            .iter()
            .map(|(prefix, uri)| (prefix.to_string(), uri.to_string())),
    );
}

/// The URI registered for a prefix
pub fn namespace_uri(prefix: &str) -> Option<String> {
    NAMESPACES.lock().unwrap().get(prefix).cloned()
}

/// The prefix registered for a URI
pub fn prefix_for(uri: &str) -> Option<String> {
    NAMESPACES
        .lock()
        .unwrap()
        .iter()
        .find(|(_, u)| u.as_str() == uri)
        .map(|(p, _)| p.clone())
}

/// All registered prefix/URI pairs, for packet serialization
pub fn namespaces() -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = NAMESPACES
        .lock()
        .unwrap()
        .iter()
        .map(|(p, u)| (p.clone(), u.clone()))
        .collect();
    pairs.sort();
    pairs
}

/// The registered type of a property, defaulting to plain text
pub fn property_type(prefix: &str, property: &str) -> TypeId {
    PROPERTY_TYPES
        .iter()
        .find(|(p, n, _)| *p == prefix && *n == property)
        .map(|(_, _, t)| *t)
        .unwrap_or(TypeId::XmpText)
}

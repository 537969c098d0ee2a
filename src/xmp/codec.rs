//! XMP packet parsing and serialization
//!
//! Decoding walks the RDF element tree with a streaming XML reader and
//! turns each property element into a container entry; Bag/Seq/Alt
//! children become array values and `xml:lang` alternatives become
//! LangAlt values. Namespaces declared in the packet but unknown to the
//! registry are registered on the fly so their keys stay parseable.
//!
//! Serialization emits element-form RDF: one `rdf:Description` holding
//! every property, with the namespace declarations the container needs.

use std::collections::HashMap;

use log::warn;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::errors::{MetaError, MetaResult};
use crate::metadata::containers::XmpData;
use crate::metadata::key::XmpKey;
use crate::value::{LangAltValue, Value, XmpArrayType, XmpArrayValue, XmpTextValue, DEFAULT_LANG};
use crate::xmp::registry;

const XPACKET_BEGIN: &str = "<?xpacket begin=\"\u{feff}\" id=\"W5M0MpCehiHzreSzNTczkc9d\"?>";
const XPACKET_END: &str = "<?xpacket end=\"w\"?>";

/// A property element being accumulated during decode
struct PropertyState {
    prefix: String,
    name: String,
    array: Option<XmpArrayType>,
    /// Collected rdf:li items with their optional xml:lang
    items: Vec<(Option<String>, String)>,
    text: Option<String>,
}

/// Decodes an XMP packet into a container
pub fn decode(packet: &[u8]) -> MetaResult<XmpData> {
    let mut reader = Reader::from_reader(packet);
    reader.config_mut().trim_text(true);

    let mut data = XmpData::new();
    let mut doc_ns: HashMap<String, String> = HashMap::new();
    let mut property: Option<PropertyState> = None;
    let mut in_li = false;
    let mut li_lang: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                for attr in e.attributes().flatten() {
                    let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
                    if let Some(prefix) = key.strip_prefix("xmlns:") {
                        let uri = attr
                            .unescape_value()
                            .map_err(|err| MetaError::XmpError(err.to_string()))?
                            .to_string();
                        doc_ns.insert(prefix.to_string(), uri);
                    }
                }

                let qname = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match qname.split_once(':') {
                    Some(("rdf", "Alt")) => {
                        if let Some(p) = property.as_mut() {
                            p.array = Some(XmpArrayType::Alt);
                        }
                    }
                    Some(("rdf", "Bag")) => {
                        if let Some(p) = property.as_mut() {
                            p.array = Some(XmpArrayType::Bag);
                        }
                    }
                    Some(("rdf", "Seq")) => {
                        if let Some(p) = property.as_mut() {
                            p.array = Some(XmpArrayType::Seq);
                        }
                    }
                    Some(("rdf", "li")) => {
                        in_li = true;
                        li_lang = e.attributes().flatten().find_map(|attr| {
                            if attr.key.as_ref() == b"xml:lang" {
                                attr.unescape_value().ok().map(|v| v.to_string())
                            } else {
                                None
                            }
                        });
                    }
                    Some(("rdf", _)) | Some(("x", _)) | None => {}
                    Some((prefix, local)) if property.is_none() => {
                        property = Some(PropertyState {
                            prefix: prefix.to_string(),
                            name: local.to_string(),
                            array: None,
                            items: Vec::new(),
                            text: None,
                        });
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| MetaError::XmpError(err.to_string()))?
                    .to_string();
                if let Some(p) = property.as_mut() {
                    if in_li {
                        p.items.push((li_lang.clone(), text));
                    } else {
                        p.text = Some(text);
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let qname = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if qname == "rdf:li" {
                    in_li = false;
                    li_lang = None;
                } else if let Some(p) = &property {
                    if qname == format!("{}:{}", p.prefix, p.name) {
                        let state = property.take().unwrap();
                        commit_property(&mut data, &doc_ns, state)?;
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(MetaError::XmpError(err.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(data)
}

/// Turns an accumulated property element into a container entry
fn commit_property(
    data: &mut XmpData,
    doc_ns: &HashMap<String, String>,
    state: PropertyState,
) -> MetaResult<()> {
    // Resolve the document prefix against the registry through its URI;
    // unknown namespaces are registered under the document's prefix
    let prefix = match doc_ns.get(&state.prefix) {
        Some(uri) => match registry::prefix_for(uri) {
            Some(registered) => registered,
            None => {
                registry::register_namespace(uri, &state.prefix);
                state.prefix.clone()
            }
        },
        None => state.prefix.clone(),
    };
    let key = format!("Xmp.{}.{}", prefix, state.name);

    let value = match state.array {
        Some(XmpArrayType::Alt)
            if state.items.iter().any(|(lang, _)| lang.is_some()) =>
        {
            let mut alt = LangAltValue::new();
            for (lang, text) in &state.items {
                let tag = lang.as_deref().unwrap_or(DEFAULT_LANG);
                if let Err(err) = alt.set(tag, text) {
                    warn!("Skipping {} alternative: {}", key, err);
                }
            }
            Value::LangAlt(alt)
        }
        Some(array_type) => {
            let mut array = XmpArrayValue::new(array_type);
            array.items = state.items.into_iter().map(|(_, text)| text).collect();
            Value::XmpArray(array)
        }
        None => Value::XmpText(XmpTextValue::new(&state.text.unwrap_or_default())),
    };

    data.add(&key, value)
}

/// Serializes a container to an XMP packet
pub fn encode(data: &XmpData) -> MetaResult<String> {
    let mut prefixes: Vec<String> = Vec::new();
    for metadatum in data.iter() {
        let key = XmpKey::parse(&metadatum.key)?;
        if !prefixes.contains(&key.prefix) {
            prefixes.push(key.prefix);
        }
    }

    let mut declarations = String::new();
    for prefix in &prefixes {
        let uri = registry::namespace_uri(prefix).ok_or_else(|| {
            MetaError::XmpError(format!("no namespace registered for prefix '{}'", prefix))
        })?;
        declarations.push_str(&format!("\n      xmlns:{}=\"{}\"", prefix, uri));
    }

    let mut body = String::new();
    for metadatum in data.iter() {
        let key = XmpKey::parse(&metadatum.key)?;
        let qname = format!("{}:{}", key.prefix, key.property);
        match &metadatum.value {
            Value::LangAlt(alt) => {
                body.push_str(&format!("      <{}>\n        <rdf:Alt>\n", qname));
                for lang in alt.write_order() {
                    body.push_str(&format!(
                        "          <rdf:li xml:lang=\"{}\">{}</rdf:li>\n",
                        lang,
                        escape(alt.get(lang).unwrap_or_default())
                    ));
                }
                body.push_str(&format!("        </rdf:Alt>\n      </{}>\n", qname));
            }
            Value::XmpArray(array) => {
                let rdf = array.array_type.rdf_name();
                body.push_str(&format!("      <{}>\n        <{}>\n", qname, rdf));
                for item in &array.items {
                    body.push_str(&format!("          <rdf:li>{}</rdf:li>\n", escape(item)));
                }
                body.push_str(&format!("        </{}>\n      </{}>\n", rdf, qname));
            }
            other => {
                body.push_str(&format!(
                    "      <{0}>{1}</{0}>\n",
                    qname,
                    escape(&other.to_string())
                ));
            }
        }
    }

    Ok(format!(
        "{}\n<x:xmpmeta xmlns:x=\"adobe:ns:meta/\">\n  <rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\">\n    <rdf:Description rdf:about=\"\"{}>\n{}    </rdf:Description>\n  </rdf:RDF>\n</x:xmpmeta>\n{}",
        XPACKET_BEGIN, declarations, body, XPACKET_END
    ))
}

/// Escapes text for use in element content and attribute values
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

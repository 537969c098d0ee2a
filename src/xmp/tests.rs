//! Tests for the XMP packet codec

use crate::value::{Value, DEFAULT_LANG};
use crate::xmp::codec::{decode, encode};
use crate::xmp::registry;
use crate::metadata::containers::XmpData;
use crate::value::{LangAltValue, XmpTextValue};

const SAMPLE_PACKET: &str = r#"<?xpacket begin="" id="W5M0MpCehiHzreSzNTczkc9d"?>
<x:xmpmeta xmlns:x="adobe:ns:meta/">
  <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
    <rdf:Description rdf:about=""
        xmlns:dc="http://purl.org/dc/elements/1.1/"
        xmlns:xmp="http://ns.adobe.com/xap/1.0/">
      <xmp:CreatorTool>metakit</xmp:CreatorTool>
      <dc:subject>
        <rdf:Bag>
          <rdf:li>sunset</rdf:li>
          <rdf:li>nature</rdf:li>
        </rdf:Bag>
      </dc:subject>
      <dc:title>
        <rdf:Alt>
          <rdf:li xml:lang="x-default">Evening</rdf:li>
          <rdf:li xml:lang="de-DE">Abend</rdf:li>
        </rdf:Alt>
      </dc:title>
    </rdf:Description>
  </rdf:RDF>
</x:xmpmeta>
<?xpacket end="w"?>"#;

#[test]
fn test_decode_text_bag_and_lang_alt() {
    let data = decode(SAMPLE_PACKET.as_bytes()).unwrap();

    assert_eq!(data.find_key("Xmp.xmp.CreatorTool").unwrap().to_string(), "metakit");

    match data.find_key("Xmp.dc.subject").unwrap() {
        Value::XmpArray(array) => {
            assert_eq!(array.items, vec!["sunset".to_string(), "nature".to_string()]);
        }
        other => panic!("expected array, got {:?}", other),
    }

    match data.find_key("Xmp.dc.title").unwrap() {
        Value::LangAlt(alt) => {
            assert_eq!(alt.get(DEFAULT_LANG), Some("Evening"));
            assert_eq!(alt.get("de-DE"), Some("Abend"));
        }
        other => panic!("expected language alternative, got {:?}", other),
    }
}

#[test]
fn test_unknown_namespace_is_registered_during_decode() {
    let packet = r#"<x:xmpmeta xmlns:x="adobe:ns:meta/">
  <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
    <rdf:Description rdf:about="" xmlns:acme="http://example.com/acme/1.0/">
      <acme:Widget>42</acme:Widget>
    </rdf:Description>
  </rdf:RDF>
</x:xmpmeta>"#;

    let data = decode(packet.as_bytes()).unwrap();
    assert_eq!(data.find_key("Xmp.acme.Widget").unwrap().to_string(), "42");
    assert_eq!(
        registry::namespace_uri("acme").as_deref(),
        Some("http://example.com/acme/1.0/")
    );

    registry::shutdown();
}

#[test]
fn test_encode_decode_round_trip() {
    let mut data = XmpData::new();
    data.set("Xmp.xmp.CreatorTool", Value::XmpText(XmpTextValue::new("metakit"))).unwrap();
    data.set("Xmp.dc.subject", Value::XmpText(XmpTextValue::new("alpha"))).unwrap();
    data.set("Xmp.dc.subject", Value::XmpText(XmpTextValue::new("beta"))).unwrap();
    let mut title = LangAltValue::new();
    title.set(DEFAULT_LANG, "Morning & <light>").unwrap();
    title.set("fr", "Matin").unwrap();
    data.set("Xmp.dc.title", Value::LangAlt(title)).unwrap();

    let packet = encode(&data).unwrap();
    assert!(packet.starts_with("<?xpacket begin="));
    assert!(packet.trim_end().ends_with("<?xpacket end=\"w\"?>"));

    let decoded = decode(packet.as_bytes()).unwrap();
    assert_eq!(decoded.find_key("Xmp.xmp.CreatorTool").unwrap().to_string(), "metakit");
    match decoded.find_key("Xmp.dc.subject").unwrap() {
        Value::XmpArray(array) => {
            assert_eq!(array.items, vec!["alpha".to_string(), "beta".to_string()]);
        }
        other => panic!("expected array, got {:?}", other),
    }
    match decoded.find_key("Xmp.dc.title").unwrap() {
        Value::LangAlt(alt) => {
            assert_eq!(alt.get(DEFAULT_LANG), Some("Morning & <light>"));
            assert_eq!(alt.get("fr"), Some("Matin"));
        }
        other => panic!("expected language alternative, got {:?}", other),
    }
}

#[test]
fn test_default_language_serializes_first() {
    let mut data = XmpData::new();
    let mut title = LangAltValue::new();
    title.set("de", "Abend").unwrap();
    title.set(DEFAULT_LANG, "Evening").unwrap();
    data.set("Xmp.dc.title", Value::LangAlt(title)).unwrap();

    let packet = encode(&data).unwrap();
    let default_pos = packet.find("x-default").unwrap();
    let de_pos = packet.find("xml:lang=\"de\"").unwrap();
    assert!(default_pos < de_pos);
}

#[test]
fn test_decode_rejects_malformed_xml() {
    assert!(decode(b"<x:xmpmeta><unclosed").is_err());
}

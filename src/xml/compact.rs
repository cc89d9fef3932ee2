use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

use super::normalize::drop_tree;
use crate::core::KsefError;

/// Key holding an element's attributes.
pub const ATTRIBUTES_KEY: &str = "_attributes";
/// Key holding character data.
pub const TEXT_KEY: &str = "_text";
/// Key holding CDATA sections.
pub const CDATA_KEY: &str = "_cdata";
/// Key holding comments.
pub const COMMENT_KEY: &str = "_comment";
/// Key holding the XML declaration.
pub const DECLARATION_KEY: &str = "_declaration";

fn xml_err(e: impl std::fmt::Display) -> KsefError {
    KsefError::Xml(e.to_string())
}

/// Parse XML text into the compact JSON-shaped representation.
///
/// Elements become objects keyed by tag name (prefixes kept). A tag that
/// occurs more than once under the same parent becomes an array in document
/// order. Attributes are stored under `_attributes`, text under `_text`.
/// Whitespace-only text between elements is dropped.
///
/// ```
/// let tree = ksef_pdf::xml::parse_compact(r#"<a x="1"><b>t</b><b/></a>"#).unwrap();
/// assert_eq!(tree["a"]["_attributes"]["x"], "1");
/// assert_eq!(tree["a"]["b"][0]["_text"], "t");
/// assert_eq!(tree["a"]["b"][1], serde_json::json!({}));
/// ```
pub fn parse_compact(xml: &str) -> Result<Value, KsefError> {
    // stack[0] is the document node; each open element pushes (name, node).
    let mut stack: Vec<(String, Map<String, Value>)> = vec![(String::new(), Map::new())];

    match read_events(xml, &mut stack) {
        Ok(()) => {
            let (_, document) = stack.swap_remove(0);
            Ok(Value::Object(document))
        }
        Err(e) => {
            // Completed subtrees of a broken document may be arbitrarily deep.
            for (_, node) in stack {
                drop_tree(Value::Object(node));
            }
            Err(e)
        }
    }
}

fn read_events(
    xml: &str,
    stack: &mut Vec<(String, Map<String, Value>)>,
) -> Result<(), KsefError> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut pending_text: Option<String> = None;
    let mut seen_root = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            xml_err(format_args!("{e} at byte {}", reader.error_position()))
        })?;

        if !matches!(event, Event::Text(_)) {
            flush_text(stack, &mut pending_text);
        }

        match event {
            Event::Decl(ref decl) => {
                let mut attrs = Map::new();
                if let Ok(version) = decl.version() {
                    attrs.insert("version".into(), lossy(&version).into());
                }
                if let Some(Ok(encoding)) = decl.encoding() {
                    attrs.insert("encoding".into(), lossy(&encoding).into());
                }
                if let Some(Ok(standalone)) = decl.standalone() {
                    attrs.insert("standalone".into(), lossy(&standalone).into());
                }
                let mut node = Map::new();
                if !attrs.is_empty() {
                    node.insert(ATTRIBUTES_KEY.into(), Value::Object(attrs));
                }
                append(top(stack), DECLARATION_KEY, Value::Object(node));
            }
            Event::Start(ref e) => {
                if stack.len() == 1 {
                    claim_root(&mut seen_root)?;
                }
                let (name, node) = open_element(e)?;
                stack.push((name, node));
            }
            Event::Empty(ref e) => {
                if stack.len() == 1 {
                    claim_root(&mut seen_root)?;
                }
                let (name, node) = open_element(e)?;
                append(top(stack), &name, Value::Object(node));
            }
            Event::End(_) => {
                // quick-xml verifies that end tags match their start tags.
                if stack.len() < 2 {
                    return Err(xml_err("unexpected closing tag"));
                }
                if let Some((name, node)) = stack.pop() {
                    append(top(stack), &name, Value::Object(node));
                }
            }
            Event::Text(ref e) => {
                let text = e.unescape().map_err(xml_err)?;
                match pending_text.as_mut() {
                    Some(buf) => buf.push_str(&text),
                    None => pending_text = Some(text.into_owned()),
                }
            }
            Event::CData(ref e) => {
                append(top(stack), CDATA_KEY, lossy(e).into());
            }
            Event::Comment(ref e) => {
                append(top(stack), COMMENT_KEY, lossy(e).into());
            }
            Event::Eof => break,
            // Processing instructions and DOCTYPE carry nothing the
            // renderers read.
            _ => {}
        }
    }

    if stack.len() > 1 {
        let open = stack.last().map(|(name, _)| name.as_str()).unwrap_or("");
        return Err(xml_err(format_args!("unclosed element <{open}>")));
    }
    if !seen_root {
        return Err(xml_err("document has no root element"));
    }
    Ok(())
}

fn claim_root(seen_root: &mut bool) -> Result<(), KsefError> {
    if *seen_root {
        return Err(xml_err("document has more than one root element"));
    }
    *seen_root = true;
    Ok(())
}

fn open_element(e: &BytesStart<'_>) -> Result<(String, Map<String, Value>), KsefError> {
    let name = lossy(e.name().as_ref()).into_owned();
    let mut node = Map::new();

    let mut attrs = Map::new();
    for attr in e.attributes() {
        let attr = attr.map_err(xml_err)?;
        let key = lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(xml_err)?;
        attrs.insert(key, Value::String(value.into_owned()));
    }
    if !attrs.is_empty() {
        node.insert(ATTRIBUTES_KEY.into(), Value::Object(attrs));
    }

    Ok((name, node))
}

fn flush_text(stack: &mut [(String, Map<String, Value>)], pending: &mut Option<String>) {
    if let Some(text) = pending.take() {
        if !text.trim().is_empty() {
            append(top(stack), TEXT_KEY, Value::String(text));
        }
    }
}

fn top(stack: &mut [(String, Map<String, Value>)]) -> &mut Map<String, Value> {
    // The document node is never popped.
    let last = stack.len() - 1;
    &mut stack[last].1
}

/// Insert `value` under `key`, turning repeated keys into arrays.
fn append(node: &mut Map<String, Value>, key: &str, value: Value) {
    match node.get_mut(key) {
        None => {
            node.insert(key.to_string(), value);
        }
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
}

fn lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn declaration_and_root() {
        let tree = parse_compact(r#"<?xml version="1.0" encoding="UTF-8"?><Faktura/>"#).unwrap();
        assert_eq!(
            tree,
            json!({
                "_declaration": {"_attributes": {"version": "1.0", "encoding": "UTF-8"}},
                "Faktura": {}
            })
        );
    }

    #[test]
    fn attributes_and_text() {
        let tree = parse_compact(
            r#"<Naglowek><KodFormularza kodSystemowy="FA (2)" wersjaSchemy="1-0E">FA</KodFormularza></Naglowek>"#,
        )
        .unwrap();
        assert_eq!(
            tree["Naglowek"]["KodFormularza"],
            json!({
                "_attributes": {"kodSystemowy": "FA (2)", "wersjaSchemy": "1-0E"},
                "_text": "FA"
            })
        );
    }

    #[test]
    fn repeated_siblings_become_array() {
        let tree = parse_compact("<Fa><W>1</W><X/><W>2</W><W>3</W></Fa>").unwrap();
        assert_eq!(
            tree["Fa"]["W"],
            json!([{"_text": "1"}, {"_text": "2"}, {"_text": "3"}])
        );
        assert_eq!(tree["Fa"]["X"], json!({}));
    }

    #[test]
    fn whitespace_between_elements_is_dropped() {
        let tree = parse_compact("<a>\n  <b> x </b>\n</a>").unwrap();
        assert_eq!(tree["a"], json!({"b": {"_text": " x "}}));
    }

    #[test]
    fn entities_are_unescaped() {
        let tree = parse_compact(r#"<a t="&quot;A&amp;B&quot;">1 &lt; 2</a>"#).unwrap();
        assert_eq!(tree["a"]["_attributes"]["t"], "\"A&B\"");
        assert_eq!(tree["a"]["_text"], "1 < 2");
    }

    #[test]
    fn prefixes_are_kept() {
        let tree = parse_compact(r#"<tns:Faktura xmlns:tns="urn:x"><tns:Fa/></tns:Faktura>"#)
            .unwrap();
        assert_eq!(tree["tns:Faktura"]["_attributes"]["xmlns:tns"], "urn:x");
        assert_eq!(tree["tns:Faktura"]["tns:Fa"], json!({}));
    }

    #[test]
    fn cdata_and_comments() {
        let tree = parse_compact("<a><!-- note --><![CDATA[<raw>]]></a>").unwrap();
        assert_eq!(tree["a"]["_comment"], " note ");
        assert_eq!(tree["a"]["_cdata"], "<raw>");
    }

    #[test]
    fn mismatched_tags_fail() {
        assert!(matches!(parse_compact("<a><b></a>"), Err(KsefError::Xml(_))));
    }

    #[test]
    fn unclosed_root_fails() {
        assert!(matches!(parse_compact("<a><b/>"), Err(KsefError::Xml(_))));
    }

    #[test]
    fn empty_input_fails() {
        assert!(matches!(parse_compact(""), Err(KsefError::Xml(_))));
        assert!(matches!(parse_compact("just text"), Err(KsefError::Xml(_))));
    }

    #[test]
    fn second_root_fails() {
        assert!(matches!(parse_compact("<a/><b/>"), Err(KsefError::Xml(_))));
    }
}

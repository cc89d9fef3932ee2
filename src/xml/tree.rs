//! Read access to compact trees.
//!
//! In the compact form an element that occurs once is an object and an
//! element that repeats is an array, so most lookups go through [`items`].

use serde_json::Value;

use super::compact::{ATTRIBUTES_KEY, CDATA_KEY, TEXT_KEY};

/// Child `key` of an object node. Arrays resolve to their first element.
pub fn child<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    let mut node = node;
    while let Value::Array(items) = node {
        node = items.first()?;
    }
    node.as_object()?.get(key)
}

/// Follow a sequence of keys from `node`.
pub fn path<'a>(node: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().try_fold(node, |current, key| child(current, key))
}

/// Text content of an element (`_text`, then `_cdata`), or a bare string.
pub fn text(node: &Value) -> Option<&str> {
    let mut node = node;
    loop {
        node = match node {
            Value::String(s) => return Some(s.as_str()),
            Value::Object(map) => map.get(TEXT_KEY).or_else(|| map.get(CDATA_KEY))?,
            Value::Array(items) => items.first()?,
            _ => return None,
        };
    }
}

/// Text at `keys` below `node`, ignoring blank values.
pub fn text_at<'a>(node: &'a Value, keys: &[&str]) -> Option<&'a str> {
    path(node, keys)
        .and_then(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Attribute `name` of an element.
pub fn attribute<'a>(node: &'a Value, name: &str) -> Option<&'a str> {
    child(node, ATTRIBUTES_KEY)
        .and_then(|attrs| attrs.get(name))
        .and_then(Value::as_str)
}

/// An element that may occur once (object) or repeatedly (array), as a slice.
pub fn items(node: Option<&Value>) -> &[Value] {
    match node {
        Some(Value::Array(items)) => items,
        Some(single) => std::slice::from_ref(single),
        None => &[],
    }
}

/// Pretty-print a tree as JSON with two-space indentation.
///
/// Produces the same text as `serde_json::to_string_pretty`, but walks the
/// tree with an explicit stack so that depth does not consume call stack.
pub fn to_json_pretty(value: &Value) -> String {
    enum Open<'a> {
        Array(std::slice::Iter<'a, Value>),
        Object(serde_json::map::Iter<'a>),
    }

    let mut out = String::new();
    let mut stack: Vec<(Open<'_>, bool)> = Vec::new();
    let mut current = Some(value);

    loop {
        match current.take() {
            Some(Value::Array(items)) if !items.is_empty() => {
                out.push('[');
                stack.push((Open::Array(items.iter()), true));
            }
            Some(Value::Object(map)) if !map.is_empty() => {
                out.push('{');
                stack.push((Open::Object(map.iter()), true));
            }
            Some(Value::Array(_)) => out.push_str("[]"),
            Some(Value::Object(_)) => out.push_str("{}"),
            Some(leaf) => out.push_str(&leaf.to_string()),
            None => {}
        }

        let depth = stack.len();
        let Some((open, first)) = stack.last_mut() else {
            return out;
        };
        let next = match open {
            Open::Array(items) => items.next().map(|v| (None, v)),
            Open::Object(entries) => entries.next().map(|(k, v)| (Some(k), v)),
        };
        match next {
            Some((key, child)) => {
                if !*first {
                    out.push(',');
                }
                *first = false;
                newline(&mut out, depth);
                if let Some(key) = key {
                    out.push_str(&Value::String(key.clone()).to_string());
                    out.push_str(": ");
                }
                current = Some(child);
            }
            None => {
                let close = match open {
                    Open::Array(_) => ']',
                    Open::Object(_) => '}',
                };
                stack.pop();
                newline(&mut out, depth - 1);
                out.push(close);
            }
        }
    }
}

fn newline(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str("  ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn path_and_text() {
        let tree = json!({"Fa": {"P_2": {"_text": "FV/1/2024"}}});
        assert_eq!(text_at(&tree, &["Fa", "P_2"]), Some("FV/1/2024"));
        assert_eq!(text_at(&tree, &["Fa", "P_1"]), None);
    }

    #[test]
    fn blank_text_is_none() {
        let tree = json!({"P_2": {"_text": "   "}});
        assert_eq!(text_at(&tree, &["P_2"]), None);
    }

    #[test]
    fn cdata_counts_as_text() {
        assert_eq!(text(&json!({"_cdata": "raw"})), Some("raw"));
    }

    #[test]
    fn attribute_lookup() {
        let node = json!({"_attributes": {"kodSystemowy": "FA (3)"}, "_text": "FA"});
        assert_eq!(attribute(&node, "kodSystemowy"), Some("FA (3)"));
        assert_eq!(attribute(&node, "wersjaSchemy"), None);
        assert_eq!(attribute(&json!({}), "kodSystemowy"), None);
    }

    #[test]
    fn items_normalizes_single_and_repeated() {
        let single = json!({"W": {"_text": "1"}});
        let many = json!({"W": [{"_text": "1"}, {"_text": "2"}]});
        assert_eq!(items(child(&single, "W")).len(), 1);
        assert_eq!(items(child(&many, "W")).len(), 2);
        assert!(items(child(&single, "X")).is_empty());
    }

    #[test]
    fn pretty_json_matches_serde_json() {
        let tree = json!({
            "_declaration": {"_attributes": {"version": "1.0"}},
            "Faktura": {
                "Fa": {"P_2": {"_text": "FV \"1\"/2024"}, "FaWiersz": [{"P_7": {"_text": "Usługa"}}, {}]},
                "Empty": [],
                "n": 1.5,
                "b": true,
                "z": null
            }
        });
        assert_eq!(to_json_pretty(&tree), serde_json::to_string_pretty(&tree).unwrap());
        assert_eq!(to_json_pretty(&json!("x")), "\"x\"");
    }

    #[test]
    fn pretty_json_of_deep_tree() {
        let depth = 3_000;
        let mut tree = json!("leaf");
        for _ in 0..depth {
            let mut map = serde_json::Map::new();
            map.insert("a".into(), tree);
            tree = Value::Object(map);
        }
        let text = to_json_pretty(&tree);
        assert!(text.starts_with("{\n  \"a\": {"));
        assert_eq!(text.matches('}').count(), depth);
        crate::xml::drop_tree(tree);
    }

    #[test]
    fn repeated_parent_resolves_to_first() {
        let tree = json!({"Naglowek": [{"A": {"_text": "1"}}, {"A": {"_text": "2"}}]});
        assert_eq!(text_at(&tree, &["Naglowek", "A"]), Some("1"));
    }
}

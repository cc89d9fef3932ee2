use serde_json::{Map, Value};

/// The part of `key` after its first `:`, or `key` itself.
///
/// Only the first colon separates the prefix, so `a:b:c` becomes `b:c`.
pub fn local_name(key: &str) -> &str {
    key.split_once(':').map_or(key, |(_, local)| local)
}

/// Strip namespace prefixes from every object key in the tree.
///
/// Arrays and objects are walked with an explicit stack, so nesting depth is
/// limited by memory only; leaves are returned untouched. Key order is
/// preserved. If two keys collapse to the same local name the later value
/// replaces the earlier one in the earlier key's position.
///
/// ```
/// use serde_json::json;
/// use ksef_pdf::xml::strip_prefixes;
///
/// let tree = json!({"tns:Faktura": {"tns:Fa": [{"_text": "x"}], "Naglowek": {}}});
/// assert_eq!(
///     strip_prefixes(tree),
///     json!({"Faktura": {"Fa": [{"_text": "x"}], "Naglowek": {}}}),
/// );
/// ```
pub fn strip_prefixes(value: Value) -> Value {
    let mut stack: Vec<Frame> = Vec::new();
    let mut current = value;

    loop {
        let mut finished = match current {
            Value::Array(items) => {
                stack.push(Frame::Array {
                    done: Vec::with_capacity(items.len()),
                    rest: items.into_iter(),
                });
                None
            }
            Value::Object(map) => {
                stack.push(Frame::Object {
                    done: Map::with_capacity(map.len()),
                    rest: map.into_iter(),
                    key: String::new(),
                });
                None
            }
            leaf => Some(leaf),
        };

        // Hand finished nodes up until some open container has another child.
        current = loop {
            let Some(frame) = stack.last_mut() else {
                return finished.unwrap_or(Value::Null);
            };
            if let Some(value) = finished.take() {
                frame.accept(value);
            }
            if let Some(child) = frame.next_child() {
                break child;
            }
            finished = stack.pop().map(Frame::into_value);
        };
    }
}

/// A container being rebuilt by [`strip_prefixes`].
enum Frame {
    Array {
        done: Vec<Value>,
        rest: std::vec::IntoIter<Value>,
    },
    Object {
        done: Map<String, Value>,
        rest: serde_json::map::IntoIter,
        /// Stripped key of the child currently being rebuilt.
        key: String,
    },
}

impl Frame {
    fn next_child(&mut self) -> Option<Value> {
        match self {
            Frame::Array { rest, .. } => rest.next(),
            Frame::Object { rest, key, .. } => rest.next().map(|(raw, value)| {
                *key = if raw.contains(':') {
                    local_name(&raw).to_string()
                } else {
                    raw
                };
                value
            }),
        }
    }

    fn accept(&mut self, value: Value) {
        match self {
            Frame::Array { done, .. } => done.push(value),
            Frame::Object { done, key, .. } => {
                if let Some(replaced) = done.insert(std::mem::take(key), value) {
                    drop_tree(replaced);
                }
            }
        }
    }

    fn into_value(self) -> Value {
        match self {
            Frame::Array { done, .. } => Value::Array(done),
            Frame::Object { done, .. } => Value::Object(done),
        }
    }
}

/// Drop a tree without recursing.
///
/// `Value`'s own drop glue recurses once per nesting level; use this for
/// trees built from untrusted documents.
pub fn drop_tree(value: Value) {
    let mut pending = vec![value];
    while let Some(value) = pending.pop() {
        match value {
            Value::Array(items) => pending.extend(items),
            Value::Object(map) => pending.extend(map.into_iter().map(|(_, v)| v)),
            _ => {}
        }
    }
}

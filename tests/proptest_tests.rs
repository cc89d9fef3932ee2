//! Property-based tests for prefix stripping and KSeF number detection.
//!
//! Run with: `cargo test --test proptest_tests`

#![cfg(feature = "core")]

use ksef_pdf::extract_nr_ksef;
use ksef_pdf::xml::{parse_document, strip_prefixes};
use proptest::prelude::*;
use serde_json::{Map, Value};

const LOCAL_NAME: &str = "[A-Za-z_][A-Za-z0-9_]{0,7}";
const PREFIX: &str = "[a-z]{1,4}";

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A tree with randomly prefixed keys, paired with the tree expected after
/// stripping. Local names are unique per object so nothing collides.
fn arb_prefixed_tree() -> impl Strategy<Value = (Value, Value)> {
    let leaf = "[a-z0-9 ]{0,6}".prop_map(|s| (Value::String(s.clone()), Value::String(s)));

    leaf.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(|items| {
                let (raw, expected): (Vec<_>, Vec<_>) = items.into_iter().unzip();
                (Value::Array(raw), Value::Array(expected))
            }),
            prop::collection::btree_map(LOCAL_NAME, (prop::option::of(PREFIX), inner), 0..4)
                .prop_map(|entries| {
                    let mut raw = Map::new();
                    let mut expected = Map::new();
                    for (local, (prefix, (r, e))) in entries {
                        let key = match prefix {
                            Some(prefix) => format!("{prefix}:{local}"),
                            None => local.clone(),
                        };
                        raw.insert(key, r);
                        expected.insert(local, e);
                    }
                    (Value::Object(raw), Value::Object(expected))
                }),
        ]
    })
}

fn arb_nr_ksef() -> impl Strategy<Value = String> {
    "[0-9]{10}-[0-9]{8}-[A-Z0-9]{12,16}-[A-Z0-9]{2}"
}

fn keys_have_colon(value: &Value) -> bool {
    match value {
        Value::Object(map) => map
            .iter()
            .any(|(k, v)| k.contains(':') || keys_have_colon(v)),
        Value::Array(items) => items.iter().any(keys_have_colon),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Prefix stripping
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn stripping_yields_local_names((raw, expected) in arb_prefixed_tree()) {
        let stripped = strip_prefixes(raw);
        prop_assert!(!keys_have_colon(&stripped));
        prop_assert_eq!(stripped, expected);
    }

    #[test]
    fn stripping_is_idempotent((raw, _) in arb_prefixed_tree()) {
        let once = strip_prefixes(raw);
        prop_assert_eq!(strip_prefixes(once.clone()), once);
    }

    #[test]
    fn prefixed_element_text_survives(
        prefix in PREFIX,
        name in LOCAL_NAME,
        text in "[A-Za-z0-9][A-Za-z0-9 ]{0,19}",
    ) {
        let xml = format!(
            r#"<{prefix}:Faktura xmlns:{prefix}="urn:test"><{prefix}:{name}>{text}</{prefix}:{name}></{prefix}:Faktura>"#
        );
        let tree = parse_document(&xml).unwrap();
        prop_assert_eq!(&tree["Faktura"][name.as_str()]["_text"], &Value::String(text));
    }
}

// ---------------------------------------------------------------------------
// KSeF number detection
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn number_is_found_anywhere_in_file_name(
        before in "[a-z_]{0,8}",
        nr in arb_nr_ksef(),
        after in "(\\.xml|_[a-z]{1,5}\\.xml)",
    ) {
        let name = format!("{before}{nr}{after}");
        prop_assert_eq!(extract_nr_ksef(&name), Some(nr.as_str()));
    }

    #[test]
    fn lowercase_number_is_returned_as_written(nr in arb_nr_ksef()) {
        let lower = nr.to_lowercase();
        prop_assert_eq!(extract_nr_ksef(&lower), Some(lower.as_str()));
    }

    #[test]
    fn names_without_digits_have_no_number(name in "[A-Za-z_. -]{0,40}") {
        prop_assert_eq!(extract_nr_ksef(&name), None);
    }
}

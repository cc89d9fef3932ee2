//! Loading KSeF XML into a namespace-free compact tree.
//!
//! The tree is a [`serde_json::Value`] in the compact layout produced by
//! [`parse_compact`]: elements are objects keyed by tag name, repeated
//! elements are arrays, attributes live under `_attributes` and text under
//! `_text`. [`strip_prefixes`] then drops namespace prefixes so that the
//! renderers can address fields by local name only.
//!
//! # Example
//!
//! ```
//! use ksef_pdf::xml;
//!
//! let tree = xml::parse_document(
//!     r#"<tns:Faktura xmlns:tns="http://crd.gov.pl/wzor/2023/06/29/12648/">
//!          <tns:Naglowek><tns:KodFormularza kodSystemowy="FA (2)">FA</tns:KodFormularza></tns:Naglowek>
//!        </tns:Faktura>"#,
//! ).unwrap();
//!
//! assert_eq!(tree["Faktura"]["Naglowek"]["KodFormularza"]["_attributes"]["kodSystemowy"], "FA (2)");
//! ```

mod compact;
mod normalize;
pub mod tree;

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::core::KsefError;

pub use compact::{
    ATTRIBUTES_KEY, CDATA_KEY, COMMENT_KEY, DECLARATION_KEY, TEXT_KEY, parse_compact,
};
pub use normalize::{drop_tree, local_name, strip_prefixes};
pub use tree::to_json_pretty;

/// Parse XML text and strip namespace prefixes.
pub fn parse_document(xml: &str) -> Result<Value, KsefError> {
    parse_compact(xml).map(strip_prefixes)
}

/// Read the file at `path` and return its normalized tree.
///
/// Nothing is returned unless both the read and the parse succeed.
pub fn load_document(path: &Path) -> Result<Value, KsefError> {
    let xml = std::fs::read_to_string(path).map_err(|source| KsefError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = xml.len(), "read invoice XML");

    let tree = parse_document(&xml)?;
    debug!(path = %path.display(), "normalized invoice tree");
    Ok(tree)
}

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Placeholder used when no KSeF number can be determined ("brak" = missing).
pub const NR_KSEF_MISSING: &str = "BRAK";

// {NIP}-{YYYYMMDD}-{hash}-{checksum}, e.g. 5555555555-20250808-9231003CA67B-BE.
// ASCII digits only: `\d` would also accept other Unicode digits.
static NR_KSEF_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[0-9]{10}-[0-9]{8}-[A-Z0-9]{12,16}-[A-Z0-9]{2}")
        .expect("KSeF number pattern is valid")
});

/// Find the first KSeF number embedded in a file name.
///
/// The match is returned verbatim, letter case included. The number does not
/// have to make up the whole name:
///
/// ```
/// use ksef_pdf::extract_nr_ksef;
///
/// assert_eq!(
///     extract_nr_ksef("5555555555-20250808-9231003CA67B-BE.xml"),
///     Some("5555555555-20250808-9231003CA67B-BE"),
/// );
/// assert_eq!(extract_nr_ksef("invoice.xml"), None);
/// ```
pub fn extract_nr_ksef(file_name: &str) -> Option<&str> {
    NR_KSEF_PATTERN.find(file_name).map(|m| m.as_str())
}

/// Data passed to the renderers that the invoice XML itself does not carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalData {
    /// KSeF number, or [`NR_KSEF_MISSING`].
    #[serde(rename = "nrKSeF")]
    pub nr_ksef: String,
}

impl AdditionalData {
    pub fn new(nr_ksef: impl Into<String>) -> Self {
        Self {
            nr_ksef: nr_ksef.into(),
        }
    }

    /// Build from a bare file name, falling back to [`NR_KSEF_MISSING`].
    pub fn from_file_name(file_name: &str) -> Self {
        Self::new(extract_nr_ksef(file_name).unwrap_or(NR_KSEF_MISSING))
    }

    /// Build from the last component of `path`; directories are ignored.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        Self::from_file_name(&name)
    }

    /// Whether a real KSeF number is present.
    pub fn has_nr_ksef(&self) -> bool {
        self.nr_ksef != NR_KSEF_MISSING
    }
}

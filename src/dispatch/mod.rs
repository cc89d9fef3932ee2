//! Schema version detection and routing to a version-specific renderer.
//!
//! The version marker lives in
//! `Faktura/Naglowek/KodFormularza/@kodSystemowy`. It is decoded once into a
//! [`SchemaVariant`]; after that the match over variants is closed and there
//! is no fallback renderer.

mod document;
mod handle;

use serde_json::Value;
use tracing::{debug, info};

use crate::core::{AdditionalData, KsefError, SchemaVariant};
use crate::xml::{self, tree};

pub use document::{Faktura1, Faktura2, Faktura3, FakturaDocument};
pub use handle::{PdfHandle, PdfSender};

/// Renders one invoice per call, with one entry point per schema version.
pub trait Generator {
    fn generate_fa1(&self, faktura: Faktura1, additional: &AdditionalData) -> PdfHandle;

    fn generate_fa2(&self, faktura: Faktura2, additional: &AdditionalData) -> PdfHandle;

    fn generate_fa3(&self, faktura: Faktura3, additional: &AdditionalData) -> PdfHandle;
}

/// A document handed to its renderer.
#[derive(Debug)]
pub struct Dispatched {
    pub variant: SchemaVariant,
    pub pdf: PdfHandle,
}

/// Read the raw version marker, if present and non-empty.
pub fn version_marker(document: &Value) -> Option<&str> {
    tree::path(document, &["Faktura", "Naglowek", "KodFormularza"])
        .and_then(|kod| tree::attribute(kod, "kodSystemowy"))
        .filter(|marker| !marker.is_empty())
}

/// Decode the schema version of a normalized document.
///
/// Fails with [`KsefError::VersionUndetermined`] when the marker is missing
/// and with [`KsefError::UnsupportedVariant`] when it is not one of the
/// known codes.
pub fn detect_variant(document: &Value) -> Result<SchemaVariant, KsefError> {
    let marker = version_marker(document).ok_or(KsefError::VersionUndetermined)?;
    marker.parse()
}

/// Detect the version of `document` and pass its `Faktura` element to the
/// matching renderer of `generator`.
///
/// Exactly one renderer method is called on success; none on failure.
pub fn dispatch<G: Generator + ?Sized>(
    generator: &G,
    mut document: Value,
    additional: &AdditionalData,
) -> Result<Dispatched, KsefError> {
    let variant = match detect_variant(&document) {
        Ok(variant) => variant,
        Err(e) => {
            xml::drop_tree(document);
            return Err(e);
        }
    };
    info!(version = %variant, "detected invoice version");

    let faktura = document
        .get_mut("Faktura")
        .map(Value::take)
        .ok_or(KsefError::VersionUndetermined)?;
    xml::drop_tree(document);

    debug!(version = variant.short_name(), nr_ksef = %additional.nr_ksef, "dispatching to renderer");
    let pdf = match variant {
        SchemaVariant::Fa1 => generator.generate_fa1(Faktura1::new(faktura), additional),
        SchemaVariant::Fa2 => generator.generate_fa2(Faktura2::new(faktura), additional),
        SchemaVariant::Fa3 => generator.generate_fa3(Faktura3::new(faktura), additional),
    };

    Ok(Dispatched { variant, pdf })
}

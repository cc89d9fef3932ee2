use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting a KSeF invoice to PDF.
///
/// Every variant is terminal for the conversion of a single document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KsefError {
    /// The input document could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not well-formed XML.
    #[error("XML parse error: {0}")]
    Xml(String),

    /// `Faktura.Naglowek.KodFormularza@kodSystemowy` is missing or empty.
    #[error("cannot determine invoice version (FA1/FA2/FA3): kodSystemowy is missing")]
    VersionUndetermined,

    /// The version marker is present but names no supported schema.
    #[error("unsupported invoice version: {0:?}")]
    UnsupportedVariant(String),

    /// The renderer failed or produced no document.
    #[error("PDF generation failed: {0}")]
    Render(String),

    /// The rendered PDF could not be written.
    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

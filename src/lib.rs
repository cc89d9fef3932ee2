//! # ksef-pdf
//!
//! Render Polish KSeF structured e-invoices (schema versions FA(1), FA(2)
//! and FA(3)) to PDF.
//!
//! The pipeline for one document:
//!
//! 1. the KSeF number is taken from the file name ([`extract_nr_ksef`]),
//! 2. the XML is parsed into a compact JSON-shaped tree and namespace
//!    prefixes are stripped ([`xml::load_document`]),
//! 3. the schema version is read from
//!    `Faktura/Naglowek/KodFormularza/@kodSystemowy` ([`dispatch::detect_variant`]),
//! 4. the `Faktura` element goes to the renderer for that version
//!    ([`dispatch::Generator`]) and the PDF bytes are awaited.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use ksef_pdf::{ConvertOptions, PdfGenerator, convert_to_file};
//!
//! # async fn run() -> Result<(), ksef_pdf::KsefError> {
//! let conversion = convert_to_file(
//!     Path::new("5555555555-20250808-9231003CA67B-BE.xml"),
//!     Path::new("faktura.pdf"),
//!     &PdfGenerator::new(),
//!     &ConvertOptions::new(),
//! )
//! .await?;
//! assert_eq!(conversion.additional.nr_ksef, "5555555555-20250808-9231003CA67B-BE");
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | XML loading, prefix stripping, version dispatch, conversion |
//! | `pdf` (default) | Built-in lopdf renderer |
//! | `cli` (default) | `ksef-pdf` command-line tool |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod xml;

#[cfg(feature = "core")]
pub mod dispatch;

#[cfg(feature = "core")]
mod convert;

#[cfg(feature = "pdf")]
pub mod pdf;

// Re-export the common entry points at crate root for convenience
#[cfg(feature = "core")]
pub use crate::convert::{
    Conversion, ConvertOptions, DEFAULT_OUTPUT, convert_file, convert_to_file, write_pdf,
};
#[cfg(feature = "core")]
pub use crate::core::*;
#[cfg(feature = "pdf")]
pub use crate::pdf::PdfGenerator;

//! One-document conversion: load, detect, render, write.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::Builder;
use tracing::{debug, info, warn};

use crate::core::{AdditionalData, KsefError, SchemaVariant};
use crate::dispatch::{self, Generator};
use crate::xml;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "faktura.pdf";

/// Options for a single conversion.
///
/// ```
/// use ksef_pdf::ConvertOptions;
///
/// let options = ConvertOptions::new().nr_ksef("5555555555-20250808-9231003CA67B-BE");
/// assert_eq!(options.nr_ksef_override(), Some("5555555555-20250808-9231003CA67B-BE"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    nr_ksef: Option<String>,
    allow_empty_output: bool,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this KSeF number instead of looking for one in the file name.
    pub fn nr_ksef(mut self, nr_ksef: impl Into<String>) -> Self {
        self.nr_ksef = Some(nr_ksef.into());
        self
    }

    /// Accept an empty renderer buffer instead of failing.
    pub fn allow_empty_output(mut self, allow: bool) -> Self {
        self.allow_empty_output = allow;
        self
    }

    pub fn nr_ksef_override(&self) -> Option<&str> {
        self.nr_ksef.as_deref()
    }

    /// Additional data for `input`: the override if set, else the number
    /// found in the file name, else `BRAK`.
    pub fn additional_data(&self, input: &Path) -> AdditionalData {
        if let Some(nr_ksef) = &self.nr_ksef {
            return AdditionalData::new(nr_ksef.clone());
        }
        let additional = AdditionalData::from_path(input);
        if additional.has_nr_ksef() {
            info!(nr_ksef = %additional.nr_ksef, "detected KSeF number in file name");
        } else {
            warn!(
                nr_ksef = %additional.nr_ksef,
                "no KSeF number in file name, using placeholder"
            );
        }
        additional
    }
}

/// A rendered invoice.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub variant: SchemaVariant,
    pub additional: AdditionalData,
    pub pdf: Vec<u8>,
}

/// Convert the invoice at `input` to PDF bytes.
pub async fn convert_file<G: Generator + ?Sized>(
    input: &Path,
    generator: &G,
    options: &ConvertOptions,
) -> Result<Conversion, KsefError> {
    let additional = options.additional_data(input);

    info!(path = %input.display(), "parsing invoice XML");
    let document = xml::load_document(input)?;

    let dispatched = dispatch::dispatch(generator, document, &additional)?;
    let pdf = dispatched.pdf.get_buffer().await?;
    if pdf.is_empty() && !options.allow_empty_output {
        return Err(KsefError::Render("renderer returned an empty document".into()));
    }
    debug!(version = %dispatched.variant, bytes = pdf.len(), "rendered PDF");

    Ok(Conversion {
        variant: dispatched.variant,
        additional,
        pdf,
    })
}

/// Convert the invoice at `input` and write the PDF to `output`.
///
/// The output file is only created once rendering has succeeded.
pub async fn convert_to_file<G: Generator + ?Sized>(
    input: &Path,
    output: &Path,
    generator: &G,
    options: &ConvertOptions,
) -> Result<Conversion, KsefError> {
    let conversion = convert_file(input, generator, options).await?;
    write_pdf(output, &conversion.pdf)?;
    Ok(conversion)
}

/// Write `bytes` to `path` through a temporary file in the same directory.
///
/// Either the complete file appears at `path` or nothing does.
pub fn write_pdf(path: &Path, bytes: &[u8]) -> Result<(), KsefError> {
    let write_err = |source: std::io::Error| KsefError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut tmp = temp_builder().tempfile_in(&dir).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    // A replaced file keeps its mode; a new one gets the umask default.
    if let Ok(existing) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(write_err)?;
    }
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    info!(path = %path.display(), bytes = bytes.len(), "PDF written");
    Ok(())
}

fn temp_builder() -> Builder<'static, 'static> {
    let mut builder = Builder::new();
    builder.prefix(".ksef-pdf");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    builder
}

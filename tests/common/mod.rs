#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use ksef_pdf::dispatch::{Faktura1, Faktura2, Faktura3, FakturaDocument, Generator, PdfHandle};
use ksef_pdf::{AdditionalData, SchemaVariant};
use serde_json::Value;

pub const NR_KSEF: &str = "5555555555-20250808-9231003CA67B-BE";

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture_text(name: &str) -> String {
    std::fs::read_to_string(fixture(name)).unwrap()
}

/// Copy a fixture into `dir` under a new file name.
pub fn copy_fixture(name: &str, dir: &Path, as_name: &str) -> PathBuf {
    let target = dir.join(as_name);
    std::fs::copy(fixture(name), &target).unwrap();
    target
}

/// A renderer call captured by [`Recorder`].
#[derive(Debug, Clone)]
pub struct Call {
    pub variant: SchemaVariant,
    pub faktura: Value,
    pub additional: AdditionalData,
}

/// Generator that records every call and answers with fixed bytes.
#[derive(Default)]
pub struct Recorder {
    pub calls: RefCell<Vec<Call>>,
    pub output: Vec<u8>,
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            output: b"%PDF-1.7 recorded".to_vec(),
        }
    }

    pub fn with_output(output: Vec<u8>) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            output,
        }
    }

    pub fn variants(&self) -> Vec<SchemaVariant> {
        self.calls.borrow().iter().map(|c| c.variant).collect()
    }

    fn record<D: FakturaDocument>(&self, faktura: D, additional: &AdditionalData) -> PdfHandle {
        self.calls.borrow_mut().push(Call {
            variant: D::VARIANT,
            faktura: faktura.into_tree(),
            additional: additional.clone(),
        });
        PdfHandle::ready(self.output.clone())
    }
}

impl Generator for Recorder {
    fn generate_fa1(&self, faktura: Faktura1, additional: &AdditionalData) -> PdfHandle {
        self.record(faktura, additional)
    }

    fn generate_fa2(&self, faktura: Faktura2, additional: &AdditionalData) -> PdfHandle {
        self.record(faktura, additional)
    }

    fn generate_fa3(&self, faktura: Faktura3, additional: &AdditionalData) -> PdfHandle {
        self.record(faktura, additional)
    }
}

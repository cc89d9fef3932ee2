#![no_main]

use ksef_pdf::AdditionalData;
use ksef_pdf::dispatch::detect_variant;
use ksef_pdf::pdf::{InvoiceSummary, render_summary};
use ksef_pdf::xml;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(tree) = xml::parse_document(s) else {
        return;
    };
    if let Ok(variant) = detect_variant(&tree) {
        let summary = InvoiceSummary::from_faktura(variant, &tree["Faktura"]);
        let _ = render_summary(&summary, &AdditionalData::new("BRAK"));
    }
    xml::drop_tree(tree);
});

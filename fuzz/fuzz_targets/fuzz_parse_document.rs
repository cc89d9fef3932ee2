#![no_main]

use ksef_pdf::dispatch::detect_variant;
use ksef_pdf::xml;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Errors are expected; panics are bugs.
        if let Ok(tree) = xml::parse_document(s) {
            let _ = detect_variant(&tree);
            xml::drop_tree(tree);
        }
    }
});

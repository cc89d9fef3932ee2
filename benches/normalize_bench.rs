use std::path::Path;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use ksef_pdf::dispatch::detect_variant;
use ksef_pdf::pdf::{InvoiceSummary, render_summary};
use ksef_pdf::xml::{self, parse_compact, strip_prefixes};
use ksef_pdf::AdditionalData;

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

/// An FA(2) document with `lines` invoice rows.
fn large_fa2(lines: usize) -> String {
    let base = fixture("fa2.xml");
    let row = "<FaWiersz><NrWierszaFa>{n}</NrWierszaFa><P_7>Pozycja {n}</P_7>\
               <P_8A>szt.</P_8A><P_8B>3</P_8B><P_9A>19.99</P_9A><P_11>59.97</P_11>\
               <P_12>23</P_12></FaWiersz>";
    let rows: String = (1..=lines)
        .map(|n| row.replace("{n}", &n.to_string()))
        .collect();
    base.replace("</Fa>", &format!("{rows}</Fa>"))
}

fn bench_parse(c: &mut Criterion) {
    let fa1 = fixture("fa1.xml");
    c.bench_function("parse_compact_fa1", |b| {
        b.iter(|| black_box(parse_compact(black_box(&fa1))));
    });

    let raw = parse_compact(&fa1).unwrap();
    c.bench_function("strip_prefixes_fa1", |b| {
        b.iter(|| black_box(strip_prefixes(black_box(raw.clone()))));
    });

    let large = large_fa2(1000);
    c.bench_function("parse_document_1000_lines", |b| {
        b.iter(|| black_box(xml::parse_document(black_box(&large))));
    });
}

fn bench_render(c: &mut Criterion) {
    let tree = xml::parse_document(&large_fa2(100)).unwrap();
    let variant = detect_variant(&tree).unwrap();
    let additional = AdditionalData::new("5555555555-20250808-9231003CA67B-BE");

    c.bench_function("render_100_lines", |b| {
        b.iter(|| {
            let summary = InvoiceSummary::from_faktura(variant, &tree["Faktura"]);
            black_box(render_summary(&summary, black_box(&additional)))
        });
    });
}

criterion_group!(benches, bench_parse, bench_render);
criterion_main!(benches);

use tracing::debug;

use super::layout::Layout;
use super::summary::{InvoiceSummary, LineSummary, PartySummary};
use super::text::{format_amount, format_date};
use crate::core::{AdditionalData, KsefError};
use crate::dispatch::{Faktura1, Faktura2, Faktura3, FakturaDocument, Generator, PdfHandle};
use crate::xml;

const MISSING: &str = "-";

/// Built-in renderer: a plain A4 summary of the invoice, drawn with lopdf.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfGenerator;

impl PdfGenerator {
    pub fn new() -> Self {
        Self
    }

    fn render<D: FakturaDocument>(&self, faktura: D, additional: &AdditionalData) -> PdfHandle {
        let tree = faktura.into_tree();
        let summary = InvoiceSummary::from_faktura(D::VARIANT, &tree);
        xml::drop_tree(tree);
        PdfHandle::from_result(render_summary(&summary, additional))
    }
}

impl Generator for PdfGenerator {
    fn generate_fa1(&self, faktura: Faktura1, additional: &AdditionalData) -> PdfHandle {
        self.render(faktura, additional)
    }

    fn generate_fa2(&self, faktura: Faktura2, additional: &AdditionalData) -> PdfHandle {
        self.render(faktura, additional)
    }

    fn generate_fa3(&self, faktura: Faktura3, additional: &AdditionalData) -> PdfHandle {
        self.render(faktura, additional)
    }
}

/// Lay out `summary` and serialize the PDF.
pub fn render_summary(
    summary: &InvoiceSummary,
    additional: &AdditionalData,
) -> Result<Vec<u8>, KsefError> {
    let or_missing = |v: &Option<String>| v.clone().unwrap_or_else(|| MISSING.to_string());
    let number = or_missing(&summary.number);

    let mut layout = Layout::new();
    layout
        .title(&format!("Faktura {number}"))
        .field("Numer KSeF", &additional.nr_ksef)
        .field("Wersja schemy", summary.variant.kod_systemowy())
        .field("Rodzaj faktury", &or_missing(&summary.kind))
        .field(
            "Data wystawienia",
            &summary.issue_date.as_deref().map_or_else(|| MISSING.to_string(), format_date),
        );
    if let Some(place) = &summary.issue_place {
        layout.field("Miejsce wystawienia", place);
    }

    party_section(&mut layout, "Sprzedawca", &summary.seller);
    party_section(&mut layout, "Nabywca", &summary.buyer);
    for party in &summary.third_parties {
        let heading = match &party.role {
            Some(role) => format!("Podmiot trzeci (rola {role})"),
            None => "Podmiot trzeci".to_string(),
        };
        party_section(&mut layout, &heading, party);
    }

    let currency = summary.currency.as_deref().unwrap_or("PLN");
    layout.heading("Pozycje");
    if summary.lines.is_empty() {
        layout.line(MISSING);
    }
    for (index, line) in summary.lines.iter().enumerate() {
        layout.line(&line_text(index + 1, line, currency));
    }

    layout.heading("Podsumowanie").field(
        "Kwota należności ogółem",
        &match &summary.gross_total {
            Some(total) => format!("{} {currency}", format_amount(total)),
            None => MISSING.to_string(),
        },
    );

    debug!(
        version = summary.variant.short_name(),
        pages = layout.page_count(),
        lines = summary.lines.len(),
        "laid out invoice"
    );
    layout.finish(&format!("Faktura {number}"))
}

fn party_section(layout: &mut Layout, heading: &str, party: &PartySummary) {
    layout.heading(heading);
    layout.line(party.name.as_deref().unwrap_or(MISSING));
    if let Some(nip) = &party.nip {
        layout.field("NIP", nip);
    }
    for address in &party.address {
        layout.line(address);
    }
}

fn line_text(position: usize, line: &LineSummary, currency: &str) -> String {
    let number = line
        .number
        .clone()
        .unwrap_or_else(|| position.to_string());
    let mut text = format!("{number}. {}", line.name.as_deref().unwrap_or(MISSING));
    if let Some(quantity) = &line.quantity {
        text.push_str(&format!(
            " | {quantity} {}",
            line.unit.as_deref().unwrap_or("")
        ));
    }
    if let Some(price) = &line.unit_net_price {
        text.push_str(&format!(" x {}", format_amount(price)));
    }
    if let Some(net) = &line.net_value {
        text.push_str(&format!(" | netto {} {currency}", format_amount(net)));
    }
    if let Some(rate) = &line.vat_rate {
        text.push_str(&format!(" | VAT {rate}"));
        if rate.chars().all(|c| c.is_ascii_digit()) {
            text.push('%');
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SchemaVariant;

    fn line(rate: &str) -> LineSummary {
        LineSummary {
            number: Some("1".into()),
            name: Some("Usługa".into()),
            unit: Some("szt.".into()),
            quantity: Some("2".into()),
            unit_net_price: Some("50".into()),
            net_value: Some("100".into()),
            vat_rate: Some(rate.into()),
        }
    }

    #[test]
    fn line_text_with_numeric_rate() {
        assert_eq!(
            line_text(1, &line("23"), "PLN"),
            "1. Usługa | 2 szt. x 50,00 | netto 100,00 PLN | VAT 23%"
        );
    }

    #[test]
    fn line_text_with_symbolic_rate() {
        assert!(line_text(1, &line("zw"), "PLN").ends_with("VAT zw"));
    }

    #[test]
    fn line_text_falls_back_to_position() {
        let text = line_text(7, &LineSummary::default(), "EUR");
        assert_eq!(text, "7. -");
    }

    #[test]
    fn render_empty_summary() {
        let summary = InvoiceSummary::from_faktura(SchemaVariant::Fa2, &serde_json::Value::Null);
        let bytes = render_summary(&summary, &AdditionalData::new("BRAK")).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}

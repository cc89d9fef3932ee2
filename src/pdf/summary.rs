//! The subset of a `Faktura` element the built-in renderer prints.

use serde_json::Value;

use crate::core::SchemaVariant;
use crate::xml::tree::{self, items, text_at};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartySummary {
    pub role: Option<String>,
    pub name: Option<String>,
    pub nip: Option<String>,
    pub address: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSummary {
    pub number: Option<String>,
    pub name: Option<String>,
    pub unit: Option<String>,
    pub quantity: Option<String>,
    pub unit_net_price: Option<String>,
    pub net_value: Option<String>,
    pub vat_rate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceSummary {
    pub variant: SchemaVariant,
    pub number: Option<String>,
    pub kind: Option<String>,
    pub issue_date: Option<String>,
    pub issue_place: Option<String>,
    pub currency: Option<String>,
    pub gross_total: Option<String>,
    pub seller: PartySummary,
    pub buyer: PartySummary,
    pub third_parties: Vec<PartySummary>,
    pub lines: Vec<LineSummary>,
}

impl InvoiceSummary {
    pub fn from_faktura(variant: SchemaVariant, faktura: &Value) -> Self {
        let party = |node: &Value| match variant {
            SchemaVariant::Fa1 => party_fa1(node),
            SchemaVariant::Fa2 | SchemaVariant::Fa3 => party_fa2(node),
        };
        let missing = Value::Null;

        let fa = tree::child(faktura, "Fa").unwrap_or(&missing);
        let line_nodes = match variant {
            SchemaVariant::Fa1 => items(tree::path(fa, &["FaWiersze", "FaWiersz"])),
            SchemaVariant::Fa2 | SchemaVariant::Fa3 => items(tree::child(fa, "FaWiersz")),
        };
        let third_parties = match variant {
            SchemaVariant::Fa1 => Vec::new(),
            SchemaVariant::Fa2 | SchemaVariant::Fa3 => items(tree::child(faktura, "Podmiot3"))
                .iter()
                .map(|node| PartySummary {
                    role: owned(text_at(node, &["Rola"]))
                        .or_else(|| owned(text_at(node, &["OpisRoli"]))),
                    ..party(node)
                })
                .collect(),
        };

        Self {
            variant,
            number: owned(text_at(fa, &["P_2"])),
            kind: owned(text_at(fa, &["RodzajFaktury"])),
            issue_date: owned(text_at(fa, &["P_1"])),
            issue_place: owned(text_at(fa, &["P_1M"])),
            currency: owned(text_at(fa, &["KodWaluty"])),
            gross_total: owned(text_at(fa, &["P_15"])),
            seller: party(tree::child(faktura, "Podmiot1").unwrap_or(&missing)),
            buyer: party(tree::child(faktura, "Podmiot2").unwrap_or(&missing)),
            third_parties,
            lines: line_nodes.iter().map(line).collect(),
        }
    }
}

fn owned(s: Option<&str>) -> Option<String> {
    s.map(str::to_string)
}

fn party_fa1(node: &Value) -> PartySummary {
    let ids = tree::child(node, "DaneIdentyfikacyjne");
    let name = ids.and_then(|ids| {
        owned(text_at(ids, &["PelnaNazwa"])).or_else(|| {
            let first = text_at(ids, &["ImiePierwsze"]);
            let last = text_at(ids, &["Nazwisko"]);
            match (first, last) {
                (Some(f), Some(l)) => Some(format!("{f} {l}")),
                (f, l) => owned(f.or(l)),
            }
        })
    });

    let mut address = Vec::new();
    if let Some(pol) = tree::path(node, &["Adres", "AdresPol"]) {
        let street = [text_at(pol, &["Ulica"]), text_at(pol, &["NrDomu"])]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        let street = match text_at(pol, &["NrLokalu"]) {
            Some(flat) if !street.is_empty() => format!("{street}/{flat}"),
            _ => street,
        };
        if !street.is_empty() {
            address.push(street);
        }
        let city = [text_at(pol, &["KodPocztowy"]), text_at(pol, &["Miejscowosc"])]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if !city.is_empty() {
            address.push(city);
        }
    } else if let Some(zagr) = tree::path(node, &["Adres", "AdresZagr"]) {
        address.extend(
            ["Ulica", "NrDomu", "KodPocztowy", "Miejscowosc", "KodKraju"]
                .into_iter()
                .filter_map(|key| owned(text_at(zagr, &[key]))),
        );
    } else {
        address = address_lines(node);
    }

    PartySummary {
        role: None,
        name,
        nip: ids.and_then(|ids| owned(text_at(ids, &["NIP"]))),
        address,
    }
}

fn party_fa2(node: &Value) -> PartySummary {
    let ids = tree::child(node, "DaneIdentyfikacyjne");
    PartySummary {
        role: None,
        name: ids.and_then(|ids| owned(text_at(ids, &["Nazwa"]))),
        nip: ids.and_then(|ids| owned(text_at(ids, &["NIP"]))),
        address: address_lines(node),
    }
}

fn address_lines(node: &Value) -> Vec<String> {
    let Some(adres) = tree::child(node, "Adres") else {
        return Vec::new();
    };
    let mut lines: Vec<String> = ["AdresL1", "AdresL2"]
        .into_iter()
        .filter_map(|key| owned(text_at(adres, &[key])))
        .collect();
    if let Some(country) = text_at(adres, &["KodKraju"]).filter(|c| *c != "PL") {
        lines.push(country.to_string());
    }
    lines
}

fn line(node: &Value) -> LineSummary {
    LineSummary {
        number: owned(text_at(node, &["NrWierszaFa"])),
        name: owned(text_at(node, &["P_7"])),
        unit: owned(text_at(node, &["P_8A"])),
        quantity: owned(text_at(node, &["P_8B"])),
        unit_net_price: owned(text_at(node, &["P_9A"])),
        net_value: owned(text_at(node, &["P_11"])),
        vat_rate: owned(text_at(node, &["P_12"])),
    }
}

//! Built-in PDF renderer.
//!
//! [`PdfGenerator`] implements [`Generator`](crate::dispatch::Generator) for
//! all three schema versions. It prints a plain summary: header, parties,
//! line items and the gross total. Text is set in the base-14 Helvetica
//! fonts with WinAnsi encoding, so Polish letters outside that code page are
//! printed without diacritics.
//!
//! | Field | FA(1) | FA(2) / FA(3) |
//! |-------|-------|---------------|
//! | Party name | `DaneIdentyfikacyjne/PelnaNazwa` | `DaneIdentyfikacyjne/Nazwa` |
//! | Address | `Adres/AdresPol`, `Adres/AdresZagr` | `Adres/AdresL1`, `AdresL2` |
//! | Lines | `Fa/FaWiersze/FaWiersz` | `Fa/FaWiersz` |
//! | Third parties | - | `Podmiot3` |

mod generator;
mod layout;
mod summary;
mod text;

pub use generator::{PdfGenerator, render_summary};
pub use summary::{InvoiceSummary, LineSummary, PartySummary};
pub use text::{format_amount, format_date};

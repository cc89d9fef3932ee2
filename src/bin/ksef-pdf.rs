//! CLI binary for ksef-pdf.
//!
//! A thin shim over the library crate: maps flags to `ConvertOptions`,
//! sets up logging and reports the result.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ksef_pdf::{ConvertOptions, DEFAULT_OUTPUT, PdfGenerator, convert_to_file, xml};
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"KSEF NUMBER:
  The KSeF number is detected in the XML file name, e.g.
    5555555555-20250808-9231003CA67B-BE.xml
  ({NIP}-{YYYYMMDD}-{12-16 alphanumerics}-{2 alphanumerics}).
  If none is found, "BRAK" is printed instead. Use --nr-ksef to set it.

EXAMPLES:
  ksef-pdf 5555555555-20250808-9231003CA67B-BE.xml
  ksef-pdf assets/invoice.xml -o output.pdf
  ksef-pdf --json assets/invoice.xml > invoice.json

ENVIRONMENT VARIABLES:
  KSEF_PDF_OUTPUT     Default output path
  KSEF_PDF_NR_KSEF    KSeF number override
  RUST_LOG            Log filter (overrides -v / -q)
"#;

/// Render a KSeF e-invoice (FA(1), FA(2), FA(3)) to PDF.
#[derive(Parser, Debug)]
#[command(
    name = "ksef-pdf",
    version,
    about = "Render a KSeF e-invoice (FA(1), FA(2), FA(3)) to PDF",
    arg_required_else_help = true,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Invoice XML file.
    input: PathBuf,

    /// Output PDF path.
    #[arg(short, long, env = "KSEF_PDF_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// KSeF number to print instead of the one detected in the file name.
    #[arg(long, env = "KSEF_PDF_NR_KSEF")]
    nr_ksef: Option<String>,

    /// Print the normalized invoice tree as JSON instead of rendering.
    #[arg(long)]
    json: bool,

    /// Debug logging.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Errors only.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || cli.json {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    if cli.json {
        let tree = xml::load_document(&cli.input)
            .with_context(|| format!("Failed to load {}", cli.input.display()))?;
        println!("{}", xml::to_json_pretty(&tree));
        xml::drop_tree(tree);
        return Ok(());
    }

    let mut options = ConvertOptions::new();
    if let Some(nr_ksef) = cli.nr_ksef {
        options = options.nr_ksef(nr_ksef);
    }

    let conversion = convert_to_file(&cli.input, &cli.output, &PdfGenerator::new(), &options)
        .await
        .with_context(|| format!("Failed to convert {}", cli.input.display()))?;

    if !cli.quiet {
        eprintln!(
            "PDF written: {} ({}, KSeF {})",
            cli.output.display(),
            conversion.variant,
            conversion.additional.nr_ksef
        );
    }
    Ok(())
}

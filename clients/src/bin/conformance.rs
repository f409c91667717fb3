//! `nml-conformance`: validates NML topology documents.
//!
//! Each document is parsed back with an independent RDF parser and checked
//! for:
//! - RDF well-formedness and agreement across RDF/XML, Turtle and N-Triples
//! - NML structure (declared references, bidirectional ports, labels,
//!   topology versions)
//!
//! **Usage:**
//! ```
//! nml-conformance [--format <key>] [--self-check] [<document>...]
//! ```
//!
//! The syntax is taken from each file's extension unless `--format` is
//! given. Exits non-zero if any conformance check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::Parser;
use nml_conformance::{run_document, self_check, ConformanceReport};
use nml_topology::Format;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Validate NML topology documents.
#[derive(Parser)]
#[command(name = "nml-conformance", about = "Validate NML topology documents")]
struct Args {
    /// Documents to validate.
    documents: Vec<PathBuf>,

    /// Syntax of every document (`pretty-xml`, `turtle`, `nt`).
    #[arg(long)]
    format: Option<Format>,

    /// Also build and validate the bundled sample topologies.
    #[arg(long)]
    self_check: bool,
}

fn format_of(path: &Path, forced: Option<Format>) -> Result<Format> {
    if let Some(format) = forced {
        return Ok(format);
    }
    let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
        bail!("Cannot infer the syntax of {}; pass --format", path.display());
    };
    extension
        .parse()
        .with_context(|| format!("Unknown syntax for {}; pass --format", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.documents.is_empty() && !args.self_check {
        bail!("Nothing to validate; pass documents or --self-check");
    }

    let mut report = ConformanceReport::new();
    if args.self_check {
        report.extend(self_check()?);
    }
    for path in &args.documents {
        let format = format_of(path, args.format)?;
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        info!(path = %path.display(), %format, "validating document");
        report.extend(run_document(&text, format)?);
    }

    println!("NML Conformance Report");
    println!("======================");
    println!();
    for result in &report.results {
        println!("{result}");
    }

    let failed = report.failure_count();
    println!();
    println!(
        "Summary: {} passed, {} warnings, {} failed",
        report.results.len() - failed - report.warning_count(),
        report.warning_count(),
        failed
    );

    if failed > 0 {
        eprintln!("Conformance FAILED: {} check(s) did not pass.", failed);
        process::exit(1);
    }

    println!("Conformance PASSED.");
    Ok(())
}

//! `nml-build`: builds an NML topology document from a JSON topology
//! description and writes it in one or more RDF syntaxes.
//!
//! **Outputs:**
//! - `<out>/<stem>.rdf`: RDF/XML (default)
//! - `<out>/<stem>.ttl`: Turtle, with `--format turtle`
//! - `<out>/<stem>.nt`: N-Triples, with `--format nt`
//!
//! **Usage:**
//! ```
//! nml-build --input <topology.json> [--out <path>] [--format <key>]... [--base-name <name>]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use nml_topology::{EntityClass, Format, TopologyDescription};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Build an NML topology document.
#[derive(Parser)]
#[command(name = "nml-build", about = "Build an NML topology document from a JSON description")]
struct Args {
    /// JSON topology description.
    #[arg(long)]
    input: PathBuf,

    /// Output directory for generated documents.
    #[arg(long, default_value = "public")]
    out: PathBuf,

    /// Output syntax (`pretty-xml`, `turtle`, `nt`); repeat for several.
    #[arg(long = "format", default_value = "pretty-xml")]
    formats: Vec<Format>,

    /// Overrides the description's base name.
    #[arg(long)]
    base_name: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let mut description = TopologyDescription::from_json(&text)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;
    if let Some(base_name) = args.base_name {
        description.base_name = base_name;
    }

    let mut nml = description.builder();
    let topology = description
        .build(&mut nml)
        .context("Failed to build topology")?;
    info!(%topology, statements = nml.graph().len(), "topology built");

    let graph = nml.graph();
    println!(
        "NML topology {}: {} nodes, {} ports, {} links, {} labels, {} statements",
        topology,
        graph.subjects_of_type(&EntityClass::Node.term()).len(),
        graph.subjects_of_type(&EntityClass::Port.term()).len(),
        graph.subjects_of_type(&EntityClass::Link.term()).len(),
        graph.subjects_of_type(&EntityClass::Label.term()).len(),
        graph.len()
    );

    fs::create_dir_all(&args.out)
        .with_context(|| format!("Failed to create output directory: {}", args.out.display()))?;
    let stem = args
        .input
        .file_stem()
        .map_or_else(|| "topology".into(), |s| s.to_string_lossy());

    for format in args.formats {
        let path = args.out.join(format!("{stem}.{}", format.extension()));
        let document = nml
            .serialize(format)
            .with_context(|| format!("Failed to serialize topology as {format}"))?;
        fs::write(&path, document).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("  Written: {}", path.display());
    }

    println!("Build complete.");
    Ok(())
}

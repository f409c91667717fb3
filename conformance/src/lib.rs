//! NML document conformance checks.
//!
//! Serialized documents are parsed back with an independent RDF parser
//! (sophia) and the resulting graph is checked against the structural
//! rules every NML topology must satisfy.
//!
//! # Conformance Scope
//!
//! | Check | Rule |
//! |-------|------|
//! | `rdf` | Document parses as RDF/XML, Turtle or N-Triples and is non-empty |
//! | `rdf/<format>` | Every syntax carries exactly the graph's statements |
//! | `topology/references` | Referenced ports, links, labels, nodes and services are declared |
//! | `topology/bidirectional` | A BidirectionalPort groups exactly two Ports |
//! | `topology/labels` | One type and one value per Label; no duplicate Labels |
//! | `topology/version` | Topologies carry a `YYYYMMDD` version |
//!
//! # Entry Point
//!
//! ```
//! use nml_conformance::run_all;
//! use nml_topology::NmlBuilder;
//!
//! let mut nml = NmlBuilder::new("example", &[]);
//! nml.add_topology(None)?;
//! let report = run_all(nml.graph())?;
//! assert!(report.all_passed());
//! # Ok::<(), anyhow::Error>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod fixtures;
pub mod report;
pub mod validators;

use anyhow::{Context, Result};
use nml_topology::{Format, Graph, TopologyDescription};

pub use report::{ConformanceReport, Severity, TestResult};

/// Runs every validator against an in-memory graph.
///
/// Validators run in this order:
/// 1. Round trip through RDF/XML, Turtle and N-Triples
/// 2. NML structural rules
///
/// # Errors
///
/// Returns an error only if a validator cannot run at all.
pub fn run_all(graph: &Graph) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    report.extend(validators::rdf::validate_consistency(graph)?);
    report.extend(validators::topology::validate(graph));
    Ok(report)
}

/// Validates a serialized document: it must parse, and the graph it
/// describes must pass [`run_all`].
///
/// # Errors
///
/// Returns an error only if a validator cannot run at all. A document that
/// fails to parse yields a report with a single failure.
pub fn run_document(text: &str, format: Format) -> Result<ConformanceReport> {
    let mut report = validators::rdf::validate_document(text, format)?;
    if !report.all_passed() {
        return Ok(report);
    }
    let graph = validators::rdf::load_document(text, format)?;
    report.extend(run_all(&graph)?);
    Ok(report)
}

/// Builds every fixture in [`fixtures::ALL`] and validates the result.
///
/// # Errors
///
/// Returns an error if a fixture fails to build.
pub fn self_check() -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    for (name, text) in fixtures::ALL {
        let description = TopologyDescription::from_json(text)
            .with_context(|| format!("Failed to parse fixture {name}"))?;
        let mut nml = description.builder();
        description
            .build(&mut nml)
            .with_context(|| format!("Failed to build fixture {name}"))?;
        let document = nml
            .get_nml()
            .with_context(|| format!("Failed to serialize fixture {name}"))?;
        report.extend(run_document(&document, Format::RdfXml)?);
    }
    Ok(report)
}

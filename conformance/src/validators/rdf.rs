//! RDF well-formedness checks.
//!
//! Documents are re-parsed with sophia's parsers, independently of the
//! serializers that wrote them:
//! - a document must parse and hold at least one statement
//! - every syntax must carry exactly the statements of the graph it was
//!   written from

use std::collections::HashSet;

use anyhow::{anyhow, Result};
use nml_topology::model::iris;
use nml_topology::{Format, Graph, Iri, Literal, Object, Triple};
use sophia::api::source::TripleSource;
use sophia::api::term::Term;
use sophia::api::triple::Triple as _;
use tracing::debug;

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "rdf";

/// Formats checked by [`validate_consistency`], in report order.
pub const FORMATS: [Format; 3] = [Format::RdfXml, Format::Turtle, Format::NTriples];

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct LoadError(String);

/// Parses `text` and converts every statement into an NML [`Triple`].
///
/// Plain literals come back from sophia typed `xsd:string`; they are mapped
/// back to plain literals so they compare equal to what the builder wrote.
///
/// # Errors
///
/// Returns an error if the document does not parse, or if it uses blank
/// nodes, which NML documents never contain.
pub fn parse_document(text: &str, format: Format) -> Result<Vec<Triple>> {
    let reader = text.as_bytes();
    let triples = match format {
        Format::NTriples => collect(sophia::turtle::parser::nt::parse_bufread(reader), format),
        Format::Turtle => collect(
            sophia::turtle::parser::turtle::parse_bufread(reader),
            format,
        ),
        Format::RdfXml => collect(sophia::xml::parser::parse_bufread(reader), format),
    }?;
    debug!(%format, triples = triples.len(), "parsed document");
    Ok(triples)
}

/// Parses `text` into a [`Graph`] with the `nml` prefix bound.
///
/// # Errors
///
/// See [`parse_document`].
pub fn load_document(text: &str, format: Format) -> Result<Graph> {
    let mut graph = Graph::new();
    graph.bind("nml", iris::NML);
    for t in parse_document(text, format)? {
        graph.add(t.subject, t.predicate, t.object);
    }
    Ok(graph)
}

fn collect<S: TripleSource>(mut source: S, format: Format) -> Result<Vec<Triple>> {
    let mut out = Vec::new();
    source
        .try_for_each_triple(|t| -> std::result::Result<(), LoadError> {
            out.push(Triple {
                subject: node(t.s(), "subject")?,
                predicate: node(t.p(), "predicate")?,
                object: object(t.o())?,
            });
            Ok(())
        })
        .map_err(|e| anyhow!("failed to parse {format} document: {e}"))?;
    Ok(out)
}

fn node<T: Term>(term: T, position: &str) -> std::result::Result<Iri, LoadError> {
    match term.iri() {
        Some(iri) => Iri::new(iri.as_str()).map_err(|e| LoadError(e.to_string())),
        None => Err(LoadError(format!(
            "{position} is not an IRI ({:?})",
            term.kind()
        ))),
    }
}

fn object<T: Term>(term: T) -> std::result::Result<Object, LoadError> {
    let Some(lexical) = term.lexical_form() else {
        return node(term, "object").map(Object::Iri);
    };
    let datatype = term.datatype().map(|dt| dt.as_str().to_owned());
    let literal = match datatype.as_deref() {
        None | Some(iris::XSD_STRING) => Literal::plain(lexical.to_string()),
        Some(dt) => Literal::typed(
            lexical.to_string(),
            Iri::new(dt).map_err(|e| LoadError(e.to_string()))?,
        ),
    };
    Ok(Object::Literal(literal))
}

/// Checks that `text` is a well-formed, non-empty document in `format`.
///
/// A parse failure is reported as a failed check, not as an error.
///
/// # Errors
///
/// Currently infallible; the `Result` matches the other validators.
pub fn validate_document(text: &str, format: Format) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    match parse_document(text, format) {
        Ok(triples) if triples.is_empty() => {
            report.push(TestResult::fail(
                VALIDATOR,
                format!("{format} document holds no statements"),
            ));
        }
        Ok(triples) => {
            report.push(TestResult::pass(
                VALIDATOR,
                format!("{format} document parses ({} statements)", triples.len()),
            ));
        }
        Err(e) => {
            report.push(TestResult::fail(VALIDATOR, format!("{e:#}")));
        }
    }
    Ok(report)
}

/// Serializes `graph` in every supported syntax and checks that each
/// document parses back to exactly the graph's statements.
///
/// # Errors
///
/// Currently infallible; serialization and parse failures are reported as
/// failed checks.
pub fn validate_consistency(graph: &Graph) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    let expected: HashSet<&Triple> = graph.iter().collect();

    for format in FORMATS {
        let validator = format!("{VALIDATOR}/{format}");
        let text = match graph.serialize(format) {
            Ok(text) => text,
            Err(e) => {
                report.push(TestResult::fail(validator, e.to_string()));
                continue;
            }
        };
        let parsed = match parse_document(&text, format) {
            Ok(parsed) => parsed,
            Err(e) => {
                report.push(TestResult::fail(validator, format!("{e:#}")));
                continue;
            }
        };

        let found: HashSet<&Triple> = parsed.iter().collect();
        let mut details: Vec<String> = expected
            .difference(&found)
            .map(|t| format!("missing: {}", describe(t)))
            .collect();
        details.extend(
            found
                .difference(&expected)
                .map(|t| format!("unexpected: {}", describe(t))),
        );
        details.sort();

        if details.is_empty() {
            report.push(TestResult::pass(
                validator,
                format!("{} statements survive a round trip", graph.len()),
            ));
        } else {
            report.push(TestResult::fail_with_details(
                validator,
                format!(
                    "document disagrees with the graph ({} parsed, {} expected)",
                    found.len(),
                    expected.len()
                ),
                details,
            ));
        }
    }
    Ok(report)
}

fn describe(t: &Triple) -> String {
    match &t.object {
        Object::Iri(iri) => format!("<{}> <{}> <{}>", t.subject, t.predicate, iri),
        Object::Literal(lit) => format!("<{}> <{}> {:?}", t.subject, t.predicate, lit.lexical()),
    }
}

//! Serializers for topology graphs.
//!
//! Three formats are supported:
//! - **RDF/XML** ([`rdfxml`]): the document format consumed by NML tooling
//! - **Turtle** ([`turtle`]): compact and human-readable, for review and diffing
//! - **N-Triples** ([`ntriples`]): one statement per line, for bulk loading

pub mod ntriples;
pub mod rdfxml;
pub mod turtle;

use crate::graph::{Graph, Triple};
use crate::model::Iri;

/// Groups statements by subject, subjects in order of first appearance.
pub(crate) fn by_subject(graph: &Graph) -> Vec<(&Iri, Vec<&Triple>)> {
    let mut groups: Vec<(&Iri, Vec<&Triple>)> = Vec::new();
    let mut positions: std::collections::HashMap<&Iri, usize> = std::collections::HashMap::new();
    for triple in graph.iter() {
        match positions.get(&triple.subject) {
            Some(&i) => groups[i].1.push(triple),
            None => {
                positions.insert(&triple.subject, groups.len());
                groups.push((&triple.subject, vec![triple]));
            }
        }
    }
    groups
}

/// Escapes a literal for the quoted string syntax shared by Turtle and
/// N-Triples.
pub(crate) fn escape_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

/// True when `s` is a valid XML NCName restricted to ASCII.
pub(crate) fn is_xml_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

//! Turtle 1.1 serializer.
//!
//! Emits every bound prefix, then one block per subject with its
//! predicate-object pairs separated by `;`.

use crate::graph::{rdf_type, Graph};
use crate::model::{Iri, Object};

use super::{by_subject, escape_quoted};

/// Serializes `graph` to a Turtle string.
#[must_use]
pub fn to_turtle(graph: &Graph) -> String {
    let mut out = String::with_capacity(graph.len() * 96);

    for (prefix, namespace) in graph.prefixes() {
        out.push_str(&format!("@prefix {prefix}: <{namespace}> .\n"));
    }
    out.push('\n');

    let rdf_type = rdf_type();
    for (subject, triples) in by_subject(graph) {
        out.push_str(&format!("<{subject}>"));
        let last = triples.len() - 1;
        for (i, t) in triples.iter().enumerate() {
            let predicate = if t.predicate == rdf_type {
                "a".to_owned()
            } else {
                name(graph, &t.predicate)
            };
            out.push_str(&format!(
                "\n  {} {} {}",
                predicate,
                object(graph, &t.object),
                if i == last { "." } else { ";" }
            ));
        }
        out.push_str("\n\n");
    }

    out
}

/// Prefixed name when the IRI's namespace is bound and its local part is
/// safe to write unescaped; the full `<IRI>` otherwise.
fn name(graph: &Graph, iri: &Iri) -> String {
    iri.split_namespace()
        .filter(|(_, local)| is_simple_local(local))
        .and_then(|(ns, local)| graph.prefix_for(ns).map(|p| format!("{p}:{local}")))
        .unwrap_or_else(|| format!("<{iri}>"))
}

fn is_simple_local(local: &str) -> bool {
    !local.is_empty()
        && local.chars().next().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        && local.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn object(graph: &Graph, obj: &Object) -> String {
    match obj {
        Object::Iri(iri) => name(graph, iri),
        Object::Literal(lit) => match lit.datatype() {
            Some(dt) => format!("\"{}\"^^{}", escape_quoted(lit.lexical()), name(graph, dt)),
            None => format!("\"{}\"", escape_quoted(lit.lexical())),
        },
    }
}

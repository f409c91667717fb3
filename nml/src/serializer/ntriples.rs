//! N-Triples serializer.
//!
//! One statement per line, absolute IRIs only, in insertion order.

use crate::graph::Graph;
use crate::model::Object;

use super::escape_quoted;

/// Serializes `graph` to an N-Triples string.
#[must_use]
pub fn to_ntriples(graph: &Graph) -> String {
    let mut out = String::with_capacity(graph.len() * 128);
    for t in graph.iter() {
        out.push('<');
        out.push_str(t.subject.as_str());
        out.push_str("> <");
        out.push_str(t.predicate.as_str());
        out.push_str("> ");
        out.push_str(&object(&t.object));
        out.push_str(" .\n");
    }
    out
}

fn object(obj: &Object) -> String {
    match obj {
        Object::Iri(iri) => format!("<{iri}>"),
        Object::Literal(lit) => match lit.datatype() {
            Some(dt) => format!("\"{}\"^^<{}>", escape_quoted(lit.lexical()), dt),
            None => format!("\"{}\"", escape_quoted(lit.lexical())),
        },
    }
}

//! In-memory triple store.
//!
//! A [`Graph`] is an insertion-ordered set of [`Triple`]s plus a table of
//! namespace prefix bindings used when writing documents. Adding a triple
//! that is already present has no effect.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::error::{NmlError, Result};
use crate::model::{iris, Iri, Object};
use crate::serializer;

/// One subject-predicate-object statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Resource the statement is about.
    pub subject: Iri,
    /// Relation term.
    pub predicate: Iri,
    /// Related resource or literal value.
    pub object: Object,
}

/// Output formats supported by [`Graph::serialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// RDF/XML with typed node elements (accepts `pretty-xml`, `xml`, `rdfxml`).
    RdfXml,
    /// Turtle 1.1 (accepts `turtle`, `ttl`).
    Turtle,
    /// N-Triples (accepts `nt`, `ntriples`, `n-triples`).
    NTriples,
}

impl Format {
    /// Conventional file extension.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Format::RdfXml => "rdf",
            Format::Turtle => "ttl",
            Format::NTriples => "nt",
        }
    }
}

impl FromStr for Format {
    type Err = NmlError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pretty-xml" | "xml" | "rdfxml" | "rdf" => Ok(Format::RdfXml),
            "turtle" | "ttl" => Ok(Format::Turtle),
            "nt" | "ntriples" | "n-triples" => Ok(Format::NTriples),
            other => Err(NmlError::invalid("format", other)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::RdfXml => "pretty-xml",
            Format::Turtle => "turtle",
            Format::NTriples => "nt",
        })
    }
}

/// Insertion-ordered set of triples with prefix bindings.
#[derive(Debug, Clone)]
pub struct Graph {
    triples: Vec<Triple>,
    seen: HashSet<Triple>,
    prefixes: Vec<(String, String)>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Creates an empty graph with `rdf` and `xsd` bound.
    #[must_use]
    pub fn new() -> Self {
        Graph {
            triples: Vec::new(),
            seen: HashSet::new(),
            prefixes: vec![
                ("rdf".to_owned(), iris::RDF.to_owned()),
                ("xsd".to_owned(), iris::XSD.to_owned()),
            ],
        }
    }

    /// Binds `prefix` to `namespace`, replacing any earlier binding of the
    /// same prefix.
    pub fn bind(&mut self, prefix: &str, namespace: &str) {
        match self.prefixes.iter_mut().find(|(p, _)| p == prefix) {
            Some(binding) => binding.1 = namespace.to_owned(),
            None => self
                .prefixes
                .push((prefix.to_owned(), namespace.to_owned())),
        }
    }

    /// Prefix bindings in binding order.
    #[must_use]
    pub fn prefixes(&self) -> &[(String, String)] {
        &self.prefixes
    }

    /// The prefix bound to `namespace`, if any.
    #[must_use]
    pub fn prefix_for(&self, namespace: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|(_, ns)| ns == namespace)
            .map(|(p, _)| p.as_str())
    }

    /// Adds a statement. Returns false if it was already present.
    pub fn add(&mut self, subject: Iri, predicate: Iri, object: impl Into<Object>) -> bool {
        let triple = Triple {
            subject,
            predicate,
            object: object.into(),
        };
        if self.seen.contains(&triple) {
            return false;
        }
        trace!(
            subject = %triple.subject,
            predicate = %triple.predicate,
            "triple added"
        );
        self.seen.insert(triple.clone());
        self.triples.push(triple);
        true
    }

    /// Number of statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// True when the graph holds no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// True when the exact statement is present.
    #[must_use]
    pub fn contains(&self, subject: &Iri, predicate: &Iri, object: &Object) -> bool {
        self.seen.contains(&Triple {
            subject: subject.clone(),
            predicate: predicate.clone(),
            object: object.clone(),
        })
    }

    /// Statements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Statements matching every position that is `Some`.
    ///
    /// Returned statements borrow only the graph, not the query terms.
    pub fn triples_matching<'a, 'q>(
        &'a self,
        subject: Option<&'q Iri>,
        predicate: Option<&'q Iri>,
        object: Option<&'q Object>,
    ) -> impl Iterator<Item = &'a Triple> + use<'a, 'q> {
        self.triples.iter().filter(move |t| {
            subject.map_or(true, |s| &t.subject == s)
                && predicate.map_or(true, |p| &t.predicate == p)
                && object.map_or(true, |o| &t.object == o)
        })
    }

    /// Objects of `(subject, predicate, ?)` in insertion order.
    pub fn objects<'a, 'q>(
        &'a self,
        subject: &'q Iri,
        predicate: &'q Iri,
    ) -> impl Iterator<Item = &'a Object> + use<'a, 'q> {
        self.triples_matching(Some(subject), Some(predicate), None)
            .map(|t| &t.object)
    }

    /// Subjects declared `rdf:type` of `class`, in insertion order.
    #[must_use]
    pub fn subjects_of_type(&self, class: &Iri) -> Vec<&Iri> {
        let rdf_type = rdf_type();
        self.triples
            .iter()
            .filter(|t| t.predicate == rdf_type && t.object.as_iri() == Some(class))
            .map(|t| &t.subject)
            .collect()
    }

    /// Distinct subjects in order of first appearance.
    #[must_use]
    pub fn subjects(&self) -> Vec<&Iri> {
        let mut seen = HashSet::new();
        self.triples
            .iter()
            .map(|t| &t.subject)
            .filter(|s| seen.insert(*s))
            .collect()
    }

    /// Writes the graph as text.
    ///
    /// # Errors
    ///
    /// Returns [`NmlError::Serialization`] when a predicate cannot be
    /// expressed in the requested syntax (RDF/XML needs every predicate to
    /// end in an XML name).
    pub fn serialize(&self, format: Format) -> Result<String> {
        match format {
            Format::RdfXml => serializer::rdfxml::to_rdf_xml(self),
            Format::Turtle => Ok(serializer::turtle::to_turtle(self)),
            Format::NTriples => Ok(serializer::ntriples::to_ntriples(self)),
        }
    }
}

/// The `rdf:type` predicate.
#[must_use]
pub fn rdf_type() -> Iri {
    Iri::from_trusted(iris::RDF_TYPE.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Literal;

    fn iri(s: &str) -> Iri {
        Iri::new(s).unwrap()
    }

    fn typed_subjects(g: &Graph) -> Vec<&Iri> {
        let class = iri("urn:class");
        g.triples_matching(None, Some(&rdf_type()), Some(&Object::from(&class)))
            .map(|t| &t.subject)
            .collect()
    }

    fn first_value<'g>(g: &'g Graph, subject: &str) -> Option<&'g Object> {
        let subject = iri(subject);
        let value = g.objects(&subject, &iri("urn:value")).next();
        value
    }

    #[test]
    fn query_results_outlive_query_terms() {
        let mut g = Graph::new();
        g.add(iri("urn:a"), rdf_type(), iri("urn:class"));
        g.add(iri("urn:a"), iri("urn:value"), Literal::from(7));
        assert_eq!(typed_subjects(&g), vec![&iri("urn:a")]);
        assert_eq!(first_value(&g, "urn:a"), Some(&Object::from(Literal::from(7))));
        assert_eq!(first_value(&g, "urn:b"), None);
    }

    #[test]
    fn duplicate_triples_are_ignored() {
        let mut g = Graph::new();
        assert!(g.add(iri("urn:a"), iri("urn:p"), iri("urn:b")));
        assert!(!g.add(iri("urn:a"), iri("urn:p"), iri("urn:b")));
        assert!(g.add(iri("urn:a"), iri("urn:p"), Literal::from("b")));
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn bind_replaces_existing_prefix() {
        let mut g = Graph::new();
        g.bind("nml", "http://example.org/old#");
        g.bind("nml", iris::NML);
        assert_eq!(g.prefix_for(iris::NML), Some("nml"));
        assert_eq!(g.prefix_for("http://example.org/old#"), None);
        assert_eq!(g.prefixes().len(), 3);
    }

    #[test]
    fn matching_and_type_queries() {
        let mut g = Graph::new();
        let node = iri("urn:n");
        let class = iri("urn:Node");
        g.add(node.clone(), rdf_type(), class.clone());
        g.add(node.clone(), iri("urn:name"), "n");
        assert_eq!(g.subjects_of_type(&class), vec![&node]);
        assert_eq!(g.triples_matching(Some(&node), None, None).count(), 2);
        assert_eq!(
            g.objects(&node, &iri("urn:name")).collect::<Vec<_>>(),
            vec![&Object::from("n")]
        );
        assert_eq!(g.subjects(), vec![&node]);
    }

    #[test]
    fn format_keys() {
        assert_eq!("pretty-xml".parse::<Format>().unwrap(), Format::RdfXml);
        assert_eq!("ttl".parse::<Format>().unwrap(), Format::Turtle);
        assert_eq!("nt".parse::<Format>().unwrap(), Format::NTriples);
        assert!("json".parse::<Format>().is_err());
    }
}

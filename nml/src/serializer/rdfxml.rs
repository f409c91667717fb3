//! RDF/XML serializer.
//!
//! Produces the "pretty" layout: one node element per subject, named after
//! the subject's first `rdf:type` when that type can be written as a QName,
//! with every other statement as a child property element.
//!
//! ```xml
//! <nml:Node rdf:about="urn:ogf:network:example:2026:switch1">
//!   <nml:name>switch1</nml:name>
//! </nml:Node>
//! ```

use crate::error::{NmlError, Result};
use crate::graph::{rdf_type, Graph, Triple};
use crate::model::{Iri, Object};

use super::{by_subject, is_xml_name};

/// Serializes `graph` to an RDF/XML string.
///
/// # Errors
///
/// Returns [`NmlError::Serialization`] if a predicate does not end in a
/// valid XML name, since RDF/XML can only write predicates as QNames.
pub fn to_rdf_xml(graph: &Graph) -> Result<String> {
    let mut ns = Namespaces::from_graph(graph);
    let rdf_type = rdf_type();

    // Resolve every element name up front so undeclared namespaces can be
    // given generated prefixes before the root element is written.
    let mut nodes: Vec<Node<'_>> = Vec::new();
    for (subject, triples) in by_subject(graph) {
        let typed = triples.iter().position(|t| {
            t.predicate == rdf_type
                && t.object
                    .as_iri()
                    .and_then(Iri::split_namespace)
                    .is_some_and(|(_, local)| is_xml_name(local))
        });
        let element = match typed.and_then(|i| triples[i].object.as_iri()) {
            Some(class) => ns.qname(class)?,
            None => "rdf:Description".to_owned(),
        };
        let mut properties = Vec::with_capacity(triples.len());
        for (i, t) in triples.iter().enumerate() {
            if Some(i) == typed {
                continue;
            }
            properties.push((ns.qname(&t.predicate)?, *t));
        }
        nodes.push(Node {
            subject,
            element,
            properties,
        });
    }

    let mut out = String::with_capacity(graph.len() * 128);
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<rdf:RDF");
    for (prefix, namespace) in ns.used() {
        out.push_str(&format!("\n  xmlns:{}=\"{}\"", prefix, escape_attr(namespace)));
    }
    out.push_str("\n>\n");

    for node in &nodes {
        out.push_str(&format!(
            "  <{} rdf:about=\"{}\">\n",
            node.element,
            escape_attr(node.subject.as_str())
        ));
        for (qname, t) in &node.properties {
            match &t.object {
                Object::Iri(iri) => out.push_str(&format!(
                    "    <{} rdf:resource=\"{}\"/>\n",
                    qname,
                    escape_attr(iri.as_str())
                )),
                Object::Literal(lit) => {
                    let datatype = lit
                        .datatype()
                        .map(|dt| format!(" rdf:datatype=\"{}\"", escape_attr(dt.as_str())))
                        .unwrap_or_default();
                    out.push_str(&format!(
                        "    <{}{}>{}</{}>\n",
                        qname,
                        datatype,
                        escape_text(lit.lexical()),
                        qname
                    ));
                }
            }
        }
        out.push_str(&format!("  </{}>\n", node.element));
    }

    out.push_str("</rdf:RDF>\n");
    Ok(out)
}

struct Node<'a> {
    subject: &'a Iri,
    element: String,
    properties: Vec<(String, &'a Triple)>,
}

/// Prefix table for one document: the graph's bindings plus any generated
/// `nsN` prefixes, tracking which ones the document actually uses.
struct Namespaces {
    bindings: Vec<(String, String, bool)>,
    generated: usize,
}

impl Namespaces {
    fn from_graph(graph: &Graph) -> Self {
        let bindings = graph
            .prefixes()
            .iter()
            .map(|(p, ns)| (p.clone(), ns.clone(), p == "rdf"))
            .collect();
        Namespaces {
            bindings,
            generated: 0,
        }
    }

    fn qname(&mut self, iri: &Iri) -> Result<String> {
        let (namespace, local) = iri
            .split_namespace()
            .filter(|(_, local)| is_xml_name(local))
            .ok_or_else(|| {
                NmlError::Serialization(format!("cannot write <{iri}> as an XML qualified name"))
            })?;

        if let Some(binding) = self.bindings.iter_mut().find(|(_, ns, _)| ns == namespace) {
            binding.2 = true;
            return Ok(format!("{}:{}", binding.0, local));
        }

        let prefix = loop {
            self.generated += 1;
            let candidate = format!("ns{}", self.generated);
            if !self.bindings.iter().any(|(p, _, _)| *p == candidate) {
                break candidate;
            }
        };
        let qname = format!("{prefix}:{local}");
        self.bindings.push((prefix, namespace.to_owned(), true));
        Ok(qname)
    }

    fn used(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings
            .iter()
            .filter(|(_, _, used)| *used)
            .map(|(p, ns, _)| (p.as_str(), ns.as_str()))
    }
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#13;"),
            other => out.push(other),
        }
    }
    out
}

fn escape_attr(s: &str) -> String {
    escape_text(s)
        .replace('"', "&quot;")
        .replace('\n', "&#10;")
        .replace('\t', "&#9;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{iris, Literal};

    fn iri(s: &str) -> Iri {
        Iri::new(s).unwrap()
    }

    fn nml(local: &str) -> Iri {
        iri(&format!("{}{}", iris::NML, local))
    }

    #[test]
    fn typed_node_elements_and_properties() {
        let mut g = Graph::new();
        g.bind("nml", iris::NML);
        let node = iri("urn:ogf:network:x:2026:switch1");
        let port = iri("urn:ogf:network:x:2026:switch1:1:in");
        g.add(node.clone(), rdf_type(), nml("Node"));
        g.add(node.clone(), nml("name"), "switch1 & co");
        g.add(node.clone(), nml("hasInboundPort"), port.clone());
        g.add(port, nml("value"), Literal::from(100));

        let xml = to_rdf_xml(&g).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rdf:RDF"));
        assert!(xml.contains("xmlns:nml=\"http://schemas.ogf.org/nml/2013/05/base#\""));
        assert!(xml.contains("xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\""));
        assert!(!xml.contains("xmlns:xsd"));
        assert!(xml.contains("<nml:Node rdf:about=\"urn:ogf:network:x:2026:switch1\">"));
        assert!(xml.contains("<nml:name>switch1 &amp; co</nml:name>"));
        assert!(xml.contains(
            "<nml:hasInboundPort rdf:resource=\"urn:ogf:network:x:2026:switch1:1:in\"/>"
        ));
        assert!(xml.contains(
            "<rdf:Description rdf:about=\"urn:ogf:network:x:2026:switch1:1:in\">"
        ));
        assert!(xml.contains(
            "<nml:value rdf:datatype=\"http://www.w3.org/2001/XMLSchema#integer\">100</nml:value>"
        ));
        assert!(xml.trim_end().ends_with("</rdf:RDF>"));
    }

    #[test]
    fn unbound_namespaces_get_generated_prefixes() {
        let mut g = Graph::new();
        g.add(iri("urn:a"), iri("http://example.org/vocab#rel"), iri("urn:b"));
        let xml = to_rdf_xml(&g).unwrap();
        assert!(xml.contains("xmlns:ns1=\"http://example.org/vocab#\""));
        assert!(xml.contains("<ns1:rel rdf:resource=\"urn:b\"/>"));
    }

    #[test]
    fn predicates_without_xml_local_name_fail() {
        let mut g = Graph::new();
        g.add(iri("urn:a"), iri("urn:ogf:network:rel"), iri("urn:b"));
        assert!(matches!(to_rdf_xml(&g), Err(NmlError::Serialization(_))));
    }

    #[test]
    fn non_qname_types_fall_back_to_description() {
        let mut g = Graph::new();
        g.bind("nml", iris::NML);
        g.add(iri("urn:a"), rdf_type(), iri("https://rtsn.nl/thesis/nml/fiber#9"));
        let xml = to_rdf_xml(&g).unwrap();
        assert!(xml.contains("<rdf:Description rdf:about=\"urn:a\">"));
        assert!(xml.contains("<rdf:type rdf:resource=\"https://rtsn.nl/thesis/nml/fiber#9\"/>"));
    }
}

//! Document validators: RDF well-formedness and NML structure.

pub mod rdf;
pub mod topology;

//! Network Markup Language (NML) topology builder.
//!
//! The `nml-topology` crate mints globally addressable URNs for network
//! resources (devices, ports, links, services, labels) and assembles them
//! into a graph of statements using the NML ontology, ready to be written
//! as RDF/XML, Turtle, or N-Triples.
//!
//! # Entry Point
//!
//! ```
//! use nml_topology::{Direction, NmlBuilder, Relation};
//!
//! let mut nml = NmlBuilder::new("example", &[]);
//! let topology = nml.add_topology(None)?;
//! let switch = nml.add_node("switch1")?;
//! nml.relate(&topology, &switch, Relation::HasNode)?;
//!
//! let inbound = nml.add_port(&switch, "1", Some(Direction::In), None, None)?;
//! let outbound = nml.add_port(&switch, "1", Some(Direction::Out), None, None)?;
//! nml.add_bidirectional_port(&switch, "1", &inbound, &outbound, &[])?;
//!
//! let (base, direction) = nml_topology::split_port(&inbound)?;
//! assert_eq!(direction, "in");
//! assert!(base.as_str().ends_with(":switch1:1"));
//! # Ok::<(), nml_topology::NmlError>(())
//! ```
//!
//! # Serialization
//!
//! ```
//! use nml_topology::{Format, NmlBuilder};
//!
//! let mut nml = NmlBuilder::new("example", &[]);
//! nml.add_node("switch1")?;
//! let rdf_xml = nml.get_nml()?;
//! let turtle = nml.serialize(Format::Turtle)?;
//! # Ok::<(), nml_topology::NmlError>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod builder;
#[cfg(feature = "serde")]
pub mod description;
pub mod error;
pub mod graph;
pub mod labels;
pub mod model;
pub mod port;
pub mod serializer;
pub mod urn;
pub mod vocab;

pub use builder::NmlBuilder;
#[cfg(feature = "serde")]
pub use description::TopologyDescription;
pub use error::{NmlError, Result};
pub use graph::{Format, Graph, Triple};
pub use labels::LabelCache;
pub use model::{Identifier, Iri, Literal, Object};
pub use port::split_port;
pub use urn::{
    Clock, FixedClock, RandomTokens, SequentialTokens, SystemClock, TokenSource, UrnAuthority,
};
pub use vocab::{
    AdaptationFunction, AdaptationKind, Direction, Encoding, EntityClass, LabelType, Relation,
};

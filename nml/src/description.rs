//! Topology descriptions.
//!
//! A [`TopologyDescription`] is a declarative JSON form of a topology: nodes
//! with their ports, labels, and services, and the links between ports.
//! [`TopologyDescription::build`] replays it through an [`NmlBuilder`].
//!
//! ```json
//! {
//!   "base_name": "example",
//!   "topology": "ring",
//!   "nodes": [
//!     { "name": "switch1",
//!       "ports": [ { "name": "1", "encoding": "fiber",
//!                    "labels": [ { "type": "vlan", "value": 100 } ] } ],
//!       "switching_service": "fabric" }
//!   ],
//!   "links": [
//!     { "source": { "node": "switch1", "port": "1" },
//!       "sink":   { "node": "switch2", "port": "1" } }
//!   ]
//! }
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use crate::builder::NmlBuilder;
use crate::error::{NmlError, Result};
use crate::model::{Iri, Literal};
use crate::vocab::{AdaptationFunction, Direction, Encoding, LabelType, Relation};

/// A complete topology.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopologyDescription {
    /// Base name of every URN in the document.
    pub base_name: String,
    /// Extra qualifiers appended to the base name.
    #[serde(default)]
    pub extras: Vec<String>,
    /// Topology name; the bare base URN is used when absent.
    #[serde(default)]
    pub topology: Option<String>,
    /// Devices.
    #[serde(default)]
    pub nodes: Vec<NodeDescription>,
    /// Links between ports of the devices above.
    #[serde(default)]
    pub links: Vec<LinkDescription>,
}

/// One device.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDescription {
    /// Device name.
    pub name: String,
    /// Physical ports.
    #[serde(default)]
    pub ports: Vec<PortDescription>,
    /// Name of the switching service spanning all ports; an empty string adds
    /// an unnamed service.
    #[serde(default)]
    pub switching_service: Option<String>,
    /// Protocol adaptation services.
    #[serde(default)]
    pub adaptations: Vec<AdaptationDescription>,
}

/// Which directional ports a physical port gets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    /// Inbound only.
    In,
    /// Outbound only.
    Out,
    /// Inbound and outbound, grouped by a BidirectionalPort.
    #[default]
    Both,
}

impl PortDirection {
    fn directions(self) -> &'static [Direction] {
        match self {
            PortDirection::In => &[Direction::In],
            PortDirection::Out => &[Direction::Out],
            PortDirection::Both => &[Direction::In, Direction::Out],
        }
    }
}

/// One physical port.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortDescription {
    /// Port name, unique per device.
    pub name: String,
    /// Directional ports to create.
    #[serde(default)]
    pub direction: PortDirection,
    /// Encoding key (`duct` or `fiber`).
    #[serde(default)]
    pub encoding: Option<String>,
    /// Human-readable name stored on each directional port.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Labels attached to each directional port.
    #[serde(default)]
    pub labels: Vec<LabelDescription>,
}

/// A (type, value) label.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelDescription {
    /// Label type key (`vlan` or `fibernumber`).
    #[serde(rename = "type")]
    pub label_type: String,
    /// Label value.
    pub value: LabelValue,
}

/// A label value as written in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LabelValue {
    /// Numeric values become `xsd:integer` literals.
    Integer(i64),
    /// Anything else is a plain literal.
    Text(String),
}

impl From<&LabelValue> for Literal {
    fn from(value: &LabelValue) -> Self {
        match value {
            LabelValue::Integer(i) => Literal::from(*i),
            LabelValue::Text(s) => Literal::plain(s.as_str()),
        }
    }
}

/// An adaptation or deadaptation service.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdaptationDescription {
    /// Direction of the ports served: `out` gives an AdaptationService,
    /// `in` a DeadaptationService.
    pub direction: String,
    /// Adaptation function key (`duct`, `fiber` or `ethernet`).
    pub function: String,
    /// Names of this node's ports the service provides, taken in the
    /// service's direction.
    #[serde(default)]
    pub ports: Vec<String>,
    /// Service name.
    #[serde(default)]
    pub name: Option<String>,
}

/// A unidirectional link from one device's port to another's.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkDescription {
    /// Link name.
    #[serde(default)]
    pub name: Option<String>,
    /// Port whose outbound side feeds the link.
    pub source: PortRef,
    /// Port whose inbound side the link feeds.
    pub sink: PortRef,
}

/// Reference to a port by device and port name.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortRef {
    /// Device name.
    pub node: String,
    /// Port name.
    pub port: String,
}

#[derive(Default)]
struct PortSides {
    inbound: Option<Iri>,
    outbound: Option<Iri>,
}

impl PortSides {
    fn side(&self, direction: Direction) -> Option<&Iri> {
        match direction {
            Direction::In => self.inbound.as_ref(),
            Direction::Out => self.outbound.as_ref(),
        }
    }

    fn set(&mut self, direction: Direction, urn: Iri) {
        match direction {
            Direction::In => self.inbound = Some(urn),
            Direction::Out => self.outbound = Some(urn),
        }
    }
}

impl TopologyDescription {
    /// Parses a JSON description.
    ///
    /// # Errors
    ///
    /// Returns [`NmlError::Description`] when the text is not a valid
    /// description.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| NmlError::Description(e.to_string()))
    }

    /// A builder configured with this description's base name.
    #[must_use]
    pub fn builder(&self) -> NmlBuilder {
        let extras: Vec<&str> = self.extras.iter().map(String::as_str).collect();
        NmlBuilder::new(&self.base_name, &extras)
    }

    /// Adds every entity of the description to `nml` and returns the
    /// topology URN.
    ///
    /// # Errors
    ///
    /// Returns [`NmlError::InvalidArgument`] for unknown vocabulary keys,
    /// duplicate device or port names, and links or adaptations referring
    /// to ports that do not exist in the required direction.
    pub fn build(&self, nml: &mut NmlBuilder) -> Result<Iri> {
        let topology = nml.add_topology(self.topology.as_deref())?;
        let mut ports: HashMap<(String, String), PortSides> = HashMap::new();
        let mut seen_nodes = std::collections::HashSet::new();

        for node in &self.nodes {
            if !seen_nodes.insert(node.name.as_str()) {
                return Err(NmlError::invalid("node", node.name.as_str()));
            }
            let node_urn = nml.add_node(&node.name)?;
            nml.relate(&topology, &node_urn, Relation::HasNode)?;

            for port in &node.ports {
                let key = (node.name.clone(), port.name.clone());
                if ports.contains_key(&key) {
                    return Err(NmlError::invalid("port", port.name.as_str()));
                }
                let sides = add_physical_port(nml, &node_urn, port)?;
                ports.insert(key, sides);
            }

            if let Some(name) = &node.switching_service {
                let name = Some(name.as_str()).filter(|n| !n.is_empty());
                let service = nml.add_switching_service(&node.name, name)?;
                nml.relate(&node_urn, &service, Relation::HasService)?;
                for port in &node.ports {
                    let sides = &ports[&(node.name.clone(), port.name.clone())];
                    for direction in [Direction::In, Direction::Out] {
                        if let Some(urn) = sides.side(direction) {
                            nml.relate(&service, urn, direction.port_relation(false))?;
                        }
                    }
                }
            }

            for adaptation in &node.adaptations {
                let direction: Direction = adaptation.direction.parse()?;
                let function: AdaptationFunction = adaptation.function.parse()?;
                let service = nml.add_adaptation_service(
                    &node.name,
                    direction.adaptation_kind(false),
                    &function.term(),
                    adaptation.name.as_deref(),
                )?;
                nml.relate(&node_urn, &service, Relation::HasService)?;
                let provided = adaptation
                    .ports
                    .iter()
                    .map(|p| lookup(&ports, &node.name, p, direction).cloned())
                    .collect::<Result<Vec<_>>>()?;
                nml.add_adaptation_ports(&service, &provided)?;
            }
        }

        for link in &self.links {
            let source = lookup(&ports, &link.source.node, &link.source.port, Direction::Out)?;
            let sink = lookup(&ports, &link.sink.node, &link.sink.port, Direction::In)?;
            let link_urn = nml.add_link(link.name.as_deref())?;
            nml.relate(source, &link_urn, Direction::Out.link_relation(false))?;
            nml.relate(sink, &link_urn, Direction::In.link_relation(false))?;
        }

        Ok(topology)
    }
}

fn add_physical_port(
    nml: &mut NmlBuilder,
    node_urn: &Iri,
    port: &PortDescription,
) -> Result<PortSides> {
    let encoding = port
        .encoding
        .as_deref()
        .map(|key| key.parse::<Encoding>().map(Encoding::term))
        .transpose()?;
    let labels = port
        .labels
        .iter()
        .map(|l| -> Result<(Iri, Literal)> {
            Ok((l.label_type.parse::<LabelType>()?.term(), Literal::from(&l.value)))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut sides = PortSides::default();
    for &direction in port.direction.directions() {
        let urn = nml.add_port(
            node_urn,
            &port.name,
            Some(direction),
            encoding.as_ref(),
            port.display_name.as_deref(),
        )?;
        nml.relate(node_urn, &urn, direction.port_relation(false))?;
        for (label_type, value) in &labels {
            nml.add_label(&urn, label_type, value.clone())?;
        }
        sides.set(direction, urn);
    }

    if let (Some(inbound), Some(outbound)) = (&sides.inbound, &sides.outbound) {
        let group = nml.add_bidirectional_port(node_urn, &port.name, inbound, outbound, &[])?;
        nml.relate(node_urn, &group, Relation::HasPort)?;
    }
    Ok(sides)
}

fn lookup<'a>(
    ports: &'a HashMap<(String, String), PortSides>,
    node: &str,
    port: &str,
    direction: Direction,
) -> Result<&'a Iri> {
    ports
        .get(&(node.to_owned(), port.to_owned()))
        .and_then(|sides| sides.side(direction))
        .ok_or_else(|| NmlError::invalid("port", format!("{node}/{port} ({direction})")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::rdf_type;
    use crate::urn::{FixedClock, SequentialTokens};
    use crate::vocab::EntityClass;
    use chrono::NaiveDate;

    const RING: &str = r#"{
        "base_name": "example",
        "topology": "ring",
        "nodes": [
            { "name": "sw1",
              "ports": [ { "name": "1", "encoding": "fiber",
                           "labels": [ { "type": "vlan", "value": 100 } ] } ],
              "switching_service": "" },
            { "name": "sw2",
              "ports": [ { "name": "1", "direction": "in",
                           "labels": [ { "type": "vlan", "value": 100 } ] } ],
              "adaptations": [ { "direction": "in", "function": "ethernet", "ports": ["1"] } ] }
        ],
        "links": [
            { "name": "sw1-sw2",
              "source": { "node": "sw1", "port": "1" },
              "sink": { "node": "sw2", "port": "1" } }
        ]
    }"#;

    fn build(text: &str) -> Result<NmlBuilder> {
        let description = TopologyDescription::from_json(text)?;
        let mut nml = description
            .builder()
            .with_clock(FixedClock(NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()))
            .with_tokens(SequentialTokens::default());
        description.build(&mut nml)?;
        Ok(nml)
    }

    #[test]
    fn builds_ring() {
        let nml = build(RING).unwrap();
        let g = nml.graph();
        assert_eq!(g.subjects_of_type(&EntityClass::Node.term()).len(), 2);
        assert_eq!(g.subjects_of_type(&EntityClass::Port.term()).len(), 3);
        assert_eq!(g.subjects_of_type(&EntityClass::BidirectionalPort.term()).len(), 1);
        assert_eq!(g.subjects_of_type(&EntityClass::Link.term()).len(), 1);
        assert_eq!(g.subjects_of_type(&EntityClass::Label.term()).len(), 1);
        assert_eq!(g.subjects_of_type(&EntityClass::SwitchingService.term()).len(), 1);
        assert_eq!(
            g.subjects_of_type(&EntityClass::DeadaptationService.term()).len(),
            1
        );

        let topology = Iri::new("urn:ogf:network:example:2026:ring").unwrap();
        assert!(g.contains(&topology, &rdf_type(), &EntityClass::Topology.term().into()));

        let source = Iri::new("urn:ogf:network:example:2026:sw1:1:out").unwrap();
        let sink = Iri::new("urn:ogf:network:example:2026:sw2:1:in").unwrap();
        assert_eq!(g.objects(&source, &Relation::IsSource.term()).count(), 1);
        assert_eq!(g.objects(&sink, &Relation::IsSink.term()).count(), 1);
    }

    #[test]
    fn dangling_link_is_rejected() {
        let text = r#"{ "base_name": "x",
            "nodes": [ { "name": "a", "ports": [ { "name": "1", "direction": "in" } ] } ],
            "links": [ { "source": { "node": "a", "port": "1" },
                         "sink": { "node": "a", "port": "1" } } ] }"#;
        assert!(matches!(
            build(text),
            Err(NmlError::InvalidArgument { parameter: "port", .. })
        ));
    }

    #[test]
    fn unknown_vocabulary_is_rejected() {
        let text = r#"{ "base_name": "x",
            "nodes": [ { "name": "a", "ports": [ { "name": "1", "encoding": "copper" } ] } ] }"#;
        assert!(matches!(
            build(text),
            Err(NmlError::InvalidArgument { parameter: "encoding", .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_description_error() {
        assert!(matches!(
            TopologyDescription::from_json("{ \"nodes\": [] }"),
            Err(NmlError::Description(_))
        ));
    }

    #[test]
    fn duplicate_nodes_are_rejected() {
        let text = r#"{ "base_name": "x", "nodes": [ { "name": "a" }, { "name": "a" } ] }"#;
        assert!(build(text).is_err());
    }
}

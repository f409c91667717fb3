//! Graph assembly.
//!
//! [`NmlBuilder`] is the entry point for describing a topology. Each `add_*`
//! call mints an identifier through the builder's [`UrnAuthority`], writes
//! the `rdf:type` statement and attribute statements for the new entity, and
//! returns the identifier so it can be related to other entities with
//! [`NmlBuilder::relate`].
//!
//! ```
//! use nml_topology::{Direction, Encoding, NmlBuilder, Relation};
//!
//! let mut nml = NmlBuilder::new("example", &[]);
//! let switch = nml.add_node("switch1")?;
//! let port = nml.add_port(&switch, "1", Some(Direction::In), Some(&Encoding::Fiber.term()), None)?;
//! nml.relate(&switch, &port, Relation::HasInboundPort)?;
//! let document = nml.get_nml()?;
//! assert!(document.contains("nml:Node"));
//! # Ok::<(), nml_topology::NmlError>(())
//! ```

use tracing::debug;

use crate::error::{NmlError, Result};
use crate::graph::{rdf_type, Format, Graph};
use crate::labels::LabelCache;
use crate::model::{iris, require_raw, Identifier, Iri, Literal, Object};
use crate::urn::{device_name, Clock, TokenSource, UrnAuthority};
use crate::vocab::{self, AdaptationKind, Direction, EntityClass, Relation};

/// Builds one NML topology document.
#[derive(Debug)]
pub struct NmlBuilder {
    authority: UrnAuthority,
    graph: Graph,
    labels: LabelCache,
}

impl NmlBuilder {
    /// Creates a builder whose URNs live below
    /// `urn:ogf:network:<basename>:<year>[:<extra>]*`.
    ///
    /// The builder owns a fresh [`LabelCache`]; see
    /// [`NmlBuilder::with_label_cache`] to share one.
    #[must_use]
    pub fn new(basename: &str, extras: &[&str]) -> Self {
        let mut graph = Graph::new();
        graph.bind("nml", iris::NML);
        NmlBuilder {
            authority: UrnAuthority::new(basename, extras),
            graph,
            labels: LabelCache::new(),
        }
    }

    /// Uses `clock` for the base name's year and topology versions.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.authority.set_clock(Box::new(clock));
        self
    }

    /// Uses `tokens` for the uniqueness suffix of randomized URNs.
    #[must_use]
    pub fn with_tokens(mut self, tokens: impl TokenSource + 'static) -> Self {
        self.authority.set_tokens(Box::new(tokens));
        self
    }

    /// Deduplicates labels through `cache`, which may be shared with other
    /// builders.
    #[must_use]
    pub fn with_label_cache(mut self, cache: LabelCache) -> Self {
        self.labels = cache;
        self
    }

    /// The label cache in use.
    #[must_use]
    pub fn label_cache(&self) -> &LabelCache {
        &self.labels
    }

    /// Replaces the base name for URNs minted from now on.
    pub fn set_base_name(&mut self, basename: &str, extras: &[&str]) {
        self.authority.set_base_name(basename, extras);
    }

    /// The bare base URN.
    #[must_use]
    pub fn base_urn(&self) -> Iri {
        self.authority.base_urn()
    }

    /// Mints a URN without adding anything to the graph.
    ///
    /// # Errors
    ///
    /// See [`UrnAuthority::mint`].
    pub fn mint(&mut self, name: &str, extras: &[&str], randomize: bool) -> Result<Iri> {
        self.authority.mint(name, extras, randomize)
    }

    /// Mints a port URN without adding anything to the graph.
    ///
    /// # Errors
    ///
    /// See [`UrnAuthority::mint_port`].
    pub fn mint_port_urn(
        &mut self,
        device: impl Into<Identifier>,
        port: &str,
        direction: Option<Direction>,
        extras: &[&str],
    ) -> Result<Iri> {
        self.authority
            .mint_port(&device.into(), port, direction, extras)
    }

    fn declare(&mut self, urn: &Iri, class: EntityClass) {
        self.graph.add(urn.clone(), rdf_type(), class.term());
        debug!(class = class.as_str(), %urn, "entity added");
    }

    fn set_name(&mut self, urn: &Iri, name: Option<&str>) {
        if let Some(name) = name {
            self.graph
                .add(urn.clone(), Relation::Name.term(), Literal::plain(name));
        }
    }

    /// Adds a Node (a device) named `name`.
    ///
    /// Raw names are checked by [`crate::model::is_resolved`]: a name starting
    /// with `urn:` or containing `://` (such as `http://router`) is taken for
    /// an identifier and refused, even though it would be a usable label.
    /// The same rule applies to every `&str` name, device, and port
    /// parameter of this builder.
    ///
    /// # Errors
    ///
    /// Returns [`NmlError::InvalidArgument`] if `name` looks resolved.
    pub fn add_node(&mut self, name: &str) -> Result<Iri> {
        let urn = self.authority.mint(name, &[], false)?;
        self.declare(&urn, EntityClass::Node);
        self.set_name(&urn, Some(name));
        Ok(urn)
    }

    /// Adds a Port on `device`. `device` may be a raw name or the URN returned
    /// by [`NmlBuilder::add_node`]; `encoding` must be an already resolved
    /// term such as [`crate::vocab::Encoding::term`].
    ///
    /// # Errors
    ///
    /// Returns [`NmlError::InvalidArgument`] if `port` is a resolved
    /// identifier or `device` is an unusable name.
    pub fn add_port(
        &mut self,
        device: impl Into<Identifier>,
        port: &str,
        direction: Option<Direction>,
        encoding: Option<&Iri>,
        name: Option<&str>,
    ) -> Result<Iri> {
        self.add_port_with_extras(device, port, direction, encoding, name, &[])
    }

    /// [`NmlBuilder::add_port`] with extra URN segments between the port
    /// and the direction.
    ///
    /// # Errors
    ///
    /// As [`NmlBuilder::add_port`], and when the segments exceed the limit
    /// of [`UrnAuthority::mint_port`].
    pub fn add_port_with_extras(
        &mut self,
        device: impl Into<Identifier>,
        port: &str,
        direction: Option<Direction>,
        encoding: Option<&Iri>,
        name: Option<&str>,
        extras: &[&str],
    ) -> Result<Iri> {
        let urn = self
            .authority
            .mint_port(&device.into(), port, direction, extras)?;
        self.declare(&urn, EntityClass::Port);
        if let Some(encoding) = encoding {
            self.graph
                .add(urn.clone(), Relation::Encoding.term(), encoding.clone());
        }
        self.set_name(&urn, name);
        Ok(urn)
    }

    /// Adds a Link. Link URNs are always randomized, so two links never
    /// collide even with identical names.
    ///
    /// # Errors
    ///
    /// Infallible in practice; the `Result` mirrors the other constructors.
    pub fn add_link(&mut self, name: Option<&str>) -> Result<Iri> {
        let urn = self.authority.mint("link", &[], true)?;
        self.declare(&urn, EntityClass::Link);
        self.set_name(&urn, name);
        Ok(urn)
    }

    /// Adds a Topology stamped with today's date (`YYYYMMDD`) as its version.
    /// Without a name the topology takes the bare base URN.
    ///
    /// # Errors
    ///
    /// Returns [`NmlError::InvalidArgument`] if `name` looks resolved per [`crate::model::is_resolved`].
    pub fn add_topology(&mut self, name: Option<&str>) -> Result<Iri> {
        let urn = match name {
            Some(name) if !name.is_empty() => self.authority.mint(name, &[], false)?,
            _ => self.authority.base_urn(),
        };
        self.declare(&urn, EntityClass::Topology);
        let version = self.authority.today().format("%Y%m%d").to_string();
        self.graph
            .add(urn.clone(), Relation::Version.term(), Literal::plain(version));
        Ok(urn)
    }

    /// Adds a SwitchingService on `device`, randomized per device.
    ///
    /// # Errors
    ///
    /// Returns [`NmlError::InvalidArgument`] if `device` looks resolved per [`crate::model::is_resolved`].
    pub fn add_switching_service(&mut self, device: &str, name: Option<&str>) -> Result<Iri> {
        let urn = self
            .authority
            .mint(device, &[EntityClass::SwitchingService.as_str()], true)?;
        self.declare(&urn, EntityClass::SwitchingService);
        self.set_name(&urn, name);
        Ok(urn)
    }

    /// Adds an AdaptationService or DeadaptationService on `device`
    /// performing `function` (a resolved term such as
    /// [`crate::vocab::AdaptationFunction::term`]).
    ///
    /// # Errors
    ///
    /// Returns [`NmlError::InvalidArgument`] if `device` looks resolved per [`crate::model::is_resolved`].
    pub fn add_adaptation_service(
        &mut self,
        device: &str,
        kind: AdaptationKind,
        function: &Iri,
        name: Option<&str>,
    ) -> Result<Iri> {
        require_raw("device", device)?;
        let urn = self.authority.mint(device, &[kind.as_str()], true)?;
        self.declare(&urn, kind.class());
        self.graph
            .add(urn.clone(), Relation::AdaptationFunction.term(), function.clone());
        self.set_name(&urn, name);
        Ok(urn)
    }

    /// Returns the Label for `(label_type, value)`, minting it and writing its
    /// `type` and `value` statements on first use.
    ///
    /// # Errors
    ///
    /// Infallible in practice; minting a label URN takes no caller input.
    pub fn resolve_label(&mut self, label_type: &Iri, value: impl Into<Literal>) -> Result<Iri> {
        let value = value.into();
        let cache = self.labels.clone();
        let authority = &mut self.authority;
        let (urn, minted) =
            cache.resolve_with(label_type, &value, || authority.mint("label", &[], true))?;
        if minted {
            self.declare(&urn, EntityClass::Label);
            self.graph
                .add(urn.clone(), Relation::Type.term(), label_type.clone());
            self.graph.add(urn.clone(), Relation::Value.term(), value);
        }
        Ok(urn)
    }

    /// Attaches the Label for `(label_type, value)` to `node` via `hasLabel`.
    ///
    /// # Errors
    ///
    /// See [`NmlBuilder::resolve_label`].
    pub fn add_label(
        &mut self,
        node: &Iri,
        label_type: &Iri,
        value: impl Into<Literal>,
    ) -> Result<()> {
        let label = self.resolve_label(label_type, value)?;
        self.relate(node, &label, Relation::HasLabel)
    }

    /// Relates `service` to each of `ports` via `providesPort`.
    ///
    /// # Errors
    ///
    /// Infallible in practice; the relation key is fixed.
    pub fn add_adaptation_ports(&mut self, service: &Iri, ports: &[Iri]) -> Result<()> {
        for port in ports {
            self.relate(service, port, Relation::ProvidesPort)?;
        }
        Ok(())
    }

    /// Groups two directional ports into a BidirectionalPort. The group URN
    /// is a deterministic function of `device`, `port` and `extras`; with no
    /// extras it equals the base returned by [`crate::port::split_port`] for
    /// either directional port.
    ///
    /// # Errors
    ///
    /// Returns [`NmlError::InvalidArgument`] for a resolved `port` name, an
    /// unusable `device`, or too many segments.
    pub fn add_bidirectional_port(
        &mut self,
        device: impl Into<Identifier>,
        port: &str,
        port_a: &Iri,
        port_b: &Iri,
        extras: &[&str],
    ) -> Result<Iri> {
        let device = device.into();
        let device = device_name(&device)?;
        require_raw("port", port)?;
        let mut segments = Vec::with_capacity(extras.len() + 1);
        segments.push(port);
        segments.extend_from_slice(extras);
        let urn = self.authority.mint(&device, &segments, false)?;

        self.declare(&urn, EntityClass::BidirectionalPort);
        self.relate(&urn, port_a, Relation::HasPort)?;
        self.relate(&urn, port_b, Relation::HasPort)?;
        Ok(urn)
    }

    /// Adds `subject --relation--> object`, resolving the relation key under
    /// the NML namespace.
    ///
    /// # Errors
    ///
    /// Returns [`NmlError::InvalidArgument`] if `relation` is empty or is
    /// already a resolved identifier.
    pub fn relate(
        &mut self,
        subject: &Iri,
        object: impl Into<Object>,
        relation: impl AsRef<str>,
    ) -> Result<()> {
        let relation = relation.as_ref();
        if relation.is_empty() {
            return Err(NmlError::invalid("relation", relation));
        }
        require_raw("relation", relation)?;
        let predicate = vocab::term(relation)?;
        self.graph.add(subject.clone(), predicate, object);
        Ok(())
    }

    /// The graph assembled so far.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Consumes the builder, returning its graph.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Writes the graph in `format`.
    ///
    /// # Errors
    ///
    /// See [`Graph::serialize`].
    pub fn serialize(&self, format: Format) -> Result<String> {
        self.graph.serialize(format)
    }

    /// Writes the graph as an RDF/XML NML document.
    ///
    /// # Errors
    ///
    /// See [`Graph::serialize`].
    pub fn get_nml(&self) -> Result<String> {
        self.serialize(Format::RdfXml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::urn::{FixedClock, SequentialTokens};
    use crate::vocab::{AdaptationFunction, Encoding, LabelType};
    use chrono::NaiveDate;

    fn builder() -> NmlBuilder {
        NmlBuilder::new("example", &[])
            .with_clock(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()))
            .with_tokens(SequentialTokens::default())
    }

    fn has(nml: &NmlBuilder, s: &Iri, p: Iri, o: impl Into<Object>) -> bool {
        nml.graph().contains(s, &p, &o.into())
    }

    #[test]
    fn node_gets_type_and_name() {
        let mut nml = builder();
        let node = nml.add_node("switch1").unwrap();
        assert_eq!(node.as_str(), "urn:ogf:network:example:2026:switch1");
        assert!(has(&nml, &node, rdf_type(), EntityClass::Node.term()));
        assert!(has(&nml, &node, Relation::Name.term(), "switch1"));
        assert_eq!(nml.graph().len(), 2);
    }

    #[test]
    fn port_records_encoding_and_optional_name() {
        let mut nml = builder();
        let node = nml.add_node("sw").unwrap();
        let fiber = Encoding::Fiber.term();
        let port = nml
            .add_port(&node, "1", Some(Direction::Out), Some(&fiber), Some("uplink"))
            .unwrap();
        assert_eq!(port.as_str(), "urn:ogf:network:example:2026:sw:1:out");
        assert!(has(&nml, &port, rdf_type(), EntityClass::Port.term()));
        assert!(has(&nml, &port, Relation::Encoding.term(), fiber));
        assert!(has(&nml, &port, Relation::Name.term(), "uplink"));

        let bare = nml.add_port("sw", "2", None, None, None).unwrap();
        assert_eq!(nml.graph().triples_matching(Some(&bare), None, None).count(), 1);
    }

    #[test]
    fn port_rejects_urn_as_port_name() {
        let mut nml = builder();
        let err = nml
            .add_port("sw", "urn:ogf:network:x", Some(Direction::In), None, None)
            .unwrap_err();
        assert!(matches!(err, NmlError::InvalidArgument { parameter: "port", .. }));
    }

    #[test]
    fn port_on_node_urn_encodes_device_segment_again() {
        let mut nml = builder();
        let node = nml.add_node("core switch").unwrap();
        assert_eq!(node.as_str(), "urn:ogf:network:example:2026:core%20switch");
        let port = nml
            .add_port(&node, "1", Some(Direction::In), None, None)
            .unwrap();
        assert_eq!(
            port.as_str(),
            "urn:ogf:network:example:2026:core%2520switch:1:in"
        );
    }

    #[test]
    fn names_that_look_resolved_are_refused() {
        let mut nml = builder();
        for name in ["http://router", "urn:router"] {
            let err = nml.add_node(name).unwrap_err();
            assert!(matches!(err, NmlError::InvalidArgument { parameter: "name", .. }));
        }
        assert!(nml.graph().is_empty());
        assert!(nml.add_node("router:1").is_ok());
    }

    #[test]
    fn topology_without_name_uses_base_urn() {
        let mut nml = builder();
        let topo = nml.add_topology(None).unwrap();
        assert_eq!(topo, nml.base_urn());
        assert!(has(&nml, &topo, Relation::Version.term(), "20261019"));

        let named = nml.add_topology(Some("ring")).unwrap();
        assert_eq!(named.as_str(), "urn:ogf:network:example:2026:ring");
        assert_eq!(nml.add_topology(Some("")).unwrap(), topo);
    }

    #[test]
    fn services_are_randomized_per_device() {
        let mut nml = builder();
        let sw = nml.add_switching_service("sw", Some("fabric")).unwrap();
        assert_eq!(
            sw.as_str(),
            "urn:ogf:network:example:2026:sw:SwitchingService:T00000"
        );
        assert!(has(&nml, &sw, Relation::Name.term(), "fabric"));

        let function = AdaptationFunction::Ethernet.term();
        let ad = nml
            .add_adaptation_service("sw", AdaptationKind::Deadaptation, &function, None)
            .unwrap();
        assert_eq!(
            ad.as_str(),
            "urn:ogf:network:example:2026:sw:DeadaptationService:T00001"
        );
        assert!(has(&nml, &ad, rdf_type(), EntityClass::DeadaptationService.term()));
        assert!(has(&nml, &ad, Relation::AdaptationFunction.term(), function));
    }

    #[test]
    fn adaptation_service_rejects_urn_device() {
        let mut nml = builder();
        let node = nml.add_node("sw").unwrap();
        let function = AdaptationFunction::Fiber.term();
        assert!(nml
            .add_adaptation_service(node.as_str(), AdaptationKind::Adaptation, &function, None)
            .is_err());
    }

    #[test]
    fn labels_are_declared_once() {
        let mut nml = builder();
        let vlan = LabelType::Vlan.term();
        let a = nml.resolve_label(&vlan, 100).unwrap();
        let before = nml.graph().len();
        let b = nml.resolve_label(&vlan, 100).unwrap();
        assert_eq!(a, b);
        assert_eq!(nml.graph().len(), before);
        assert!(has(&nml, &a, Relation::Type.term(), vlan));
        assert!(has(&nml, &a, Relation::Value.term(), Literal::from(100)));

        let other = nml.resolve_label(&LabelType::FiberNumber.term(), 100).unwrap();
        assert_ne!(a, other);
    }

    #[test]
    fn shared_cache_skips_declaration_in_second_document() {
        let cache = LabelCache::new();
        let mut first = builder().with_label_cache(cache.clone());
        let mut second = builder().with_label_cache(cache);
        let vlan = LabelType::Vlan.term();
        let a = first.resolve_label(&vlan, 7).unwrap();
        let b = second.resolve_label(&vlan, 7).unwrap();
        assert_eq!(a, b);
        assert!(second.graph().is_empty());
    }

    #[test]
    fn adaptation_ports_relate_each_port() {
        let mut nml = builder();
        let function = AdaptationFunction::Duct.term();
        let service = nml
            .add_adaptation_service("pp", AdaptationKind::Adaptation, &function, None)
            .unwrap();
        let p1 = nml.add_port("pp", "f1", Some(Direction::Out), None, None).unwrap();
        let p2 = nml.add_port("pp", "f2", Some(Direction::Out), None, None).unwrap();
        nml.add_adaptation_ports(&service, &[p1.clone(), p2.clone()])
            .unwrap();
        assert!(has(&nml, &service, Relation::ProvidesPort.term(), p1));
        assert!(has(&nml, &service, Relation::ProvidesPort.term(), p2));
    }

    #[test]
    fn relate_rejects_resolved_relation_names() {
        let mut nml = builder();
        let node = nml.add_node("sw").unwrap();
        let err = nml
            .relate(&node, "x", "http://schemas.ogf.org/nml/2013/05/base#name")
            .unwrap_err();
        assert!(matches!(err, NmlError::InvalidArgument { parameter: "relation", .. }));
        assert!(nml.relate(&node, "x", "").is_err());
        nml.relate(&node, "alias", "isAlias").unwrap();
        assert!(has(&nml, &node, Relation::IsAlias.term(), "alias"));
    }

    #[test]
    fn serializes_with_nml_prefix() {
        let mut nml = builder();
        nml.add_node("sw").unwrap();
        let xml = nml.get_nml().unwrap();
        assert!(xml.contains("xmlns:nml=\"http://schemas.ogf.org/nml/2013/05/base#\""));
        let ttl = nml.serialize(Format::Turtle).unwrap();
        assert!(ttl.contains("a nml:Node"));
    }
}

//! NML vocabulary tables.
//!
//! Static mappings from domain concepts (port direction, physical encoding,
//! adaptation function, label type) to ontology terms. Every table is total
//! over a fixed, finite domain; parsing a key outside that domain yields
//! [`NmlError::InvalidArgument`] naming the parameter and the rejected key.
//!
//! Standardized terms live under [`iris::NML`]; terms NML leaves open
//! (encodings, adaptation functions, label types) live under
//! [`iris::NML_EXT`].

use std::fmt;
use std::str::FromStr;

use crate::error::{NmlError, Result};
use crate::model::{iris, require_raw, Iri};

/// Resolves `name` to a term in the standardized NML namespace.
///
/// # Errors
///
/// Returns [`NmlError::InvalidArgument`] if `name` is empty or already a
/// resolved identifier.
pub fn term(name: &str) -> Result<Iri> {
    namespaced("name", iris::NML, name)
}

/// Resolves `name` to a term in the non-standardized extension namespace.
///
/// # Errors
///
/// Returns [`NmlError::InvalidArgument`] if `name` is empty or already a
/// resolved identifier.
pub fn non_standardized_term(name: &str) -> Result<Iri> {
    namespaced("name", iris::NML_EXT, name)
}

fn namespaced(parameter: &'static str, namespace: &str, name: &str) -> Result<Iri> {
    if name.is_empty() {
        return Err(NmlError::invalid(parameter, name));
    }
    require_raw(parameter, name)?;
    Iri::new(format!("{namespace}{name}"))
}

fn nml_term(name: &str) -> Iri {
    Iri::from_trusted(format!("{}{}", iris::NML, name))
}

fn ext_term(name: &str) -> Iri {
    Iri::from_trusted(format!("{}{}", iris::NML_EXT, name))
}

/// Declares a vocabulary enum together with its key table.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $param:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $key:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every member of the domain, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The vocabulary key of this member.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }
        }

        impl FromStr for $name {
            type Err = NmlError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($key => Ok($name::$variant),)+
                    other => Err(NmlError::invalid($param, other)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }
    };
}

vocabulary! {
    /// Direction of a unidirectional port.
    Direction, "direction" {
        /// Traffic enters the device.
        In => "in",
        /// Traffic leaves the device.
        Out => "out",
    }
}

vocabulary! {
    /// One direction of a protocol-stacking relationship.
    AdaptationKind, "adaptation_type" {
        /// Multiplexes a client layer into a server layer.
        Adaptation => "AdaptationService",
        /// Demultiplexes a server layer back into a client layer.
        Deadaptation => "DeadaptationService",
    }
}

vocabulary! {
    /// Physical encoding of a port.
    Encoding, "encoding" {
        /// A cable duct.
        Duct => "duct",
        /// An optical fiber.
        Fiber => "fiber",
    }
}

vocabulary! {
    /// Layer transition performed by an (de)adaptation service.
    AdaptationFunction, "adaptation_function" {
        /// Ducts carry fibers.
        Duct => "duct",
        /// Fibers carry ethernet.
        Fiber => "fiber",
        /// Ethernet carries VLANs.
        Ethernet => "ethernet",
    }
}

vocabulary! {
    /// Kind of label attached to a resource.
    LabelType, "label_type" {
        /// Fiber number within a cable.
        FiberNumber => "fibernumber",
        /// 802.1Q VLAN identifier.
        Vlan => "vlan",
    }
}

vocabulary! {
    /// NML classes the builder instantiates.
    EntityClass, "class" {
        /// `nml:Node`.
        Node => "Node",
        /// `nml:Port`.
        Port => "Port",
        /// `nml:BidirectionalPort`.
        BidirectionalPort => "BidirectionalPort",
        /// `nml:Link`.
        Link => "Link",
        /// `nml:Topology`.
        Topology => "Topology",
        /// `nml:SwitchingService`.
        SwitchingService => "SwitchingService",
        /// `nml:AdaptationService`.
        AdaptationService => "AdaptationService",
        /// `nml:DeadaptationService`.
        DeadaptationService => "DeadaptationService",
        /// `nml:Label`.
        Label => "Label",
    }
}

vocabulary! {
    /// Relation keys, resolved under the NML namespace.
    Relation, "relation" {
        /// `nml:hasPort`.
        HasPort => "hasPort",
        /// `nml:hasInboundPort`.
        HasInboundPort => "hasInboundPort",
        /// `nml:hasOutboundPort`.
        HasOutboundPort => "hasOutboundPort",
        /// `nml:isSink`.
        IsSink => "isSink",
        /// `nml:isSource`.
        IsSource => "isSource",
        /// `nml:hasLabel`.
        HasLabel => "hasLabel",
        /// `nml:providesPort`.
        ProvidesPort => "providesPort",
        /// `nml:hasNode`.
        HasNode => "hasNode",
        /// `nml:hasService`.
        HasService => "hasService",
        /// `nml:hasTopology`.
        HasTopology => "hasTopology",
        /// `nml:isAlias`.
        IsAlias => "isAlias",
        /// `nml:name`.
        Name => "name",
        /// `nml:encoding`.
        Encoding => "encoding",
        /// `nml:adaptationFunction`.
        AdaptationFunction => "adaptationFunction",
        /// `nml:type`.
        Type => "type",
        /// `nml:value`.
        Value => "value",
        /// `nml:version`.
        Version => "version",
    }
}

impl Direction {
    /// The opposite direction.
    #[must_use]
    pub fn reverse(self) -> Direction {
        match self {
            Direction::In => Direction::Out,
            Direction::Out => Direction::In,
        }
    }

    fn oriented(self, reverse: bool) -> Direction {
        if reverse {
            self.reverse()
        } else {
            self
        }
    }

    /// Relation from a node to a port of this direction.
    #[must_use]
    pub fn port_relation(self, reverse: bool) -> Relation {
        match self.oriented(reverse) {
            Direction::In => Relation::HasInboundPort,
            Direction::Out => Relation::HasOutboundPort,
        }
    }

    /// Relation from a link to a port of this direction.
    #[must_use]
    pub fn link_relation(self, reverse: bool) -> Relation {
        match self.oriented(reverse) {
            Direction::In => Relation::IsSink,
            Direction::Out => Relation::IsSource,
        }
    }

    /// Adaptation service kind serving a port of this direction.
    #[must_use]
    pub fn adaptation_kind(self, reverse: bool) -> AdaptationKind {
        match self.oriented(reverse) {
            Direction::In => AdaptationKind::Deadaptation,
            Direction::Out => AdaptationKind::Adaptation,
        }
    }
}

impl AdaptationKind {
    /// The NML class of services of this kind.
    #[must_use]
    pub fn class(self) -> EntityClass {
        match self {
            AdaptationKind::Adaptation => EntityClass::AdaptationService,
            AdaptationKind::Deadaptation => EntityClass::DeadaptationService,
        }
    }
}

impl Encoding {
    /// Non-standardized term for this encoding.
    #[must_use]
    pub fn term(self) -> Iri {
        ext_term(match self {
            Encoding::Duct => "cable",
            Encoding::Fiber => "photonic",
        })
    }
}

impl AdaptationFunction {
    /// Non-standardized term for this adaptation function.
    #[must_use]
    pub fn term(self) -> Iri {
        ext_term(match self {
            AdaptationFunction::Duct => "duct#fiber",
            AdaptationFunction::Fiber => "fiber#ethernet",
            AdaptationFunction::Ethernet => "ethernet#vlan",
        })
    }
}

impl LabelType {
    /// Non-standardized term for this label type.
    #[must_use]
    pub fn term(self) -> Iri {
        ext_term(match self {
            LabelType::FiberNumber => "fiber#number",
            LabelType::Vlan => "ethernet#vlan",
        })
    }
}

impl EntityClass {
    /// Standardized term for this class.
    #[must_use]
    pub fn term(self) -> Iri {
        nml_term(self.as_str())
    }
}

impl Relation {
    /// Standardized term for this relation.
    #[must_use]
    pub fn term(self) -> Iri {
        nml_term(self.as_str())
    }
}

// String-keyed lookups. Each one parses its key first, so any key outside the
// table's domain surfaces as InvalidArgument.

/// `in -> hasInboundPort`, `out -> hasOutboundPort`, optionally reversed first.
///
/// # Errors
///
/// Returns [`NmlError::InvalidArgument`] unless `direction` is `in` or `out`.
pub fn direction_to_port_type(direction: &str, reverse: bool) -> Result<Relation> {
    Ok(direction.parse::<Direction>()?.port_relation(reverse))
}

/// `in -> isSink`, `out -> isSource`, optionally reversed first.
///
/// # Errors
///
/// Returns [`NmlError::InvalidArgument`] unless `direction` is `in` or `out`.
pub fn direction_to_link_type(direction: &str, reverse: bool) -> Result<Relation> {
    Ok(direction.parse::<Direction>()?.link_relation(reverse))
}

/// `in -> DeadaptationService`, `out -> AdaptationService`, optionally
/// reversed first.
///
/// # Errors
///
/// Returns [`NmlError::InvalidArgument`] unless `direction` is `in` or `out`.
pub fn direction_to_adaptation_type(direction: &str, reverse: bool) -> Result<AdaptationKind> {
    Ok(direction.parse::<Direction>()?.adaptation_kind(reverse))
}

/// `in <-> out`.
///
/// # Errors
///
/// Returns [`NmlError::InvalidArgument`] unless `direction` is `in` or `out`.
pub fn reverse(direction: &str) -> Result<Direction> {
    Ok(direction.parse::<Direction>()?.reverse())
}

/// `duct -> cable`, `fiber -> photonic` (non-standardized terms).
///
/// # Errors
///
/// Returns [`NmlError::InvalidArgument`] for any other key.
pub fn encoding(key: &str) -> Result<Iri> {
    Ok(key.parse::<Encoding>()?.term())
}

/// `duct -> duct#fiber`, `fiber -> fiber#ethernet`,
/// `ethernet -> ethernet#vlan` (non-standardized terms).
///
/// # Errors
///
/// Returns [`NmlError::InvalidArgument`] for any other key.
pub fn adaptation_function(key: &str) -> Result<Iri> {
    Ok(key.parse::<AdaptationFunction>()?.term())
}

/// `fibernumber -> fiber#number`, `vlan -> ethernet#vlan`
/// (non-standardized terms).
///
/// # Errors
///
/// Returns [`NmlError::InvalidArgument`] for any other key.
pub fn label_type(key: &str) -> Result<Iri> {
    Ok(key.parse::<LabelType>()?.term())
}

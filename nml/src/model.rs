//! Core identifier and term types.
//!
//! A topology document is nothing but typed identifiers related to each
//! other and to literal values. The distinction between a raw name supplied
//! by a caller and an identifier that has already been resolved (minted URN
//! or ontology term) is carried by the types in this module:
//!
//! - [`Iri`]: a resolved identifier.
//! - [`Literal`]: a lexical value with an optional datatype.
//! - [`Object`]: whatever may sit in the object position of a triple.
//! - [`Identifier`]: either a raw name or a resolved identifier, accepted
//!   where both are meaningful (a port's device, for instance).

use std::fmt;

use crate::error::{NmlError, Result};

/// Returns true if `value` already looks like a resolved identifier rather
/// than a raw name: it starts with `urn:` or contains `://`.
///
/// Every raw-name parameter in this crate is refused when this returns true,
/// so names such as `http://router` cannot be used as device or port names;
/// pass them through [`Iri`] or rename them.
#[must_use]
pub fn is_resolved(value: &str) -> bool {
    value.starts_with("urn:") || value.contains("://")
}

/// Rejects `value` for `parameter` when it is already a resolved identifier.
pub(crate) fn require_raw(parameter: &'static str, value: &str) -> Result<()> {
    if is_resolved(value) {
        return Err(NmlError::invalid(parameter, value));
    }
    Ok(())
}

/// A resolved identifier: a minted URN or a fully qualified ontology term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iri(String);

impl Iri {
    /// Wraps `value` after checking that it is an absolute identifier.
    ///
    /// # Errors
    ///
    /// Returns [`NmlError::InvalidArgument`] if `value` has no scheme, an
    /// empty scheme, or contains characters that cannot appear in an IRI
    /// (whitespace, `<`, `>`, `"`).
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let scheme_ok = match value.split_once(':') {
            Some((scheme, rest)) => {
                !rest.is_empty()
                    && scheme
                        .chars()
                        .next()
                        .is_some_and(|c| c.is_ascii_alphabetic())
                    && scheme
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
            }
            None => false,
        };
        let chars_ok = !value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '"'));
        if scheme_ok && chars_ok {
            Ok(Iri(value))
        } else {
            Err(NmlError::invalid("iri", value))
        }
    }

    /// Wraps a string the caller has built from validated parts.
    pub(crate) fn from_trusted(value: String) -> Self {
        Iri(value)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier and returns the owned string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns the final `:`-delimited segment.
    #[must_use]
    pub fn last_segment(&self) -> &str {
        self.0.rsplit(':').next().unwrap_or(&self.0)
    }

    /// Splits the identifier into namespace and local name at the last
    /// `#` or `/`. Returns `None` when there is no such separator.
    #[must_use]
    pub fn split_namespace(&self) -> Option<(&str, &str)> {
        let idx = self.0.rfind(['#', '/'])?;
        Some((&self.0[..=idx], &self.0[idx + 1..]))
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A literal value: lexical form plus an optional datatype.
///
/// Strings convert to plain literals; integers convert to `xsd:integer`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    lexical: String,
    datatype: Option<Iri>,
}

impl Literal {
    /// A plain literal without datatype.
    pub fn plain(lexical: impl Into<String>) -> Self {
        Literal {
            lexical: lexical.into(),
            datatype: None,
        }
    }

    /// A literal with an explicit datatype.
    pub fn typed(lexical: impl Into<String>, datatype: Iri) -> Self {
        Literal {
            lexical: lexical.into(),
            datatype: Some(datatype),
        }
    }

    /// The lexical form.
    #[must_use]
    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    /// The datatype, if any.
    #[must_use]
    pub fn datatype(&self) -> Option<&Iri> {
        self.datatype.as_ref()
    }

    fn integer(value: impl ToString) -> Self {
        Literal::typed(
            value.to_string(),
            Iri::from_trusted(iris::XSD_INTEGER.to_owned()),
        )
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexical)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::plain(value)
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::plain(value)
    }
}

impl From<&String> for Literal {
    fn from(value: &String) -> Self {
        Literal::plain(value.as_str())
    }
}

macro_rules! integer_literal {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Literal {
                fn from(value: $ty) -> Self {
                    Literal::integer(value)
                }
            }
        )*
    };
}

integer_literal!(i32, i64, u16, u32, u64, usize);

/// The object position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Object {
    /// A resolved identifier.
    Iri(Iri),
    /// A literal value.
    Literal(Literal),
}

impl Object {
    /// Returns the identifier when the object is one.
    #[must_use]
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Object::Iri(iri) => Some(iri),
            Object::Literal(_) => None,
        }
    }

    /// Returns the literal when the object is one.
    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Object::Iri(_) => None,
            Object::Literal(lit) => Some(lit),
        }
    }
}

impl From<Iri> for Object {
    fn from(value: Iri) -> Self {
        Object::Iri(value)
    }
}

impl From<&Iri> for Object {
    fn from(value: &Iri) -> Self {
        Object::Iri(value.clone())
    }
}

impl From<Literal> for Object {
    fn from(value: Literal) -> Self {
        Object::Literal(value)
    }
}

impl From<&str> for Object {
    fn from(value: &str) -> Self {
        Object::Literal(Literal::plain(value))
    }
}

impl From<String> for Object {
    fn from(value: String) -> Self {
        Object::Literal(Literal::plain(value))
    }
}

/// A raw name or a resolved identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// A plain name chosen by the caller (e.g. `"switch1"`).
    Name(String),
    /// A previously minted identifier (e.g. a Node URN).
    Iri(Iri),
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Identifier::Name(value.to_owned())
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Identifier::Name(value)
    }
}

impl From<Iri> for Identifier {
    fn from(value: Iri) -> Self {
        Identifier::Iri(value)
    }
}

impl From<&Iri> for Identifier {
    fn from(value: &Iri) -> Self {
        Identifier::Iri(value.clone())
    }
}

/// Fixed namespace and term IRIs.
pub mod iris {
    /// Root authority of every minted URN.
    pub const URN_ROOT: &str = "urn:ogf:network";
    /// Standardized NML base namespace.
    pub const NML: &str = "http://schemas.ogf.org/nml/2013/05/base#";
    /// Namespace for terms NML has not standardized.
    pub const NML_EXT: &str = "https://rtsn.nl/thesis/nml/";
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// XSD namespace.
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

    /// `rdf:type`.
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `xsd:integer`.
    pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    /// `xsd:string`.
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iri_requires_scheme() {
        assert!(Iri::new("urn:ogf:network:x").is_ok());
        assert!(Iri::new("http://schemas.ogf.org/nml/2013/05/base#Node").is_ok());
        assert!(Iri::new("switch1").is_err());
        assert!(Iri::new(":nothing").is_err());
        assert!(Iri::new("urn:has space").is_err());
    }

    #[test]
    fn last_segment_and_namespace_split() {
        let iri = Iri::new("urn:ogf:network:example:2026:switch1:1:in").unwrap();
        assert_eq!(iri.last_segment(), "in");

        let term = Iri::new("http://schemas.ogf.org/nml/2013/05/base#hasPort").unwrap();
        assert_eq!(
            term.split_namespace(),
            Some(("http://schemas.ogf.org/nml/2013/05/base#", "hasPort"))
        );
    }

    #[test]
    fn integers_become_typed_literals() {
        let lit = Literal::from(100);
        assert_eq!(lit.lexical(), "100");
        assert_eq!(lit.datatype().map(Iri::as_str), Some(iris::XSD_INTEGER));
        assert_eq!(Literal::from("100").datatype(), None);
        assert_ne!(Literal::from(100), Literal::from("100"));
    }

    #[test]
    fn resolved_detection() {
        assert!(is_resolved("urn:ogf:network:x"));
        assert!(is_resolved("https://rtsn.nl/thesis/nml/cable"));
        assert!(!is_resolved("switch1"));
        assert!(!is_resolved("eth0/1"));
    }
}

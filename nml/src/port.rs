//! Port URN decomposition.

use crate::error::{NmlError, Result};
use crate::model::Iri;

/// Splits a port URN into its base URN and its final segment.
///
/// For URNs produced by [`crate::urn::UrnAuthority::mint_port`] with a
/// direction, the final segment is the direction (`in` or `out`) and the
/// base is shared by both directional variants of the same physical port.
///
/// # Errors
///
/// Returns [`NmlError::InvalidArgument`] if the URN has no segment after
/// its scheme to split off.
pub fn split_port(port: &Iri) -> Result<(Iri, String)> {
    match port.as_str().rsplit_once(':') {
        Some((base, direction)) if base.contains(':') => {
            Ok((Iri::new(base)?, direction.to_owned()))
        }
        _ => Err(NmlError::invalid("port", port.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_direction_segment() {
        let port = Iri::new("urn:ogf:network:example:2026:switch1:1:out").unwrap();
        let (base, direction) = split_port(&port).unwrap();
        assert_eq!(base.as_str(), "urn:ogf:network:example:2026:switch1:1");
        assert_eq!(direction, "out");
    }

    #[test]
    fn scheme_only_is_rejected() {
        let iri = Iri::new("urn:x").unwrap();
        assert!(split_port(&iri).is_err());
    }
}

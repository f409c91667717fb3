//! Error type shared by every builder operation.

use thiserror::Error;

/// Failures raised by the topology builder.
///
/// Every caller-side mistake (a resolved identifier where a raw name was
/// expected, too many URN segments, a vocabulary key outside its domain)
/// is reported as [`NmlError::InvalidArgument`]. None of them are retried
/// or recovered from inside the crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NmlError {
    /// A precondition on one parameter was violated.
    #[error("invalid argument `{parameter}`: {value:?}")]
    InvalidArgument {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The value that was rejected.
        value: String,
    },

    /// The graph could not be written in the requested format.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A topology description could not be parsed.
    #[error("invalid topology description: {0}")]
    Description(String),
}

impl NmlError {
    /// Shorthand for [`NmlError::InvalidArgument`].
    pub fn invalid(parameter: &'static str, value: impl Into<String>) -> Self {
        NmlError::InvalidArgument {
            parameter,
            value: value.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NmlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_names_parameter_and_value() {
        let err = NmlError::invalid("direction", "sideways");
        assert_eq!(
            err.to_string(),
            "invalid argument `direction`: \"sideways\""
        );
    }
}

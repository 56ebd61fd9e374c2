//! Error types for nas-props

use std::num::ParseIntError;

/// Result type for nas-props operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while translating dataset properties
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The wire carried a non-numeric string where a number was expected
    #[error("Failed to parse {field} value {value:?} as a number: {source}")]
    NumericParse {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A configured value is outside the property's vocabulary or range
    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// A configured value has the wrong kind (text, integer, boolean)
    #[error("{field} expects {expected}, got {actual}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    /// A computed property was given a desired value
    #[error("{field} is computed by the remote side and cannot be configured")]
    NotSettable { field: &'static str },

    /// Two mutually exclusive properties were both configured
    #[error("{field} conflicts with {other}")]
    Conflict {
        field: &'static str,
        other: &'static str,
    },

    /// A wire property had a JSON shape the translator does not understand
    #[error("Unexpected wire shape for {field}: {shape}")]
    UnexpectedShape { field: String, shape: String },

    /// The dataset identity could not be decoded or built
    #[error(transparent)]
    Path(#[from] nas_path::Error),
}

impl Error {
    /// Name of the property the error relates to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::NumericParse { field, .. }
            | Self::InvalidValue { field, .. }
            | Self::TypeMismatch { field, .. }
            | Self::NotSettable { field }
            | Self::Conflict { field, .. } => Some(*field),
            Self::UnexpectedShape { field, .. } => Some(field.as_str()),
            Self::Path(_) => None,
        }
    }
}

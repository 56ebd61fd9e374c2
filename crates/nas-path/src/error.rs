//! Error types for nas-path

/// Result type for nas-path operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding or building a dataset identity
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The identity string (or one of its parts) is not a valid dataset path
    #[error("Malformed dataset identity {input:?}: {reason}")]
    MalformedIdentity { input: String, reason: String },
}

impl Error {
    pub fn malformed(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedIdentity {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

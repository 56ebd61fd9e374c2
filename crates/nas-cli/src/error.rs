//! Error types for nas-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from nas-core
    #[error(transparent)]
    Core(#[from] nas_core::Error),

    /// JSON output could not be rendered
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// `check` found datasets that do not match the manifest
    #[error("{count} dataset(s) out of sync with the manifest")]
    Drift { count: usize },
}

impl From<nas_path::Error> for CliError {
    fn from(error: nas_path::Error) -> Self {
        Self::Core(error.into())
    }
}

//! Error types for nas-core

use std::path::PathBuf;

use crate::store::StoreError;

/// Result type for nas-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in nas-core operations
///
/// Every remote failure names the operation and the dataset identity it
/// was attempted on; none are retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A dataset identity string or its parts could not be decoded
    #[error(transparent)]
    MalformedIdentity(#[from] nas_path::Error),

    /// The desired configuration failed validation before any remote call
    #[error("Invalid configuration for {id}: {source}")]
    InvalidConfiguration {
        id: String,
        #[source]
        source: nas_props::Error,
    },

    /// The store rejected or failed a create call
    #[error("Failed to create dataset {id}: {source}")]
    RemoteCreate {
        id: String,
        #[source]
        source: StoreError,
    },

    /// The store reports no such dataset
    #[error("Dataset not found: {id}")]
    RemoteNotFound { id: String },

    /// Fetching or translating a record failed
    #[error("Failed to read dataset {id}: {source}")]
    RemoteRead {
        id: String,
        #[source]
        source: ReadFailure,
    },

    /// The store rejected or failed a destroy call
    #[error("Failed to delete dataset {id}: {source}")]
    RemoteDelete {
        id: String,
        #[source]
        source: StoreError,
    },

    /// Two manifest entries resolve to the same dataset
    #[error("Dataset {id} is declared more than once")]
    DuplicateDataset { id: String },

    /// Manifest could not be read
    #[error("Failed to read manifest at {path}: {source}")]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

/// Why a read failed, other than the dataset being absent
#[derive(Debug, thiserror::Error)]
pub enum ReadFailure {
    /// The store call itself failed
    #[error(transparent)]
    Store(StoreError),

    /// The record was fetched but could not be translated
    #[error(transparent)]
    Translation(nas_props::Error),
}

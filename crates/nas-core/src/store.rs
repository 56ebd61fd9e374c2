//! DatasetStore trait and related types
//!
//! The store is the client of the remote management API. Transport,
//! authentication and any retry policy live behind this trait.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use nas_props::{WireCreateRequest, WireRecord};

/// Result type for store calls
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failures reported by a [`DatasetStore`]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Dataset not found: {id}")]
    NotFound { id: String },

    /// The remote side refused the request (duplicate, children present, ...)
    #[error("Request for {id} rejected: {reason}")]
    Rejected { id: String, reason: String },

    #[error("Remote operation failed: {message}")]
    Transport { message: String },

    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid store data at {path}: {message}")]
    Corrupt { path: PathBuf, message: String },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Client for the remote dataset API.
///
/// Each method is one round trip. Dropping the returned future cancels the
/// call; no rollback is attempted beyond what the remote side guarantees.
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// Create a dataset and return its record as stored remotely
    async fn create(&self, request: &WireCreateRequest) -> StoreResult<WireRecord>;

    /// Fetch the current record for an identity string
    async fn get(&self, id: &str) -> StoreResult<WireRecord>;

    /// Destroy a dataset; children are not removed
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

#[async_trait]
impl<S: DatasetStore + ?Sized> DatasetStore for Arc<S> {
    async fn create(&self, request: &WireCreateRequest) -> StoreResult<WireRecord> {
        (**self).create(request).await
    }

    async fn get(&self, id: &str) -> StoreResult<WireRecord> {
        (**self).get(id).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        (**self).delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = StoreError::Timeout {
            operation: "create",
            after: Duration::from_secs(240),
        };
        assert_eq!(err.to_string(), "create timed out after 240s");
    }

    #[test]
    fn test_is_not_found() {
        assert!(StoreError::NotFound { id: "tank/a".into() }.is_not_found());
        assert!(!StoreError::Transport { message: "boom".into() }.is_not_found());
    }
}

//! ReconciliationEngine implementation
//!
//! The engine moves one dataset through
//! `Absent -> Creating -> Present -> Updating -> Present -> Deleting -> Absent`
//! without holding any state between calls. Each operation is a single
//! round trip to the store (Create adds a follow-up read).

use std::future::Future;
use std::time::Duration;

use nas_props::{
    DesiredConfiguration, ReconciledConfiguration, from_wire_record, to_wire_create_request,
};
use serde::Serialize;

use crate::check::{DriftReport, check};
use crate::config::EngineConfig;
use crate::error::{Error, ReadFailure, Result};
use crate::plan::{PlanAction, plan};
use crate::store::{DatasetStore, StoreError, StoreResult};

/// Outcome of reconciling one dataset
#[derive(Debug, Clone, Serialize)]
pub struct Reconciliation {
    /// The action that was taken
    pub action: PlanAction,
    /// State read back after the action
    pub state: ReconciledConfiguration,
}

/// Engine for reconciling datasets against a remote store
///
/// Provides the four lifecycle operations plus planning helpers:
/// - **create**: send a create request, then read back every computed field
/// - **read**: fetch and translate the current record
/// - **update**: re-read only; mutable properties are never pushed
/// - **delete**: destroy the dataset, without touching its children
pub struct ReconciliationEngine<S> {
    store: S,
    config: EngineConfig,
}

impl<S: DatasetStore> ReconciliationEngine<S> {
    /// Create an engine with default timeouts
    pub fn new(store: S) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    pub fn with_config(store: S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Create a dataset of type filesystem.
    ///
    /// The identity returned by the store becomes canonical, and the result
    /// is read back from the store rather than derived from the request.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedIdentity`] / [`Error::InvalidConfiguration`]
    ///   before anything is sent
    /// - [`Error::RemoteCreate`] when the store call fails
    /// - any error of [`read`](Self::read) for the follow-up read
    pub async fn create(&self, desired: &DesiredConfiguration) -> Result<ReconciledConfiguration> {
        let id = desired.identity()?.to_string();
        let request = to_wire_create_request(desired).map_err(|source| {
            Error::InvalidConfiguration {
                id: id.clone(),
                source,
            }
        })?;

        tracing::debug!(%id, ?request, "Creating dataset");

        let record = timed(
            "create",
            self.config.create_timeout(),
            self.store.create(&request),
        )
        .await
        .map_err(|source| Error::RemoteCreate { id, source })?;

        tracing::info!(id = %record.id, "Dataset created");

        self.read(&record.id).await
    }

    /// Fetch and translate the current state of a dataset.
    ///
    /// The identity fields come from the record's own id, so normalization
    /// by the remote side is reflected in the result.
    ///
    /// # Errors
    ///
    /// - [`Error::RemoteNotFound`] when the store has no such dataset; the
    ///   caller should stop tracking it
    /// - [`Error::RemoteRead`] for any other store or translation failure
    pub async fn read(&self, id: &str) -> Result<ReconciledConfiguration> {
        nas_path::decode(id)?;

        let record = timed("read", self.config.read_timeout(), self.store.get(id))
            .await
            .map_err(|source| match source {
                StoreError::NotFound { .. } => Error::RemoteNotFound { id: id.to_string() },
                other => Error::RemoteRead {
                    id: id.to_string(),
                    source: ReadFailure::Store(other),
                },
            })?;

        from_wire_record(&record).map_err(|source| Error::RemoteRead {
            id: id.to_string(),
            source: ReadFailure::Translation(source),
        })
    }

    /// Re-read a dataset, keeping prior values for properties the remote
    /// no longer reports.
    pub async fn refresh(&self, prior: &ReconciledConfiguration) -> Result<ReconciledConfiguration> {
        let fresh = self.read(&prior.id).await?;
        Ok(fresh.overlay(prior))
    }

    /// Update a dataset.
    ///
    /// No property is written: this is a read that logs whatever drift it
    /// finds. Changing a property on the remote side is not supported.
    pub async fn update(
        &self,
        id: &str,
        desired: &DesiredConfiguration,
    ) -> Result<ReconciledConfiguration> {
        let state = self.read(id).await?;

        match check(desired, Some(&state)) {
            Ok(report) => {
                for item in &report.drifted {
                    tracing::warn!(%id, drift = %item.describe(), "Drift will not be corrected");
                }
            }
            Err(e) => tracing::warn!(%id, error = %e, "Could not compare desired state"),
        }

        Ok(state)
    }

    /// Destroy a dataset.
    ///
    /// # Errors
    ///
    /// [`Error::RemoteDelete`] on any store failure, including a missing
    /// dataset or one that still has children.
    pub async fn delete(&self, id: &str) -> Result<()> {
        nas_path::decode(id)?;

        tracing::debug!(%id, "Deleting dataset");

        timed("delete", self.config.delete_timeout(), self.store.delete(id))
            .await
            .map_err(|source| Error::RemoteDelete {
                id: id.to_string(),
                source,
            })?;

        tracing::info!(%id, "Dataset deleted");
        Ok(())
    }

    /// Read a tracked dataset, mapping "not found" to `None`.
    pub async fn lookup(&self, id: &str) -> Result<Option<ReconciledConfiguration>> {
        match self.read(id).await {
            Ok(state) => Ok(Some(state)),
            Err(Error::RemoteNotFound { .. }) => {
                tracing::warn!(%id, "Dataset removed out of band");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Compare a desired configuration with the remote state.
    ///
    /// `tracked` is the identity recorded from an earlier run; when `None`
    /// the identity of `desired` is used.
    pub async fn check(
        &self,
        desired: &DesiredConfiguration,
        tracked: Option<&str>,
    ) -> Result<DriftReport> {
        let id = match tracked {
            Some(id) => id.to_string(),
            None => desired.identity()?.to_string(),
        };
        let current = self.lookup(&id).await?;

        check(desired, current.as_ref())
            .map_err(|source| Error::InvalidConfiguration { id, source })
    }

    /// Bring one dataset to its desired state.
    ///
    /// Reads the tracked dataset (treating "not found" as absent), plans,
    /// and then creates, replaces (delete then create), updates or leaves
    /// the dataset alone.
    pub async fn reconcile(
        &self,
        desired: &DesiredConfiguration,
        tracked: Option<&str>,
    ) -> Result<Reconciliation> {
        let current = match tracked {
            Some(id) => self.lookup(id).await?,
            None => None,
        };

        let planned = plan(desired, current.as_ref()).map_err(|source| {
            Error::InvalidConfiguration {
                id: tracked.unwrap_or_default().to_string(),
                source,
            }
        })?;

        tracing::debug!(id = %planned.id, action = ?planned.action, "Planned reconciliation");

        let state = match (&planned.action, current) {
            (PlanAction::Replace { reasons }, Some(current)) => {
                tracing::info!(id = %current.id, ?reasons, "Replacing dataset");
                self.delete(&current.id).await?;
                self.create(desired).await?
            }
            (PlanAction::Update { .. }, Some(current)) => self.update(&current.id, desired).await?,
            (PlanAction::NoChange, Some(current)) => current,
            _ => self.create(desired).await?,
        };

        Ok(Reconciliation {
            action: planned.action,
            state,
        })
    }
}

/// Bound a store call by a time limit.
async fn timed<T, F>(operation: &'static str, limit: Duration, call: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout {
            operation,
            after: limit,
        }),
    }
}

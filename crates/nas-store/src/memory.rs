//! In-process emulated store

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use nas_core::{DatasetStore, StoreError, StoreResult};
use nas_props::{WireCreateRequest, WireRecord};

use crate::datasets::Datasets;

/// Emulated appliance that keeps its datasets in memory.
///
/// Cloning the engine's store handle (e.g. `Arc<MemoryStore>`) shares the
/// same table.
#[derive(Debug, Default)]
pub struct MemoryStore {
    datasets: Mutex<Datasets>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing table
    pub fn with_datasets(datasets: Datasets) -> Self {
        Self {
            datasets: Mutex::new(datasets),
        }
    }

    /// Copy of the current table
    pub fn snapshot(&self) -> StoreResult<Datasets> {
        Ok(self.lock()?.clone())
    }

    /// Insert a record verbatim, bypassing the create rules.
    pub fn insert(&self, record: WireRecord) -> StoreResult<()> {
        self.lock()?.insert(record);
        Ok(())
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Datasets>> {
        self.datasets.lock().map_err(|_| StoreError::Transport {
            message: "memory store lock poisoned".to_string(),
        })
    }
}

#[async_trait]
impl DatasetStore for MemoryStore {
    async fn create(&self, request: &WireCreateRequest) -> StoreResult<WireRecord> {
        let record = self.lock()?.create(request)?;
        tracing::debug!(id = %record.id, "Emulated create");
        Ok(record)
    }

    async fn get(&self, id: &str) -> StoreResult<WireRecord> {
        self.lock()?.get(id)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.lock()?.delete(id)?;
        tracing::debug!(%id, "Emulated delete");
        Ok(())
    }
}

//! File-backed emulated store
//!
//! The whole dataset table is stored as one JSON document. Each call loads
//! it under a lock, applies the operation and, for writes, saves it back
//! with a write-to-temp-then-rename so a crash never leaves a torn file.

use std::fs::{self, File, OpenOptions};
use std::io::Read;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use nas_core::{DatasetStore, StoreError, StoreResult};
use nas_props::{WireCreateRequest, WireRecord};

use crate::datasets::Datasets;

/// Emulated appliance persisted to a JSON file.
///
/// A missing file is an empty appliance. Locking uses a sidecar
/// `<file>.lock` so the lock outlives the rename of the data file.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the current table under a shared lock.
    pub fn load(&self) -> StoreResult<Datasets> {
        let lock = self.open_lock()?;
        lock.lock_shared()
            .map_err(|e| StoreError::io(self.lock_path(), e))?;

        // Lock released when `lock` is dropped
        self.read_table()
    }

    /// Apply `operation` to the table under an exclusive lock and save the
    /// result if it succeeds.
    pub fn modify<T>(
        &self,
        operation: impl FnOnce(&mut Datasets) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let lock = self.open_lock()?;
        lock.lock_exclusive()
            .map_err(|e| StoreError::io(self.lock_path(), e))?;

        let mut table = self.read_table()?;
        let output = operation(&mut table)?;
        self.write_table(&table)?;
        Ok(output)
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    fn open_lock(&self) -> StoreResult<File> {
        let path = self.lock_path();
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| StoreError::io(path, e))
    }

    fn read_table(&self) -> StoreResult<Datasets> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Datasets::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| StoreError::io(&self.path, e))?;
        if content.trim().is_empty() {
            return Ok(Datasets::new());
        }

        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn write_table(&self, table: &Datasets) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(table).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content).map_err(|e| StoreError::io(&temp_path, e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }
}

#[async_trait]
impl DatasetStore for SnapshotStore {
    async fn create(&self, request: &WireCreateRequest) -> StoreResult<WireRecord> {
        let record = self.modify(|table| table.create(request))?;
        tracing::debug!(id = %record.id, path = %self.path.display(), "Saved created dataset");
        Ok(record)
    }

    async fn get(&self, id: &str) -> StoreResult<WireRecord> {
        self.load()?.get(id)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.modify(|table| table.delete(id))?;
        tracing::debug!(%id, path = %self.path.display(), "Saved dataset removal");
        Ok(())
    }
}

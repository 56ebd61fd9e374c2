//! Paths and engine construction shared by every command

use std::path::{Path, PathBuf};

use nas_core::{EngineConfig, Manifest, ReconciliationEngine};
use nas_store::SnapshotStore;

use crate::error::Result;

/// Where a command finds its manifest and appliance state
#[derive(Debug, Clone)]
pub struct Context {
    manifest_path: PathBuf,
    state_path: PathBuf,
}

impl Context {
    pub fn new(manifest_path: impl Into<PathBuf>, state_path: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            state_path: state_path.into(),
        }
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    /// Load and validate the manifest
    pub fn manifest(&self) -> Result<Manifest> {
        Ok(Manifest::load(&self.manifest_path)?)
    }

    /// Engine settings from the manifest when one exists, defaults otherwise.
    ///
    /// Used by commands that address a single dataset by id and do not
    /// need the manifest to be present.
    pub fn engine_config(&self) -> Result<EngineConfig> {
        if self.manifest_path.exists() {
            Ok(self.manifest()?.engine)
        } else {
            Ok(EngineConfig::default())
        }
    }

    pub fn engine(&self, config: EngineConfig) -> ReconciliationEngine<SnapshotStore> {
        tracing::debug!(state = %self.state_path.display(), "Opening snapshot store");
        ReconciliationEngine::with_config(SnapshotStore::new(&self.state_path), config)
    }
}

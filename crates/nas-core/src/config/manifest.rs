//! Manifest parsing for dataset declaration files
//!
//! A manifest lists the datasets that should exist, each as a table of its
//! identity parts and configured properties.

use std::collections::HashSet;
use std::path::Path;

use nas_props::{DesiredConfiguration, validate_desired};
use serde::{Deserialize, Serialize};

use super::EngineConfig;
use crate::{Error, Result};

/// Desired datasets parsed from a TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Engine settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// Datasets in declaration order, from `[[dataset]]` tables
    #[serde(default, rename = "dataset")]
    pub datasets: Vec<DesiredConfiguration>,
}

impl Manifest {
    /// Parse a manifest from TOML content
    ///
    /// # Example
    ///
    /// ```
    /// use nas_core::config::Manifest;
    ///
    /// let manifest = Manifest::parse(r#"
    /// [engine]
    /// create_timeout = 60
    ///
    /// [[dataset]]
    /// pool = "tank"
    /// name = "media"
    /// compression = "lz4"
    /// "#).unwrap();
    ///
    /// assert_eq!(manifest.datasets.len(), 1);
    /// assert_eq!(manifest.engine.create_timeout, 60);
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Read and parse a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ManifestIo {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(?path, "Loading dataset manifest");
        Self::parse(&content)
    }

    /// Check every dataset and reject duplicate identities
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for desired in &self.datasets {
            let id = desired.identity()?.to_string();
            validate_desired(desired).map_err(|source| Error::InvalidConfiguration {
                id: id.clone(),
                source,
            })?;
            if !seen.insert(id.clone()) {
                return Err(Error::DuplicateDataset { id });
            }
        }
        Ok(())
    }

    /// Find a declared dataset by its identity string
    pub fn find(&self, id: &str) -> Option<&DesiredConfiguration> {
        self.datasets
            .iter()
            .find(|d| d.identity().map(|i| i.to_string() == id).unwrap_or(false))
    }
}

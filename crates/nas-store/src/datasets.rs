//! Dataset table shared by the emulated stores

use std::collections::BTreeMap;

use nas_core::{StoreError, StoreResult};
use nas_props::{WireCreateRequest, WireRecord};
use serde::{Deserialize, Serialize};

use crate::record::synthesize;

/// Every dataset known to an emulated appliance, keyed by identity string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Datasets {
    #[serde(default)]
    datasets: BTreeMap<String, WireRecord>,
}

impl Datasets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }

    /// Create a dataset, refusing duplicates and missing parents.
    pub fn create(&mut self, request: &WireCreateRequest) -> StoreResult<WireRecord> {
        let identity = nas_path::decode(&request.name).map_err(|e| StoreError::Rejected {
            id: request.name.clone(),
            reason: e.to_string(),
        })?;
        let id = identity.to_string();

        if self.datasets.contains_key(&id) {
            return Err(StoreError::Rejected {
                id,
                reason: "dataset already exists".to_string(),
            });
        }

        let parent = match identity.parent_identity() {
            Some(parent) => {
                let parent_id = parent.to_string();
                match self.datasets.get(&parent_id) {
                    Some(record) => Some(record),
                    None => {
                        return Err(StoreError::Rejected {
                            id,
                            reason: format!("parent dataset {} does not exist", parent_id),
                        });
                    }
                }
            }
            None => None,
        };

        let record = synthesize(request, parent)?;
        self.datasets.insert(id, record.clone());
        Ok(record)
    }

    pub fn get(&self, id: &str) -> StoreResult<WireRecord> {
        self.datasets
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    /// Destroy a dataset that has no children.
    pub fn delete(&mut self, id: &str) -> StoreResult<()> {
        if !self.datasets.contains_key(id) {
            return Err(StoreError::NotFound { id: id.to_string() });
        }

        let identity = nas_path::decode(id).map_err(|e| StoreError::Rejected {
            id: id.to_string(),
            reason: e.to_string(),
        })?;
        let has_children = self
            .datasets
            .keys()
            .filter_map(|other| nas_path::decode(other).ok())
            .any(|other| identity.is_ancestor_of(&other));
        if has_children {
            return Err(StoreError::Rejected {
                id: id.to_string(),
                reason: "dataset has children".to_string(),
            });
        }

        self.datasets.remove(id);
        Ok(())
    }

    /// Insert a record verbatim, replacing any existing one.
    ///
    /// Useful for seeding state the appliance would not produce itself.
    pub fn insert(&mut self, record: WireRecord) {
        self.datasets.insert(record.id.clone(), record);
    }
}

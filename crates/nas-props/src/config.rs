//! Desired and reconciled dataset configuration

use std::collections::BTreeMap;

use nas_path::DatasetIdentity;
use serde::{Deserialize, Serialize};

use crate::property::{FieldValue, Property};

/// The properties a caller wants applied to one dataset.
///
/// A property is "configured" exactly when it is present in `properties`;
/// anything left out is omitted from create requests so the remote side
/// applies its own default or inherited value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredConfiguration {
    pub pool: String,
    #[serde(default)]
    pub parent: String,
    pub name: String,
    #[serde(flatten)]
    pub properties: BTreeMap<Property, FieldValue>,
}

impl DesiredConfiguration {
    pub fn new(pool: impl Into<String>, parent: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            pool: pool.into(),
            parent: parent.into(),
            name: name.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Builder-style setter
    pub fn with(mut self, property: Property, value: impl Into<FieldValue>) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: Property, value: impl Into<FieldValue>) {
        self.properties.insert(property, value.into());
    }

    pub fn get(&self, property: Property) -> Option<&FieldValue> {
        self.properties.get(&property)
    }

    pub fn is_configured(&self, property: Property) -> bool {
        self.properties.contains_key(&property)
    }

    /// Identity built from `pool`, `parent` and `name`
    pub fn identity(&self) -> nas_path::Result<DatasetIdentity> {
        DatasetIdentity::new(&self.pool, &self.parent, &self.name)
    }
}

/// Dataset state as read back from the remote side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciledConfiguration {
    /// Identity string exactly as the remote reported it
    pub id: String,
    /// Decoded from `id`, never from the identity that was requested
    #[serde(skip)]
    pub identity: DatasetIdentity,
    pub pool: String,
    pub parent: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_root: Option<String>,
    pub encrypted: bool,
    pub key_loaded: bool,
    #[serde(flatten)]
    pub properties: BTreeMap<Property, FieldValue>,
}

impl ReconciledConfiguration {
    /// Start a reconciled state from a decoded identity
    pub fn new(id: impl Into<String>, identity: DatasetIdentity) -> Self {
        Self {
            id: id.into(),
            pool: identity.pool().to_string(),
            parent: identity.parent().to_string(),
            name: identity.name().to_string(),
            identity,
            mount_point: None,
            encryption_root: None,
            encrypted: false,
            key_loaded: false,
            properties: BTreeMap::new(),
        }
    }

    pub fn get(&self, property: Property) -> Option<&FieldValue> {
        self.properties.get(&property)
    }

    pub fn text(&self, property: Property) -> Option<&str> {
        self.get(property).and_then(FieldValue::as_text)
    }

    pub fn integer(&self, property: Property) -> Option<i64> {
        self.get(property).and_then(FieldValue::as_integer)
    }

    /// Layer this freshly read state over a prior one.
    ///
    /// Properties the remote did not report this time keep their prior
    /// value; everything reported replaces it.
    pub fn overlay(mut self, prior: &ReconciledConfiguration) -> Self {
        for (property, value) in &prior.properties {
            self.properties
                .entry(*property)
                .or_insert_with(|| value.clone());
        }
        if self.mount_point.is_none() {
            self.mount_point = prior.mount_point.clone();
        }
        if self.encryption_root.is_none() {
            self.encryption_root = prior.encryption_root.clone();
        }
        self
    }
}

//! Drift detection between desired and reconciled configuration
//!
//! Update never pushes property changes to the remote side, so drift on
//! mutable properties is only ever reported, through the types here.

use nas_props::{
    DesiredConfiguration, FieldValue, Property, ReconciledConfiguration, expected_value,
};
use serde::Serialize;

/// Overall result of a drift check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DriftStatus {
    /// Every configured property matches the remote state
    Healthy,
    /// The dataset does not exist remotely
    Missing,
    /// At least one configured property differs
    Drifted,
}

/// A configured property whose remote value differs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriftItem {
    pub property: Property,
    /// Desired value, normalized the way the remote would report it
    pub desired: FieldValue,
    /// Reported value, `None` when the remote does not report the property
    pub actual: Option<FieldValue>,
}

impl DriftItem {
    /// Human-readable description of the drift
    pub fn describe(&self) -> String {
        match &self.actual {
            Some(actual) => format!(
                "{}: expected {}, found {}",
                self.property, self.desired, actual
            ),
            None => format!("{}: expected {}, not reported", self.property, self.desired),
        }
    }
}

/// Report from a drift check of one dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriftReport {
    pub id: String,
    pub status: DriftStatus,
    pub drifted: Vec<DriftItem>,
}

impl DriftReport {
    pub fn healthy(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: DriftStatus::Healthy,
            drifted: Vec::new(),
        }
    }

    pub fn missing(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: DriftStatus::Missing,
            drifted: Vec::new(),
        }
    }

    pub fn with_drifted(id: impl Into<String>, drifted: Vec<DriftItem>) -> Self {
        let status = if drifted.is_empty() {
            DriftStatus::Healthy
        } else {
            DriftStatus::Drifted
        };
        Self {
            id: id.into(),
            status,
            drifted,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == DriftStatus::Healthy
    }
}

/// Compare every configured property with the reconciled state.
///
/// Properties the caller did not configure are never reported as drift.
pub fn check(
    desired: &DesiredConfiguration,
    current: Option<&ReconciledConfiguration>,
) -> nas_props::Result<DriftReport> {
    let id = desired.identity()?.to_string();
    let Some(current) = current else {
        return Ok(DriftReport::missing(id));
    };

    let mut drifted = Vec::new();
    for (property, value) in &desired.properties {
        let expected = expected_value(*property, value)?;
        let actual = current.get(*property);
        if actual != Some(&expected) {
            drifted.push(DriftItem {
                property: *property,
                desired: expected,
                actual: actual.cloned(),
            });
        }
    }

    Ok(DriftReport::with_drifted(current.id.clone(), drifted))
}

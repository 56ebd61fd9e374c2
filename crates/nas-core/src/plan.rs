//! Planning the action that brings a dataset to its desired state

use nas_props::{DesiredConfiguration, ReconciledConfiguration, expected_value};
use serde::Serialize;

use crate::check::{DriftItem, check};

/// What reconciling one dataset will do
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlanAction {
    /// The dataset does not exist yet
    Create,
    /// An identity part or a force-new property changed; destroy and recreate
    Replace { reasons: Vec<String> },
    /// Mutable properties drifted; update will only re-read them
    Update { drift: Vec<DriftItem> },
    /// Remote state matches
    NoChange,
}

/// Planned action for one dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    /// Identity the desired configuration resolves to
    pub id: String,
    #[serde(flatten)]
    pub action: PlanAction,
}

/// Decide how to move `current` to `desired`.
///
/// Identity is compared first; force-new properties only count when the
/// caller configured them.
pub fn plan(
    desired: &DesiredConfiguration,
    current: Option<&ReconciledConfiguration>,
) -> nas_props::Result<Plan> {
    let id = desired.identity()?.to_string();
    let Some(current) = current else {
        return Ok(Plan {
            id,
            action: PlanAction::Create,
        });
    };

    let mut reasons = Vec::new();
    if current.identity.to_string() != id {
        reasons.push(format!("identity changes from {} to {}", current.id, id));
    }
    for (property, value) in &desired.properties {
        if !property.rule().force_new {
            continue;
        }
        let expected = expected_value(*property, value)?;
        if current.get(*property) != Some(&expected) {
            reasons.push(format!("{} changes to {}", property, expected));
        }
    }
    if !reasons.is_empty() {
        return Ok(Plan {
            id,
            action: PlanAction::Replace { reasons },
        });
    }

    let report = check(desired, Some(current))?;
    let action = if report.is_healthy() {
        PlanAction::NoChange
    } else {
        PlanAction::Update {
            drift: report.drifted,
        }
    };
    Ok(Plan { id, action })
}

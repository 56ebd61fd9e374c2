//! Remote API representation of datasets

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// A wire property slot as seen by the translator.
///
/// The remote API distinguishes a property that is not reported at all from
/// one that is reported with a null inner value. Both read as "unset", but
/// keeping them apart makes every translation rule handle all three cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tristate<T> {
    /// Not reported for this dataset
    #[default]
    Absent,
    /// Reported, but without a value
    Null,
    Present(T),
}

impl<T> Tristate<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_ref(&self) -> Tristate<&T> {
        match self {
            Self::Absent => Tristate::Absent,
            Self::Null => Tristate::Null,
            Self::Present(v) => Tristate::Present(v),
        }
    }

    /// The value, if present
    pub fn present(self) -> Option<T> {
        match self {
            Self::Present(v) => Some(v),
            _ => None,
        }
    }
}

/// A single property as returned by the remote API.
///
/// `value` is the display form (`"LZ4"`, `"256K"`); `rawvalue` is the exact
/// machine form (`"lz4"`, `"262144"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireProperty {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rawvalue: Option<String>,
    /// Where the value comes from (`LOCAL`, `INHERITED`, `DEFAULT`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl WireProperty {
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn dual(value: impl Into<String>, rawvalue: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            rawvalue: Some(rawvalue.into()),
            source: None,
        }
    }
}

/// Full remote record for one dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireRecord {
    /// Identity string as normalized by the remote side
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mountpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_root: Option<String>,
    #[serde(default)]
    pub encrypted: bool,
    #[serde(default)]
    pub key_loaded: bool,
    /// Every other reported field, keyed by wire name
    #[serde(flatten)]
    pub properties: BTreeMap<String, Value>,
}

impl WireRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Look up a property and classify its shape.
    ///
    /// Objects are read as `{value, rawvalue}` pairs; an object whose
    /// `value` and `rawvalue` are both null is [`Tristate::Null`]. Bare
    /// strings and numbers are accepted as display-only values.
    pub fn property(&self, key: &str) -> Result<Tristate<WireProperty>> {
        let Some(raw) = self.properties.get(key) else {
            return Ok(Tristate::Absent);
        };

        match raw {
            Value::Null => Ok(Tristate::Null),
            Value::String(s) => Ok(Tristate::Present(WireProperty::value(s.clone()))),
            Value::Number(n) => Ok(Tristate::Present(WireProperty::value(n.to_string()))),
            Value::Object(_) => {
                let prop: WireProperty =
                    serde_json::from_value(raw.clone()).map_err(|e| Error::UnexpectedShape {
                        field: key.to_string(),
                        shape: e.to_string(),
                    })?;
                if prop.value.is_none() && prop.rawvalue.is_none() {
                    Ok(Tristate::Null)
                } else {
                    Ok(Tristate::Present(prop))
                }
            }
            other => Err(Error::UnexpectedShape {
                field: key.to_string(),
                shape: shape_name(other).to_string(),
            }),
        }
    }

    pub fn set_property(&mut self, key: impl Into<String>, property: WireProperty) {
        // WireProperty only holds strings, so conversion cannot fail.
        let value = serde_json::to_value(property).unwrap_or(Value::Null);
        self.properties.insert(key.into(), value);
    }

    /// Store a wrapper that is present but carries no value
    pub fn set_null_property(&mut self, key: impl Into<String>) {
        self.properties
            .insert(key.into(), serde_json::json!({ "value": null }));
    }
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The only dataset type created by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DatasetType {
    #[default]
    #[serde(rename = "FILESYSTEM")]
    Filesystem,
}

/// Payload for a dataset create call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireCreateRequest {
    /// Canonical identity string of the new dataset
    pub name: String,
    #[serde(rename = "type")]
    pub dataset_type: DatasetType,
    /// Only explicitly configured properties, keyed by wire name
    #[serde(flatten)]
    pub properties: BTreeMap<String, Value>,
}

impl WireCreateRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dataset_type: DatasetType::Filesystem,
            properties: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

//! Conversion between desired configuration and the remote wire format

use serde_json::Value;

use crate::config::{DesiredConfiguration, ReconciledConfiguration};
use crate::property::{FieldValue, Property};
use crate::registry::{PROPERTIES, ReadRule, WriteRule};
use crate::wire::{Tristate, WireCreateRequest, WireProperty, WireRecord};
use crate::{Error, Result};

/// Convert one configured value into its wire form.
///
/// Enum tokens are checked case-insensitively against the property's
/// vocabulary and sent uppercase; free text is sent unchanged; integers are
/// range-checked.
pub fn to_wire_value(property: Property, value: &FieldValue) -> Result<Value> {
    let field = property.as_str();
    let Some(write) = property.rule().write else {
        return Err(Error::NotSettable { field });
    };

    match write {
        WriteRule::EnumToken { allowed } => {
            let token = expect_text(field, value)?;
            if !allowed.iter().any(|a| a.eq_ignore_ascii_case(token)) {
                return Err(Error::InvalidValue {
                    field,
                    value: token.to_string(),
                    reason: format!("expected one of {}", allowed.join(", ")),
                });
            }
            Ok(Value::String(token.to_uppercase()))
        }
        WriteRule::PassThrough => Ok(Value::String(expect_text(field, value)?.to_string())),
        WriteRule::Integer { min, max } => {
            let Some(number) = value.as_integer() else {
                return Err(Error::TypeMismatch {
                    field,
                    expected: "integer",
                    actual: value.kind(),
                });
            };
            if number < min || number > max {
                return Err(Error::InvalidValue {
                    field,
                    value: number.to_string(),
                    reason: format!("expected a value between {} and {}", min, max),
                });
            }
            Ok(Value::from(number))
        }
    }
}

fn expect_text<'a>(field: &'static str, value: &'a FieldValue) -> Result<&'a str> {
    value.as_text().ok_or(Error::TypeMismatch {
        field,
        expected: "string",
        actual: value.kind(),
    })
}

/// Check a desired configuration without building a request.
///
/// Verifies the identity parts, every configured value, and that no two
/// mutually exclusive properties are configured together.
pub fn validate_desired(desired: &DesiredConfiguration) -> Result<()> {
    desired.identity()?;

    for (property, value) in &desired.properties {
        to_wire_value(*property, value)?;

        for other in property.rule().conflicts_with {
            if desired.is_configured(*other) {
                return Err(Error::Conflict {
                    field: property.as_str(),
                    other: other.as_str(),
                });
            }
        }
    }

    Ok(())
}

/// Build the wire payload for creating a dataset.
///
/// Only configured properties appear in the payload; the dataset type is
/// always [`DatasetType::Filesystem`](crate::DatasetType::Filesystem).
pub fn to_wire_create_request(desired: &DesiredConfiguration) -> Result<WireCreateRequest> {
    validate_desired(desired)?;

    let identity = desired.identity()?;
    let mut request = WireCreateRequest::new(identity.to_string());

    for (property, value) in &desired.properties {
        request
            .properties
            .insert(property.rule().wire_key.to_string(), to_wire_value(*property, value)?);
    }

    tracing::debug!(
        name = %request.name,
        properties = request.properties.len(),
        "Built dataset create request"
    );

    Ok(request)
}

/// Convert one wire slot into a configuration value.
///
/// Returns `Ok(None)` when the property should be left unset: the slot is
/// absent or null, the needed half of the value pair is missing, or a
/// non-negative-only integer carries the remote's negative sentinel.
pub fn from_wire_property(
    property: Property,
    slot: Tristate<&WireProperty>,
) -> Result<Option<FieldValue>> {
    let Tristate::Present(wire) = slot else {
        return Ok(None);
    };
    let field = property.as_str();

    let value = match property.rule().read {
        ReadRule::EnumToken => wire.value.as_ref().map(|v| FieldValue::Text(v.to_lowercase())),
        ReadRule::PassThrough => wire.value.clone().map(FieldValue::Text),
        ReadRule::NestedOptional { lowercase } => wire.value.as_ref().map(|v| {
            if lowercase {
                FieldValue::Text(v.to_lowercase())
            } else {
                FieldValue::Text(v.clone())
            }
        }),
        ReadRule::Integer => wire
            .value
            .as_deref()
            .map(|v| parse_integer(field, v))
            .transpose()?
            .map(FieldValue::Integer),
        ReadRule::NonNegativeInteger => wire
            .value
            .as_deref()
            .map(|v| parse_integer(field, v))
            .transpose()?
            .filter(|n| *n >= 0)
            .map(FieldValue::Integer),
        ReadRule::RawBytes => wire
            .rawvalue
            .as_deref()
            .map(|v| parse_integer(field, v))
            .transpose()?
            .map(FieldValue::Integer),
    };

    Ok(value)
}

fn parse_integer(field: &'static str, raw: &str) -> Result<i64> {
    raw.parse::<i64>().map_err(|source| Error::NumericParse {
        field,
        value: raw.to_string(),
        source,
    })
}

/// Translate a full remote record into reconciled configuration.
///
/// The identity is decoded from the record's own `id` first; properties are
/// then read in registry order and the first failing property aborts the
/// translation with an error naming it.
pub fn from_wire_record(record: &WireRecord) -> Result<ReconciledConfiguration> {
    let identity = nas_path::decode(&record.id)?;
    let mut reconciled = ReconciledConfiguration::new(record.id.clone(), identity);

    for rule in PROPERTIES {
        let slot = record.property(rule.wire_key)?;
        if let Some(value) = from_wire_property(rule.property, slot.as_ref())? {
            reconciled.properties.insert(rule.property, value);
        }
    }

    reconciled.mount_point = record.mountpoint.clone();
    reconciled.encryption_root = record.encryption_root.clone();
    reconciled.encrypted = record.encrypted;
    reconciled.key_loaded = record.key_loaded;

    Ok(reconciled)
}

/// The value a successful create would read back for a configured value.
///
/// Used to compare desired and reconciled state without false drift from
/// case differences (`"LZ4"` configured reads back as `"lz4"`).
pub fn expected_value(property: Property, value: &FieldValue) -> Result<FieldValue> {
    let wire = match to_wire_value(property, value)? {
        Value::String(s) => WireProperty::dual(s.clone(), s),
        other => WireProperty::dual(other.to_string(), other.to_string()),
    };

    Ok(from_wire_property(property, Tristate::Present(&wire))?.unwrap_or_else(|| value.clone()))
}

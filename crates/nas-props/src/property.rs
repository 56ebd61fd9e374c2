//! Managed dataset properties and their configuration values

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::registry::{PROPERTIES, PropertyRule};

/// A managed dataset property, named as it appears in desired configuration.
///
/// Variant order matches the order of [`PROPERTIES`]; [`Property::rule`]
/// indexes the registry by discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    AclMode,
    AclType,
    Atime,
    CaseSensitivity,
    Comments,
    Compression,
    Copies,
    Deduplication,
    Exec,
    ManagedBy,
    Readonly,
    RecordSize,
    RecordSizeBytes,
    ShareType,
    Sync,
    SnapDir,
    QuotaBytes,
    QuotaWarning,
    QuotaCritical,
    RefQuotaBytes,
    RefQuotaWarning,
    RefQuotaCritical,
    Reservation,
    RefReservation,
    KeyFormat,
    EncryptionAlgorithm,
    #[serde(rename = "pbkdf2iters")]
    Pbkdf2Iters,
    Origin,
    Xattr,
}

impl Property {
    /// Conversion rule for this property
    pub fn rule(self) -> &'static PropertyRule {
        &PROPERTIES[self as usize]
    }

    /// Configuration-side name, e.g. `record_size`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AclMode => "acl_mode",
            Self::AclType => "acl_type",
            Self::Atime => "atime",
            Self::CaseSensitivity => "case_sensitivity",
            Self::Comments => "comments",
            Self::Compression => "compression",
            Self::Copies => "copies",
            Self::Deduplication => "deduplication",
            Self::Exec => "exec",
            Self::ManagedBy => "managed_by",
            Self::Readonly => "readonly",
            Self::RecordSize => "record_size",
            Self::RecordSizeBytes => "record_size_bytes",
            Self::ShareType => "share_type",
            Self::Sync => "sync",
            Self::SnapDir => "snap_dir",
            Self::QuotaBytes => "quota_bytes",
            Self::QuotaWarning => "quota_warning",
            Self::QuotaCritical => "quota_critical",
            Self::RefQuotaBytes => "ref_quota_bytes",
            Self::RefQuotaWarning => "ref_quota_warning",
            Self::RefQuotaCritical => "ref_quota_critical",
            Self::Reservation => "reservation",
            Self::RefReservation => "ref_reservation",
            Self::KeyFormat => "key_format",
            Self::EncryptionAlgorithm => "encryption_algorithm",
            Self::Pbkdf2Iters => "pbkdf2iters",
            Self::Origin => "origin",
            Self::Xattr => "xattr",
        }
    }

    /// All properties in registry order
    pub fn all() -> impl Iterator<Item = Property> {
        PROPERTIES.iter().map(|rule| rule.property)
    }

    /// Whether a desired value may be given for this property
    pub fn is_settable(self) -> bool {
        self.rule().write.is_some()
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed property value on the configuration side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Short name of the value kind, used in type mismatch errors
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Text(_) => "string",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_name_matches_as_str() {
        for property in Property::all() {
            let json = serde_json::to_string(&property).unwrap();
            assert_eq!(json, format!("\"{}\"", property.as_str()));
        }
    }

    #[test]
    fn test_field_value_untagged_deserialization() {
        let values: Vec<FieldValue> = serde_json::from_str(r#"[true, 3, "lz4"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Bool(true),
                FieldValue::Integer(3),
                FieldValue::Text("lz4".to_string())
            ]
        );
    }

    #[test]
    fn test_field_value_accessors() {
        assert_eq!(FieldValue::from("on").as_text(), Some("on"));
        assert_eq!(FieldValue::from(2).as_integer(), Some(2));
        assert_eq!(FieldValue::from(true).as_bool(), Some(true));
        assert!(FieldValue::from(2).as_text().is_none());
        assert_eq!(FieldValue::from(2).kind(), "integer");
    }
}

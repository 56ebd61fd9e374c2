//! Declarative property registry - SINGLE SOURCE OF TRUTH
//!
//! Each managed property is described by one [`PropertyRule`]: the wire key
//! it is stored under, how it is read back, how (and whether) it is sent on
//! create, and whether changing it forces the dataset to be recreated.

use crate::property::Property;

/// How a wire property is turned into a configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadRule {
    /// Display value, lowercased.
    EnumToken,
    /// Display value, verbatim.
    PassThrough,
    /// Display value parsed as an integer.
    Integer,
    /// Display value parsed as an integer. Negative values are the remote's
    /// "no real value" sentinel and leave the property unset.
    NonNegativeInteger,
    /// Raw value parsed as an exact byte count.
    RawBytes,
    /// Wrapper whose inner value may itself be null.
    NestedOptional { lowercase: bool },
}

/// How a configured value is sent to the remote side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteRule {
    /// Case-insensitive token from a fixed vocabulary, sent uppercase.
    EnumToken { allowed: &'static [&'static str] },
    /// Free text, sent unchanged.
    PassThrough,
    /// Integer within an inclusive range.
    Integer { min: i64, max: i64 },
}

/// Conversion rule for one managed property.
#[derive(Debug, Clone, Copy)]
pub struct PropertyRule {
    pub property: Property,
    /// Key used by the remote API, both in records and create requests
    pub wire_key: &'static str,
    pub read: ReadRule,
    /// `None` for properties computed by the remote side
    pub write: Option<WriteRule>,
    /// Changing the value requires destroying and recreating the dataset
    pub force_new: bool,
    pub conflicts_with: &'static [Property],
}

pub const ON_OFF: &[&str] = &["on", "off"];

pub const ACL_MODES: &[&str] = &["passthrough", "restricted"];

pub const CASE_SENSITIVITIES: &[&str] = &["sensitive", "insensitive", "mixed"];

pub const DEDUPLICATION_MODES: &[&str] = &["on", "off", "verify"];

pub const SHARE_TYPES: &[&str] = &["generic", "smb"];

pub const SYNC_MODES: &[&str] = &["standard", "always", "disabled"];

pub const SNAPDIR_MODES: &[&str] = &["visible", "hidden"];

pub const RECORD_SIZES: &[&str] = &[
    "512", "1K", "2K", "4K", "8K", "16K", "32K", "64K", "128K", "256K", "512K", "1024K",
];

pub const COMPRESSION_ALGORITHMS: &[&str] = &[
    "off", "lz4", "gzip", "gzip-1", "gzip-9", "zstd", "zstd-fast", "zle", "lzjb",
    "zstd-1", "zstd-2", "zstd-3", "zstd-4", "zstd-5", "zstd-6", "zstd-7", "zstd-8",
    "zstd-9", "zstd-10", "zstd-11", "zstd-12", "zstd-13", "zstd-14", "zstd-15",
    "zstd-16", "zstd-17", "zstd-18", "zstd-19", "zstd-fast-1", "zstd-fast-2",
    "zstd-fast-3", "zstd-fast-4", "zstd-fast-5", "zstd-fast-6", "zstd-fast-7",
    "zstd-fast-8", "zstd-fast-9", "zstd-fast-10", "zstd-fast-20", "zstd-fast-30",
    "zstd-fast-40", "zstd-fast-50", "zstd-fast-60", "zstd-fast-70", "zstd-fast-80",
    "zstd-fast-90", "zstd-fast-100", "zstd-fast-500", "zstd-fast-1000",
];

const PERCENT: WriteRule = WriteRule::Integer { min: 0, max: 100 };

const BYTES: WriteRule = WriteRule::Integer {
    min: 0,
    max: i64::MAX,
};

const fn computed(property: Property, wire_key: &'static str, read: ReadRule) -> PropertyRule {
    PropertyRule {
        property,
        wire_key,
        read,
        write: None,
        force_new: false,
        conflicts_with: &[],
    }
}

const fn token(property: Property, wire_key: &'static str, allowed: &'static [&'static str]) -> PropertyRule {
    PropertyRule {
        property,
        wire_key,
        read: ReadRule::EnumToken,
        write: Some(WriteRule::EnumToken { allowed }),
        force_new: false,
        conflicts_with: &[],
    }
}

const fn settable(
    property: Property,
    wire_key: &'static str,
    read: ReadRule,
    write: WriteRule,
) -> PropertyRule {
    PropertyRule {
        property,
        wire_key,
        read,
        write: Some(write),
        force_new: false,
        conflicts_with: &[],
    }
}

/// All managed properties, in [`Property`] discriminant order.
pub static PROPERTIES: &[PropertyRule] = &[
    PropertyRule {
        conflicts_with: &[Property::ShareType],
        ..token(Property::AclMode, "aclmode", ACL_MODES)
    },
    computed(Property::AclType, "acltype", ReadRule::EnumToken),
    token(Property::Atime, "atime", ON_OFF),
    PropertyRule {
        force_new: true,
        conflicts_with: &[Property::ShareType],
        ..token(Property::CaseSensitivity, "casesensitivity", CASE_SENSITIVITIES)
    },
    // Comments keep their case on the remote side.
    settable(Property::Comments, "comments", ReadRule::PassThrough, WriteRule::PassThrough),
    token(Property::Compression, "compression", COMPRESSION_ALGORITHMS),
    settable(
        Property::Copies,
        "copies",
        ReadRule::Integer,
        WriteRule::Integer { min: 1, max: 3 },
    ),
    token(Property::Deduplication, "deduplication", DEDUPLICATION_MODES),
    token(Property::Exec, "exec", ON_OFF),
    computed(Property::ManagedBy, "managedby", ReadRule::PassThrough),
    token(Property::Readonly, "readonly", ON_OFF),
    settable(
        Property::RecordSize,
        "recordsize",
        ReadRule::PassThrough,
        WriteRule::EnumToken {
            allowed: RECORD_SIZES,
        },
    ),
    computed(Property::RecordSizeBytes, "recordsize", ReadRule::RawBytes),
    PropertyRule {
        force_new: true,
        ..token(Property::ShareType, "share_type", SHARE_TYPES)
    },
    token(Property::Sync, "sync", SYNC_MODES),
    token(Property::SnapDir, "snapdir", SNAPDIR_MODES),
    settable(Property::QuotaBytes, "quota", ReadRule::RawBytes, BYTES),
    settable(Property::QuotaWarning, "quota_warning", ReadRule::Integer, PERCENT),
    settable(Property::QuotaCritical, "quota_critical", ReadRule::Integer, PERCENT),
    settable(Property::RefQuotaBytes, "refquota", ReadRule::RawBytes, BYTES),
    settable(Property::RefQuotaWarning, "refquota_warning", ReadRule::Integer, PERCENT),
    settable(Property::RefQuotaCritical, "refquota_critical", ReadRule::Integer, PERCENT),
    settable(Property::Reservation, "reservation", ReadRule::RawBytes, BYTES),
    settable(Property::RefReservation, "refreservation", ReadRule::RawBytes, BYTES),
    computed(
        Property::KeyFormat,
        "key_format",
        ReadRule::NestedOptional { lowercase: true },
    ),
    computed(
        Property::EncryptionAlgorithm,
        "encryption_algorithm",
        ReadRule::NestedOptional { lowercase: false },
    ),
    computed(Property::Pbkdf2Iters, "pbkdf2iters", ReadRule::NonNegativeInteger),
    computed(Property::Origin, "origin", ReadRule::EnumToken),
    computed(Property::Xattr, "xattr", ReadRule::EnumToken),
];

/// Properties whose change cannot be applied in place
pub fn force_new_properties() -> impl Iterator<Item = Property> {
    PROPERTIES
        .iter()
        .filter(|rule| rule.force_new)
        .map(|rule| rule.property)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_order_matches_discriminants() {
        for (index, rule) in PROPERTIES.iter().enumerate() {
            assert_eq!(
                rule.property as usize, index,
                "{} is registered at position {}",
                rule.property, index
            );
        }
    }

    #[test]
    fn test_every_property_registered_once() {
        let names: HashSet<_> = PROPERTIES.iter().map(|r| r.property.as_str()).collect();
        assert_eq!(names.len(), PROPERTIES.len());
    }

    #[test]
    fn test_wire_keys_unique_except_record_size_pair() {
        let mut seen = HashSet::new();
        for rule in PROPERTIES {
            if !seen.insert(rule.wire_key) {
                assert_eq!(rule.wire_key, "recordsize");
            }
        }
    }

    #[test]
    fn test_force_new_properties() {
        let force_new: Vec<_> = force_new_properties().collect();
        assert_eq!(
            force_new,
            vec![Property::CaseSensitivity, Property::ShareType]
        );
    }

    #[test]
    fn test_vocabularies_are_lowercase() {
        for rule in PROPERTIES {
            if let (ReadRule::EnumToken, Some(WriteRule::EnumToken { allowed })) =
                (rule.read, rule.write)
            {
                for value in allowed {
                    assert_eq!(*value, value.to_lowercase(), "{}", rule.property);
                }
            }
        }
    }
}

//! [`RecordBuilder`] for remote dataset records.

use nas_props::{WireProperty, WireRecord};
use serde_json::Value;

/// Fluent builder for a [`WireRecord`] as the remote API would return it.
///
/// # Example
///
/// ```rust
/// use nas_test_utils::record::RecordBuilder;
///
/// let record = RecordBuilder::new("tank/data")
///     .property("compression", "LZ4")
///     .dual("recordsize", "128K", "131072")
///     .null("key_format")
///     .build();
/// assert_eq!(record.id, "tank/data");
/// ```
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: WireRecord,
}

impl RecordBuilder {
    /// Start a record with the mount point the appliance would assign.
    pub fn new(id: &str) -> Self {
        let mut record = WireRecord::new(id);
        record.mountpoint = Some(format!("/mnt/{}", id));
        Self { record }
    }

    /// Property with only a display value
    pub fn property(mut self, key: &str, value: &str) -> Self {
        self.record.set_property(key, WireProperty::value(value));
        self
    }

    /// Property with display and raw values
    pub fn dual(mut self, key: &str, value: &str, rawvalue: &str) -> Self {
        self.record.set_property(key, WireProperty::dual(value, rawvalue));
        self
    }

    /// Property reported with a null inner value
    pub fn null(mut self, key: &str) -> Self {
        self.record.set_null_property(key);
        self
    }

    /// Arbitrary JSON under `key`, for malformed shapes
    pub fn raw(mut self, key: &str, value: Value) -> Self {
        self.record.properties.insert(key.to_string(), value);
        self
    }

    pub fn encrypted(mut self, root: &str) -> Self {
        self.record.encrypted = true;
        self.record.key_loaded = true;
        self.record.encryption_root = Some(root.to_string());
        self
    }

    pub fn build(self) -> WireRecord {
        self.record
    }
}

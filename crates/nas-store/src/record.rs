//! Building stored records from create requests
//!
//! The emulated appliance reports every property it knows about, not just
//! the configured ones: explicit values are `LOCAL`, values taken from the
//! enclosing dataset are `INHERITED`, and everything else is `DEFAULT`.

use nas_core::{StoreError, StoreResult};
use nas_props::registry::{PROPERTIES, ReadRule};
use nas_props::{WireCreateRequest, WireProperty, WireRecord};
use serde_json::Value;

/// Value reported for a property the request did not set.
#[derive(Debug, Clone, Copy)]
enum Fallback {
    /// Display value plus whether children inherit it
    Value(&'static str, bool),
    /// Wrapper present with a null inner value
    Null,
}

/// Appliance defaults, keyed by wire name.
///
/// `comments` and `managedby` have no default and are not reported until
/// set.
const DEFAULTS: &[(&str, Fallback)] = &[
    ("aclmode", Fallback::Value("PASSTHROUGH", true)),
    ("acltype", Fallback::Value("POSIX", true)),
    ("atime", Fallback::Value("ON", true)),
    ("casesensitivity", Fallback::Value("SENSITIVE", false)),
    ("compression", Fallback::Value("LZ4", true)),
    ("copies", Fallback::Value("1", true)),
    ("deduplication", Fallback::Value("OFF", true)),
    ("exec", Fallback::Value("ON", true)),
    ("readonly", Fallback::Value("OFF", true)),
    ("recordsize", Fallback::Value("128K", true)),
    ("share_type", Fallback::Value("GENERIC", false)),
    ("sync", Fallback::Value("STANDARD", true)),
    ("snapdir", Fallback::Value("HIDDEN", true)),
    ("quota", Fallback::Value("0", false)),
    ("quota_warning", Fallback::Value("80", false)),
    ("quota_critical", Fallback::Value("95", false)),
    ("refquota", Fallback::Value("0", false)),
    ("refquota_warning", Fallback::Value("80", false)),
    ("refquota_critical", Fallback::Value("95", false)),
    ("reservation", Fallback::Value("0", false)),
    ("refreservation", Fallback::Value("0", false)),
    ("key_format", Fallback::Null),
    ("encryption_algorithm", Fallback::Null),
    ("pbkdf2iters", Fallback::Value("0", false)),
    ("origin", Fallback::Null),
    ("xattr", Fallback::Value("SA", true)),
];

/// Build the record the appliance would report right after a create.
///
/// `parent` is the stored record of the enclosing dataset, if any.
pub(crate) fn synthesize(
    request: &WireCreateRequest,
    parent: Option<&WireRecord>,
) -> StoreResult<WireRecord> {
    let mut record = WireRecord::new(request.name.clone());
    record.mountpoint = Some(format!("/mnt/{}", request.name));

    for key in request.properties.keys() {
        if !is_known(key) {
            return Err(rejected(request, format!("unknown property '{}'", key)));
        }
    }

    for key in request
        .properties
        .keys()
        .filter(|k| !DEFAULTS.iter().any(|(d, _)| *d == k.as_str()))
    {
        // Known but without a default: free text such as comments.
        let text = display_text(request, key)?;
        record.set_property(key.clone(), local(key, &text));
    }

    for (key, fallback) in DEFAULTS {
        if request.properties.contains_key(*key) {
            let text = display_text(request, key)?;
            record.set_property(*key, local(key, &text));
            continue;
        }

        match fallback {
            Fallback::Null => record.set_null_property(*key),
            Fallback::Value(value, inherit) => {
                let inherited = inherit
                    .then(|| parent.and_then(|p| p.property(key).ok()?.present()))
                    .flatten();
                let property = match (inherited, parent) {
                    (Some(mut property), Some(parent)) => {
                        property.source = Some(format!("INHERITED from {}", parent.id));
                        property
                    }
                    _ => with_source(build(key, value), "DEFAULT"),
                };
                record.set_property(*key, property);
            }
        }
    }

    Ok(record)
}

fn is_known(key: &str) -> bool {
    PROPERTIES.iter().any(|rule| rule.wire_key == key)
}

fn rejected(request: &WireCreateRequest, reason: String) -> StoreError {
    StoreError::Rejected {
        id: request.name.clone(),
        reason,
    }
}

fn display_text(request: &WireCreateRequest, key: &str) -> StoreResult<String> {
    match request.properties.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(rejected(
            request,
            format!("property '{}' has unsupported value {}", key, other),
        )),
        None => Ok(String::new()),
    }
}

fn local(key: &str, text: &str) -> WireProperty {
    with_source(build(key, text), "LOCAL")
}

fn with_source(mut property: WireProperty, source: &str) -> WireProperty {
    property.source = Some(source.to_string());
    property
}

/// Display and raw forms for a value as the appliance reports them.
fn build(key: &str, text: &str) -> WireProperty {
    if key == "recordsize" {
        let raw = size_in_bytes(text).map_or_else(|| text.to_lowercase(), |n| n.to_string());
        return WireProperty::dual(text.to_uppercase(), raw);
    }

    let enumerated = PROPERTIES
        .iter()
        .any(|rule| rule.wire_key == key && rule.read == ReadRule::EnumToken);
    if enumerated {
        WireProperty::dual(text.to_uppercase(), text.to_lowercase())
    } else {
        WireProperty::dual(text, text)
    }
}

/// Parse a size such as `"512"`, `"128K"` or `"1M"` into bytes.
pub(crate) fn size_in_bytes(text: &str) -> Option<i64> {
    let text = text.trim();
    let (digits, multiplier) = match text.char_indices().last()? {
        (i, 'K' | 'k') => (&text[..i], 1i64 << 10),
        (i, 'M' | 'm') => (&text[..i], 1 << 20),
        (i, 'G' | 'g') => (&text[..i], 1 << 30),
        _ => (text, 1),
    };
    digits.parse::<i64>().ok()?.checked_mul(multiplier)
}

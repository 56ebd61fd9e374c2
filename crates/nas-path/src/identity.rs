//! Dataset identity decomposition and composition

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Separator between path segments of a dataset identity.
pub const SEPARATOR: char = '/';

/// The hierarchical identity of a dataset.
///
/// `pool` and `name` are single segments; `parent` is everything strictly
/// between them and may be empty or span several segments. The canonical
/// string form is `pool/name` or `pool/parent/name`.
///
/// Fields are private so that every value upholds the segment invariants;
/// build one with [`DatasetIdentity::new`] or [`decode`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DatasetIdentity {
    pool: String,
    parent: String,
    name: String,
}

impl DatasetIdentity {
    /// Build an identity from its parts.
    ///
    /// Leading and trailing separators are trimmed from `parent`. `pool` and
    /// `name` must be non-empty and must not contain a separator, and
    /// `parent` must not contain empty segments.
    pub fn new(
        pool: impl Into<String>,
        parent: impl AsRef<str>,
        name: impl Into<String>,
    ) -> Result<Self> {
        let pool = pool.into();
        let name = name.into();
        let parent = parent.as_ref().trim_matches(SEPARATOR).to_string();

        validate_segment(&pool, "pool")?;
        validate_segment(&name, "name")?;
        if !parent.is_empty() && parent.split(SEPARATOR).any(str::is_empty) {
            return Err(Error::malformed(
                parent,
                "parent contains an empty segment",
            ));
        }

        Ok(Self { pool, parent, name })
    }

    pub fn pool(&self) -> &str {
        &self.pool
    }

    /// Path between pool and name, empty for datasets directly under the pool.
    pub fn parent(&self) -> &str {
        &self.parent
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity of the enclosing dataset, or `None` when the parent is the
    /// pool root itself.
    pub fn parent_identity(&self) -> Option<Self> {
        if self.parent.is_empty() {
            return None;
        }
        let (parent, name) = match self.parent.rsplit_once(SEPARATOR) {
            Some((rest, last)) => (rest.to_string(), last.to_string()),
            None => (String::new(), self.parent.clone()),
        };
        Some(Self {
            pool: self.pool.clone(),
            parent,
            name,
        })
    }

    /// Whether `other` lives somewhere below this dataset.
    pub fn is_ancestor_of(&self, other: &DatasetIdentity) -> bool {
        let own = encode(self);
        let theirs = encode(other);
        theirs.len() > own.len()
            && theirs.starts_with(&own)
            && theirs[own.len()..].starts_with(SEPARATOR)
    }
}

fn validate_segment(segment: &str, part: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(Error::malformed(segment, format!("{} is empty", part)));
    }
    if segment.contains(SEPARATOR) {
        return Err(Error::malformed(
            segment,
            format!("{} must not contain '{}'", part, SEPARATOR),
        ));
    }
    Ok(())
}

/// Decode an identity string into its parts.
///
/// The first segment is the pool, the last is the name and everything in
/// between is the parent. Fails if there are fewer than two segments or if
/// any segment is empty.
pub fn decode(id: &str) -> Result<DatasetIdentity> {
    let segments: Vec<&str> = id.split(SEPARATOR).collect();

    if segments.len() < 2 {
        return Err(Error::malformed(id, "expected at least 2 segments"));
    }
    if segments.iter().any(|s| s.is_empty()) {
        return Err(Error::malformed(id, "identity contains an empty segment"));
    }

    let last = segments.len() - 1;
    Ok(DatasetIdentity {
        pool: segments[0].to_string(),
        parent: segments[1..last].join("/"),
        name: segments[last].to_string(),
    })
}

/// Encode an identity into its canonical string form.
pub fn encode(identity: &DatasetIdentity) -> String {
    if identity.parent.is_empty() {
        format!("{}/{}", identity.pool, identity.name)
    } else {
        format!(
            "{}/{}/{}",
            identity.pool,
            identity.parent.trim_matches(SEPARATOR),
            identity.name
        )
    }
}

impl fmt::Display for DatasetIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self))
    }
}

impl FromStr for DatasetIdentity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        decode(s)
    }
}

impl TryFrom<String> for DatasetIdentity {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        decode(&s)
    }
}

impl From<DatasetIdentity> for String {
    fn from(identity: DatasetIdentity) -> Self {
        encode(&identity)
    }
}

//! The prefixed identifier value type.
//!
//! A prefixed ID is serialized as `{prefix}{local_id}`. The prefix carries its
//! own delimiter (`test_`, `other_test_`), so nothing is inserted between the
//! two halves.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Conventional delimiter that terminates a prefix.
pub const DELIMITER: char = '_';

/// A prefixed identifier split into its prefix and local ID.
///
/// Equality, ordering and hashing compare the full identifier only; where
/// it was split does not matter.
#[derive(Debug, Clone)]
pub struct PrefixedId {
    value: String,
    prefix_len: usize,
}

impl PrefixedId {
    /// Builds an ID from a prefix and a generator-produced local ID.
    #[must_use]
    pub fn new(prefix: &str, local_id: &str) -> Self {
        Self {
            value: format!("{prefix}{local_id}"),
            prefix_len: prefix.len(),
        }
    }

    /// Wraps `value` when `prefix` is a string-prefix of it.
    pub fn with_prefix(value: impl Into<String>, prefix: &str) -> Option<Self> {
        let value = value.into();
        if !value.starts_with(prefix) {
            return None;
        }
        Some(Self {
            prefix_len: prefix.len(),
            value,
        })
    }

    /// Splits `value` after its last [`DELIMITER`].
    ///
    /// Used when no registry is at hand (e.g. deserialization). Without a
    /// delimiter the whole value is treated as the local ID.
    #[must_use]
    pub fn split_conventional(value: impl Into<String>) -> Self {
        let value = value.into();
        let prefix_len = value.rfind(DELIMITER).map_or(0, |at| at + 1);
        Self { value, prefix_len }
    }

    /// The prefix, including its delimiter.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.value[..self.prefix_len]
    }

    /// The generator-produced portion after the prefix.
    #[must_use]
    pub fn local_id(&self) -> &str {
        &self.value[self.prefix_len..]
    }

    /// The full identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Consumes the ID, returning the full identifier.
    #[must_use]
    pub fn into_string(self) -> String {
        self.value
    }
}

impl PartialEq for PrefixedId {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for PrefixedId {}

impl PartialOrd for PrefixedId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PrefixedId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Hash for PrefixedId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Display for PrefixedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for PrefixedId {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl From<PrefixedId> for String {
    fn from(id: PrefixedId) -> Self {
        id.value
    }
}

impl serde::Serialize for PrefixedId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.value)
    }
}

/// Deserializes the full identifier and splits it after the last
/// [`DELIMITER`]. That split is a guess: prefixes without a delimiter, or
/// local IDs containing one, come back split elsewhere. Pass the string
/// through [`Registry::parse`](crate::Registry::parse) for the registered
/// split.
impl<'de> serde::Deserialize<'de> for PrefixedId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Err(serde::de::Error::custom("prefixed id cannot be empty"));
        }
        Ok(Self::split_conventional(s))
    }
}

//! Unit and row identifiers
//!
//! The backend has stored unit references both as JSON numbers and as
//! numeric strings. `UnitId` is the single canonical representation; the
//! lenient constructors here are the only place that coercion happens.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// Canonical identifier of an organizational unit (BIGINT in the store)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitId(i64);

impl UnitId {
    /// Create a UnitId from a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Parse from a string, tolerating surrounding whitespace
    ///
    /// Unlike a prefix parse, trailing garbage is rejected: `"12abc"` is not
    /// unit 12.
    pub fn parse(s: &str) -> Result<Self, UnitIdParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(UnitIdParseError::Empty);
        }
        trimmed
            .parse::<i64>()
            .map(UnitId)
            .map_err(|_| UnitIdParseError::InvalidFormat(trimmed.to_string()))
    }

    /// Coerce a single JSON value into a UnitId
    ///
    /// Integers and integral floats are accepted, as are strings holding an
    /// integer. Everything else yields `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(UnitId).or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                    .map(|f| UnitId(f as i64))
            }),
            Value::String(s) => Self::parse(s).ok(),
            _ => None,
        }
    }

    /// Normalize a raw "visible units" column into canonical ids
    ///
    /// Anything that is not a JSON array (null, absent, scalar, object) is
    /// treated as an empty list. Non-convertible entries are dropped and
    /// duplicates collapse onto their first occurrence.
    pub fn normalize_all(value: &Value) -> Vec<Self> {
        let Value::Array(items) = value else {
            return Vec::new();
        };

        let mut seen = HashSet::with_capacity(items.len());
        items
            .iter()
            .filter_map(Self::from_json)
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

/// Error when parsing a UnitId from a string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitIdParseError {
    #[error("empty unit id")]
    Empty,

    #[error("invalid unit id: {0}")]
    InvalidFormat(String),
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UnitId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<UnitId> for i64 {
    fn from(id: UnitId) -> Self {
        id.0
    }
}

impl std::str::FromStr for UnitId {
    type Err = UnitIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitId::parse(s)
    }
}

// The store expects a plain BIGINT
impl Serialize for UnitId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

// Accept both numbers and numeric strings
impl<'de> Deserialize<'de> for UnitId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        UnitId::from_json(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid unit id: {value}")))
    }
}

/// Identifier of any other row (users, activities, members, settings)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(i64);

impl RowId {
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RowId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

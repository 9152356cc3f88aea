//! Loosely typed configuration values.
//!
//! Responsibilities:
//! - Define `RawValue`, the untyped tree produced by the file and env layers.
//! - Define `RawConfig`, the flat key/value mapping handed to validators.
//!
//! Does NOT handle:
//! - Coercion into typed values (see `schema`).
//! - Reading files or the environment (see `loader`).
//!
//! Invariants:
//! - Keys in a `RawConfig` are unique; `insert` replaces (last writer wins).
//! - `RawValue` serializes back to plain JSON with no variant tags.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// An untyped configuration value as read from a source layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vec<RawValue>),
    Map(RawConfig),
}

impl RawValue {
    /// Short name of the variant, used in type mismatch messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Bool(_) => "boolean",
            RawValue::Number(_) => "number",
            RawValue::String(_) => "string",
            RawValue::Array(_) => "array",
            RawValue::Map(_) => "object",
        }
    }

    /// Whether the value counts as "set" for masking purposes.
    ///
    /// Null, `false`, zero and the empty string are falsy; arrays and maps
    /// are always truthy, even when empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            RawValue::Null => false,
            RawValue::Bool(b) => *b,
            RawValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            RawValue::String(s) => !s.is_empty(),
            RawValue::Array(_) | RawValue::Map(_) => true,
        }
    }

    /// True for strings that are empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        matches!(self, RawValue::String(s) if s.trim().is_empty())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&RawConfig> {
        match self {
            RawValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(RawValue::from)
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RawValue::Null,
            serde_json::Value::Bool(b) => RawValue::Bool(b),
            serde_json::Value::Number(n) => RawValue::Number(n),
            serde_json::Value::String(s) => RawValue::String(s),
            serde_json::Value::Array(items) => {
                RawValue::Array(items.into_iter().map(RawValue::from).collect())
            }
            serde_json::Value::Object(map) => RawValue::Map(map.into_iter().collect()),
        }
    }
}

impl From<RawValue> for serde_json::Value {
    fn from(value: RawValue) -> Self {
        match value {
            RawValue::Null => serde_json::Value::Null,
            RawValue::Bool(b) => serde_json::Value::Bool(b),
            RawValue::Number(n) => serde_json::Value::Number(n),
            RawValue::String(s) => serde_json::Value::String(s),
            RawValue::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            RawValue::Map(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::String(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::String(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Number(value.into())
    }
}

impl From<f64> for RawValue {
    /// Non-finite floats have no JSON representation and become `Null`.
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(RawValue::Number)
            .unwrap_or(RawValue::Null)
    }
}

impl From<RawConfig> for RawValue {
    fn from(value: RawConfig) -> Self {
        RawValue::Map(value)
    }
}

/// Flat mapping of configuration keys to untyped values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawConfig(BTreeMap<String, RawValue>);

impl RawConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.0.get(key)
    }

    /// Insert a value, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Option<RawValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<RawValue> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, RawValue> {
        self.0.iter()
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut RawValue> {
        self.0.get_mut(key)
    }
}

impl<K, V> FromIterator<(K, V)> for RawConfig
where
    K: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for RawConfig {
    type Item = (String, RawValue);
    type IntoIter = btree_map::IntoIter<String, RawValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RawConfig {
    type Item = (&'a String, &'a RawValue);
    type IntoIter = btree_map::Iter<'a, String, RawValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

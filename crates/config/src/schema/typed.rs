//! Validated configuration values.
//!
//! Responsibilities:
//! - Hold the coerced output of a schema (`TypedConfig`).
//! - Convert it into caller structs via serde and back into raw form.
//! - Produce masked copies for logging.
//!
//! Invariants:
//! - Only schema-declared fields are present.
//! - `to_raw()` followed by re-validation with the same schema yields an
//!   equal `TypedConfig`.

use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::constants::REDACTION_MARKER;
use crate::value::{RawConfig, RawValue};

/// A coerced configuration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<Value>),
    Object(TypedConfig),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&TypedConfig> {
        match self {
            Value::Object(config) => Some(config),
            _ => None,
        }
    }

    fn is_truthy(&self) -> bool {
        match self {
            Value::String(s) => !s.is_empty(),
            Value::Integer(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Bool(b) => *b,
            Value::List(_) | Value::Object(_) => true,
        }
    }

    /// Convert back into the raw form a source layer would have produced.
    pub fn to_raw(&self) -> RawValue {
        match self {
            Value::String(s) => RawValue::String(s.clone()),
            Value::Integer(i) => RawValue::from(*i),
            Value::Float(f) => RawValue::from(*f),
            Value::Bool(b) => RawValue::Bool(*b),
            Value::List(items) => RawValue::Array(items.iter().map(Value::to_raw).collect()),
            Value::Object(config) => RawValue::Map(config.to_raw()),
        }
    }
}

/// The validated output of a `Schema`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TypedConfig(BTreeMap<String, Value>);

impl TypedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: String, value: Value) {
        self.0.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a dotted path such as `NESTED.FEATURE_FLAG`.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = self.get(segments.next()?)?;
        segments.try_fold(first, |value, segment| value.as_object()?.get(segment))
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_object(&self, key: &str) -> Option<&TypedConfig> {
        self.get(key).and_then(Value::as_object)
    }

    /// Hand out a string field wrapped so it cannot leak through `Debug`.
    pub fn secret(&self, key: &str) -> Option<SecretString> {
        self.get_str(key)
            .map(|value| SecretString::new(value.to_string().into()))
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

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Raw form of this config; validating it again yields an equal config.
    pub fn to_raw(&self) -> RawConfig {
        self.0
            .iter()
            .map(|(key, value)| (key.clone(), value.to_raw()))
            .collect()
    }

    /// Deserialize into a caller-defined struct.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::to_value(self).and_then(serde_json::from_value)
    }

    /// Copy with every truthy value under `secret_keys` replaced by the
    /// redaction marker. Keys that are absent or falsy pass through.
    pub fn masked<S: AsRef<str>>(&self, secret_keys: &[S]) -> TypedConfig {
        let mut masked = self.clone();
        for key in secret_keys {
            if let Some(value) = masked.0.get_mut(key.as_ref())
                && value.is_truthy()
            {
                *value = Value::String(REDACTION_MARKER.to_string());
            }
        }
        masked
    }
}

impl<'a> IntoIterator for &'a TypedConfig {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

//! Immutable snapshot of the process environment.
//!
//! Responsibilities:
//! - Capture environment variables once so merging reads a plain mapping
//!   instead of process-global state.
//! - Let tests and embedders build snapshots from literal pairs.
//!
//! Invariants:
//! - A snapshot never changes after construction.
//! - Variables whose name or value is not valid UTF-8 are skipped.

use std::collections::BTreeMap;
use std::collections::btree_map;

/// Environment variables captured at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        let snapshot: Self = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        tracing::debug!(variables = snapshot.len(), "Captured environment snapshot");
        snapshot
    }

    /// A snapshot with no variables, for file-only loads.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.vars.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

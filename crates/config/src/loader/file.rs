//! JSON config file reading.
//!
//! Responsibilities:
//! - Read a JSON document and require an object at the top level.
//! - Report read and parse failures as distinguishable `ConfigFileError`s.
//!
//! Does NOT handle:
//! - Deciding that a failure is non-fatal (see `merge.rs`).

use std::path::{Path, PathBuf};

use crate::value::RawConfig;

/// Errors that can occur when reading the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Config file at {path} must contain a JSON object, found {found}")]
    NotAnObject { path: PathBuf, found: &'static str },
}

impl ConfigFileError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigFileError::Read { path, .. }
            | ConfigFileError::Parse { path, .. }
            | ConfigFileError::NotAnObject { path, .. } => path,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConfigFileError::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Read and parse a JSON config file.
///
/// Nested objects are kept as nested maps for the schema to validate.
pub fn read_config_file(path: &Path) -> Result<RawConfig, ConfigFileError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigFileError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let document: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| ConfigFileError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

    match document {
        serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(ConfigFileError::NotAnObject {
            path: path.to_path_buf(),
            found: json_type_name(&other),
        }),
    }
}

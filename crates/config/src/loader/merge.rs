//! Layer merging.
//!
//! Responsibilities:
//! - Build the file layer, failing soft on unreadable or malformed files.
//! - Overlay the environment snapshot on top of it.
//!
//! Invariants:
//! - Environment values win over file values for the same key.
//! - File-only keys are kept unchanged.
//! - Neither input is mutated; the result is a fresh mapping.
//! - No error escapes: a bad file contributes nothing.

use std::path::{Path, PathBuf};

use super::env::EnvSnapshot;
use super::file::read_config_file;
use crate::diagnostics::Diagnostics;
use crate::value::{RawConfig, RawValue};

/// Merge the optional config file with `env`, environment first.
pub fn merge(
    config_file_path: Option<&Path>,
    env: &EnvSnapshot,
    diagnostics: &dyn Diagnostics,
) -> RawConfig {
    let mut merged = config_file_path
        .map(|path| file_layer(path, diagnostics))
        .unwrap_or_default();
    let file_keys = merged.len();

    for (key, value) in env.iter() {
        merged.insert(key.clone(), RawValue::String(value.clone()));
    }

    tracing::debug!(
        file_keys,
        env_keys = env.len(),
        merged_keys = merged.len(),
        "Merged configuration layers"
    );
    merged
}

fn resolve(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn file_layer(path: &Path, diagnostics: &dyn Diagnostics) -> RawConfig {
    let resolved = resolve(path);
    if !resolved.exists() {
        tracing::debug!(path = %resolved.display(), "Config file not found, skipping");
        return RawConfig::new();
    }

    match read_config_file(&resolved) {
        Ok(config) => config,
        Err(e) => {
            diagnostics.config_file_skipped(&resolved, &e);
            RawConfig::new()
        }
    }
}

//! Shared test utilities for strata integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Write schema and config fixtures into temp directories.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Variables the fixtures below read; cleared so the host cannot leak in.
const FIXTURE_VARS: &[&str] = &["PORT", "DB_HOST", "DB_PASSWORD", "API_KEY", "STRATA_CONFIG_PATH"];

/// Returns a hermetic `strata` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - Variables used by the fixtures are cleared.
/// - `RUST_LOG=off` keeps diagnostics out of stderr assertions.
pub fn strata_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("strata");
    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("RUST_LOG", "off");
    for var in FIXTURE_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Write the standard service schema into `dir`.
#[allow(dead_code)]
pub fn write_schema(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("schema.json");
    std::fs::write(
        &path,
        serde_json::json!({
            "fields": [
                { "name": "PORT", "type": "integer", "presence": { "default": "3000" } },
                { "name": "DB_HOST", "type": "string" },
                { "name": "DB_PASSWORD", "type": "string", "presence": "optional" }
            ]
        })
        .to_string(),
    )
    .unwrap();
    path
}

/// Write a JSON config file into `dir`.
#[allow(dead_code)]
pub fn write_config(dir: &TempDir, body: serde_json::Value) -> PathBuf {
    let path = dir.path().join("config.json");
    std::fs::write(&path, body.to_string()).unwrap();
    path
}

//! Integration tests for the public loading API.
//!
//! These tests drive `load_config` and `ConfigLoader` the way a service
//! binary would: a JSON file on disk, variables in the process environment,
//! and a schema assembled from the exported builders.

use serde::Deserialize;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

use strata_config::{
    ConfigError, ConfigLoader, EnvSnapshot, FailurePolicy, FieldKind, FieldSpec, LoadOptions,
    RawValue, Schema, Typed, Value, load_config, mask_secrets, read_config_file,
};

fn service_schema() -> Schema {
    Schema::new()
        .field(FieldSpec::integer("PORT").with_default("3000").with_range(Some(1.0), Some(65535.0)))
        .field(FieldSpec::string("DB_HOST"))
        .field(FieldSpec::string("DB_PASSWORD").optional())
        .field(FieldSpec::list("ALLOWED_ORIGINS", FieldKind::Url).optional())
}

fn write_config(dir: &TempDir, body: serde_json::Value) -> std::path::PathBuf {
    let path = dir.path().join("config.json");
    fs::write(&path, body.to_string()).unwrap();
    path
}

/// `load_config` reads the process environment when no snapshot is given.
#[test]
#[serial]
fn test_load_config_uses_process_environment() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, serde_json::json!({ "PORT": "6000", "DB_HOST": "filehost" }));

    temp_env::with_vars(
        [
            ("DOTENV_DISABLED", Some("1")),
            ("DB_HOST", Some("envhost")),
            ("PORT", None),
        ],
        || {
            let options = LoadOptions {
                config_file_path: Some(path.clone()),
                quiet: true,
                ..LoadOptions::default()
            };
            let config = load_config(&service_schema(), &options).unwrap();

            assert_eq!(config.get_i64("PORT"), Some(6000));
            assert_eq!(config.get_str("DB_HOST"), Some("envhost"));
        },
    );
}

#[test]
#[serial]
fn test_load_config_reports_structured_failure() {
    temp_env::with_vars(
        [
            ("DOTENV_DISABLED", Some("1")),
            ("DB_HOST", None::<&str>),
            ("PORT", Some("99999")),
        ],
        || {
            let options = LoadOptions {
                quiet: true,
                ..LoadOptions::default()
            };
            let err = load_config(&service_schema(), &options).unwrap_err();

            let failure = err.validation_failure().expect("structured failure");
            assert_eq!(failure.errors_for("DB_HOST"), ["Required".to_string()]);
            assert_eq!(failure.errors_for("PORT").len(), 1);
            assert!(err.to_string().starts_with("Invalid configuration"));
        },
    );
}

#[test]
#[serial]
fn test_load_config_generic_policy() {
    temp_env::with_vars(
        [("DOTENV_DISABLED", Some("1")), ("DB_HOST", None::<&str>)],
        || {
            let options = LoadOptions {
                failure_policy: FailurePolicy::Generic,
                quiet: true,
                ..LoadOptions::default()
            };
            let err = load_config(&service_schema(), &options).unwrap_err();

            assert!(matches!(err, ConfigError::InvalidConfiguration));
        },
    );
}

#[derive(Debug, Deserialize)]
struct ServiceConfig {
    #[serde(rename = "PORT")]
    port: u16,
    #[serde(rename = "DB_HOST")]
    db_host: String,
    #[serde(rename = "ALLOWED_ORIGINS", default)]
    allowed_origins: Vec<String>,
}

#[test]
fn test_typed_struct_from_file_and_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        serde_json::json!({
            "DB_HOST": "filehost",
            "ALLOWED_ORIGINS": ["https://a.example.com/", "https://b.example.com"]
        }),
    );

    let config: ServiceConfig = ConfigLoader::new()
        .with_config_path(&path)
        .with_env([("PORT", "8443")].into_iter().collect())
        .quiet()
        .load(&Typed::<ServiceConfig>::new(service_schema()))
        .unwrap();

    assert_eq!(config.port, 8443);
    assert_eq!(config.db_host, "filehost");
    assert_eq!(
        config.allowed_origins,
        vec!["https://a.example.com", "https://b.example.com"]
    );
}

#[test]
fn test_masking_for_logging_keeps_validated_values_intact() {
    let loader = ConfigLoader::new()
        .with_env(
            [("DB_HOST", "localhost"), ("DB_PASSWORD", "supersecret")]
                .into_iter()
                .collect(),
        )
        .with_secret_keys(["DB_PASSWORD"])
        .quiet();

    let config = loader.load(&service_schema()).unwrap();
    let for_logs = config.masked(loader.secret_keys());

    assert_eq!(config.get_str("DB_PASSWORD"), Some("supersecret"));
    assert_eq!(for_logs.get("DB_PASSWORD"), Some(&Value::String("****".into())));
    assert_eq!(
        mask_secrets(&loader.merged(), loader.secret_keys()).get("DB_PASSWORD"),
        Some(&RawValue::from("****"))
    );
}

#[test]
fn test_malformed_file_falls_back_to_environment() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "not json at all").unwrap();

    assert!(read_config_file(&path).is_err());

    let config = ConfigLoader::new()
        .with_config_path(&path)
        .with_env(EnvSnapshot::from_iter([("DB_HOST", "envhost")]))
        .quiet()
        .load(&service_schema())
        .unwrap();

    assert_eq!(config.get_str("DB_HOST"), Some("envhost"));
    assert_eq!(config.get_i64("PORT"), Some(3000));
}

#[test]
fn test_schema_from_json_document() {
    let schema: Schema = serde_json::from_value(serde_json::json!({
        "fields": [
            { "name": "PORT", "type": "integer", "presence": { "default": "3000" } },
            { "name": "LOG_LEVEL", "type": "string", "constraints": [ { "one_of": ["debug", "info"] } ] }
        ]
    }))
    .unwrap();

    let config = ConfigLoader::new()
        .with_env([("LOG_LEVEL", "info")].into_iter().collect())
        .quiet()
        .load(&schema)
        .unwrap();

    assert_eq!(config.get_i64("PORT"), Some(3000));
    assert_eq!(config.get_str("LOG_LEVEL"), Some("info"));
}

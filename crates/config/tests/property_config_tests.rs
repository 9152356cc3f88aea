//! Property-based tests for merging, masking and validation.
//!
//! These tests use randomly generated key/value sets to check the
//! precedence and masking laws independently of any particular fixture.
//!
//! Test coverage:
//! - Merge: environment always wins, file-only keys always survive
//! - Masking: secret keys are redacted, everything else is untouched
//! - Validation: feeding validated output back in yields the same output

use proptest::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

use strata_config::{
    EnvSnapshot, FieldKind, FieldSpec, NoopDiagnostics, RawConfig, RawValue, Schema, mask_secrets,
    merge,
};

/// Strategy for generating environment-style keys.
fn key_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9_]{0,11}".prop_map(String::from)
}

/// Strategy for generating string values, including empty ones.
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ._:/-]{0,24}".prop_map(String::from)
}

fn map_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map(key_strategy(), value_strategy(), 0..12)
}

fn write_layer(dir: &TempDir, layer: &BTreeMap<String, String>) -> std::path::PathBuf {
    let path = dir.path().join("config.json");
    fs::write(&path, serde_json::to_string(layer).unwrap()).unwrap();
    path
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every environment key appears in the merge with the environment's value.
    #[test]
    fn test_environment_always_wins(file in map_strategy(), env in map_strategy()) {
        let dir = TempDir::new().unwrap();
        let path = write_layer(&dir, &file);
        let snapshot: EnvSnapshot = env.clone().into_iter().collect();

        let merged = merge(Some(&path), &snapshot, &NoopDiagnostics);

        for (key, value) in &env {
            prop_assert_eq!(merged.get(key), Some(&RawValue::String(value.clone())));
        }
    }

    /// Keys present only in the file survive the merge unchanged.
    #[test]
    fn test_file_only_keys_survive(file in map_strategy(), env in map_strategy()) {
        let dir = TempDir::new().unwrap();
        let path = write_layer(&dir, &file);
        let snapshot: EnvSnapshot = env.clone().into_iter().collect();

        let merged = merge(Some(&path), &snapshot, &NoopDiagnostics);

        for (key, value) in file.iter().filter(|(key, _)| !env.contains_key(*key)) {
            prop_assert_eq!(merged.get(key), Some(&RawValue::String(value.clone())));
        }
        let expected_keys = file.keys().chain(env.keys()).collect::<std::collections::BTreeSet<_>>();
        prop_assert_eq!(merged.len(), expected_keys.len());
    }

    /// Masking only touches secret keys with non-empty values.
    #[test]
    fn test_masking_touches_only_truthy_secrets(
        config in map_strategy(),
        secrets in prop::collection::vec(key_strategy(), 0..4),
    ) {
        let raw: RawConfig = config.clone().into_iter().collect();

        let masked = mask_secrets(&raw, &secrets);

        prop_assert_eq!(masked.len(), raw.len());
        for (key, value) in &config {
            let expected = if secrets.contains(key) && !value.is_empty() {
                RawValue::from("****")
            } else {
                RawValue::String(value.clone())
            };
            prop_assert_eq!(masked.get(key), Some(&expected));
        }
    }

    /// Validated output, converted back to raw form, validates to itself.
    #[test]
    fn test_validation_is_idempotent(
        port in 1u16..=65535,
        host in "[a-z]{1,12}",
        debug in any::<bool>(),
        ratio in -1000.0f64..1000.0,
    ) {
        let schema = Schema::new()
            .field(FieldSpec::integer("PORT"))
            .field(FieldSpec::string("DB_HOST"))
            .field(FieldSpec::bool("DEBUG"))
            .field(FieldSpec::float("RATIO"))
            .field(FieldSpec::list("TAGS", FieldKind::String).optional());
        let raw: RawConfig = [
            ("PORT", port.to_string()),
            ("DB_HOST", host),
            ("DEBUG", debug.to_string()),
            ("RATIO", ratio.to_string()),
        ]
        .into_iter()
        .collect();

        let first = schema.evaluate(&raw).unwrap();
        let second = schema.evaluate(&first.to_raw()).unwrap();

        prop_assert_eq!(first, second);
    }
}

//! A malformed `.env` through the library entry points.
//!
//! Kept in its own test binary: `load_dotenv` remembers a successful load
//! for the lifetime of the process, and the test changes the working
//! directory.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use strata_config::{
    ConfigError, ConfigFileError, ConfigLoader, Diagnostics, FieldSpec, LoadOptions, Schema,
    ValidationFailure, load_config, load_dotenv,
};

#[derive(Clone, Default)]
struct RecordingDiagnostics {
    dotenv_errors: Arc<Mutex<Vec<ConfigError>>>,
}

impl Diagnostics for RecordingDiagnostics {
    fn dotenv_failed(&self, error: &ConfigError) {
        self.dotenv_errors.lock().unwrap().push(error.clone());
    }

    fn config_file_skipped(&self, _path: &Path, _error: &ConfigFileError) {}

    fn validation_failed(&self, _failure: &ValidationFailure) {}
}

fn host_schema() -> Schema {
    Schema::new().field(FieldSpec::string("STRATA_BROKEN_DB_HOST"))
}

#[test]
fn test_malformed_dotenv_does_not_fail_the_load() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "STRATA_BROKEN_GOOD=1\nINVALID LINE\n").unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    temp_env::with_vars(
        [
            ("DOTENV_DISABLED", None::<&str>),
            ("STRATA_BROKEN_DB_HOST", Some("envhost")),
            ("STRATA_BROKEN_GOOD", None),
            ("STRATA_BROKEN_LATER", None),
        ],
        || {
            let options = LoadOptions {
                quiet: true,
                ..LoadOptions::default()
            };
            let config = load_config(&host_schema(), &options).unwrap();
            assert_eq!(config.get_str("STRATA_BROKEN_DB_HOST"), Some("envhost"));

            // Lines before the malformed one were applied.
            assert_eq!(std::env::var("STRATA_BROKEN_GOOD").as_deref(), Ok("1"));

            let diagnostics = RecordingDiagnostics::default();
            let config = ConfigLoader::new()
                .with_diagnostics(diagnostics.clone())
                .load_dotenv()
                .load(&host_schema())
                .unwrap();
            assert_eq!(config.get_str("STRATA_BROKEN_DB_HOST"), Some("envhost"));
            let recorded = diagnostics.dotenv_errors.lock().unwrap();
            assert_eq!(recorded.len(), 1);
            assert!(matches!(recorded[0], ConfigError::DotenvParse { .. }));
            drop(recorded);

            // A failed load is not remembered, so a fixed file is picked up.
            fs::write(dir.path().join(".env"), "STRATA_BROKEN_LATER=fixed\n").unwrap();
            load_dotenv().unwrap();
            assert_eq!(std::env::var("STRATA_BROKEN_LATER").as_deref(), Ok("fixed"));
        },
    );
}

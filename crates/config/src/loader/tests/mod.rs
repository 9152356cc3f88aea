//! Tests for the load pipeline.
//!
//! Responsibilities:
//! - Test `.env` loading, gating and error hygiene.
//! - Test layer precedence and fail-soft file handling.
//! - Test the `ConfigLoader` builder end to end.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::diagnostics::Diagnostics;
use crate::loader::{ConfigError, ConfigFileError};
use crate::schema::ValidationFailure;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Diagnostics sink that records what it was told.
#[derive(Clone, Default)]
pub struct RecordingDiagnostics {
    pub dotenv_errors: Arc<Mutex<Vec<ConfigError>>>,
    pub skipped_files: Arc<Mutex<Vec<String>>>,
    pub failures: Arc<Mutex<Vec<ValidationFailure>>>,
}

impl Diagnostics for RecordingDiagnostics {
    fn dotenv_failed(&self, error: &ConfigError) {
        self.dotenv_errors.lock().unwrap().push(error.clone());
    }

    fn config_file_skipped(&self, path: &Path, _error: &ConfigFileError) {
        self.skipped_files
            .lock()
            .unwrap()
            .push(path.display().to_string());
    }

    fn validation_failed(&self, failure: &ValidationFailure) {
        self.failures.lock().unwrap().push(failure.clone());
    }
}

//! Diagnostics capability for the load pipeline.
//!
//! Responsibilities:
//! - Receive the non-fatal events the pipeline reports: a `.env` file that
//!   could not be loaded, a config file that was skipped, and a validation
//!   failure.
//! - Provide a `tracing` implementation and a silent one.
//!
//! Invariants:
//! - Diagnostics never see raw configuration values, only paths, field names
//!   and issue messages.

use std::path::Path;

use crate::loader::{ConfigError, ConfigFileError};
use crate::schema::ValidationFailure;

/// Sink for pipeline events that do not abort a load on their own.
pub trait Diagnostics: Send + Sync {
    /// The `.env` file could not be loaded; the load continues without it.
    fn dotenv_failed(&self, error: &ConfigError);

    /// A config file existed but contributed nothing.
    fn config_file_skipped(&self, path: &Path, error: &ConfigFileError);

    /// Validation rejected the merged configuration.
    fn validation_failed(&self, failure: &ValidationFailure);
}

/// Emits events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn dotenv_failed(&self, error: &ConfigError) {
        tracing::warn!(error = %error, "Could not load .env file, continuing without it");
    }

    fn config_file_skipped(&self, path: &Path, error: &ConfigFileError) {
        tracing::warn!(
            path = %path.display(),
            error = %error,
            "Could not parse config file, continuing without it"
        );
    }

    fn validation_failed(&self, failure: &ValidationFailure) {
        let fields: Vec<&str> = failure.failed_fields().collect();
        tracing::error!(
            fields = ?fields,
            field_errors = ?failure.field_errors(),
            form_errors = ?failure.form_errors(),
            "Configuration validation error"
        );
    }
}

/// Discards every event. Used by tests and by `ConfigLoader::quiet`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn dotenv_failed(&self, _error: &ConfigError) {}

    fn config_file_skipped(&self, _path: &Path, _error: &ConfigFileError) {}

    fn validation_failed(&self, _failure: &ValidationFailure) {}
}

//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` that merges the file and
//!   environment layers and validates the result.
//! - Carry the caller's secret keys for producing masked copies.
//!
//! Does NOT handle:
//! - Reading the file layer (delegated to `merge.rs` / `file.rs`).
//! - Coercion rules (delegated to the `Validate` implementation).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over config file values.
//! - When no snapshot is supplied, the environment is captured at load time.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading;
//!   its failures are diagnostics, never errors.
//! - Masking is never applied to the value returned by `load()`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::dotenv;
use super::env::EnvSnapshot;
use super::error::ConfigError;
use super::merge::merge;
use crate::diagnostics::{Diagnostics, NoopDiagnostics, TracingDiagnostics};
use crate::schema::{FailurePolicy, Validate, validate};
use crate::secrets::mask_secrets;
use crate::value::RawConfig;

/// Configuration loader that merges layers and validates the result.
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    secret_keys: Vec<String>,
    env: Option<EnvSnapshot>,
    diagnostics: Arc<dyn Diagnostics>,
    failure_policy: FailurePolicy,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self {
            config_path: None,
            secret_keys: Vec::new(),
            env: None,
            diagnostics: Arc::new(TracingDiagnostics),
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Load environment variables from .env file if present.
    ///
    /// Succeeds at most once per process; see [`dotenv::load_dotenv`]. A
    /// malformed or unreadable file is reported to the diagnostics sink and
    /// the load continues without it, so set diagnostics before calling this.
    pub fn load_dotenv(self) -> Self {
        if let Err(e) = dotenv::load_dotenv() {
            self.diagnostics.dotenv_failed(&e);
        }
        self
    }

    /// Set the JSON config file merged beneath the environment.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Set the keys redacted by [`ConfigLoader::masked_merged`].
    pub fn with_secret_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.secret_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Use an explicit environment snapshot instead of capturing one.
    pub fn with_env(mut self, env: EnvSnapshot) -> Self {
        self.env = Some(env);
        self
    }

    /// Replace the diagnostics sink.
    pub fn with_diagnostics(mut self, diagnostics: impl Diagnostics + 'static) -> Self {
        self.diagnostics = Arc::new(diagnostics);
        self
    }

    /// Discard diagnostics (no warnings, no validation error logs).
    pub fn quiet(self) -> Self {
        self.with_diagnostics(NoopDiagnostics)
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn secret_keys(&self) -> &[String] {
        &self.secret_keys
    }

    /// Merge the file and environment layers without validating.
    pub fn merged(&self) -> RawConfig {
        match &self.env {
            Some(env) => merge(self.config_path(), env, self.diagnostics.as_ref()),
            None => merge(
                self.config_path(),
                &EnvSnapshot::capture(),
                self.diagnostics.as_ref(),
            ),
        }
    }

    /// The merged layers with the configured secret keys redacted.
    pub fn masked_merged(&self) -> RawConfig {
        mask_secrets(&self.merged(), &self.secret_keys)
    }

    /// Merge the layers and validate them.
    ///
    /// # Errors
    ///
    /// `ConfigError::Validation` or `ConfigError::InvalidConfiguration`,
    /// depending on the failure policy, when validation rejects the input.
    pub fn load<V>(&self, validator: &V) -> Result<V::Output, ConfigError>
    where
        V: Validate + ?Sized,
    {
        let raw = self.merged();
        let output = validate(validator, &raw, self.diagnostics.as_ref())
            .map_err(|failure| self.failure_policy.into_error(failure))?;
        tracing::debug!(
            config_path = ?self.config_path,
            "Configuration loaded and validated"
        );
        Ok(output)
    }
}

//! Options struct and the one-call entry point.

use std::path::PathBuf;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::schema::{FailurePolicy, Validate};

/// Options recognized by [`load_config`].
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// JSON file merged beneath environment variables.
    pub config_file_path: Option<PathBuf>,
    /// Keys to redact when the caller logs the configuration. Masking is
    /// never applied automatically.
    pub secret_keys: Vec<String>,
    pub failure_policy: FailurePolicy,
    /// Suppress diagnostics (the explicit replacement for "test mode").
    pub quiet: bool,
}

impl ConfigLoader {
    /// Build a loader from [`LoadOptions`].
    pub fn from_options(options: &LoadOptions) -> Self {
        let mut loader = ConfigLoader::new()
            .with_secret_keys(options.secret_keys.iter().cloned())
            .with_failure_policy(options.failure_policy);
        if let Some(path) = &options.config_file_path {
            loader = loader.with_config_path(path.clone());
        }
        if options.quiet {
            loader = loader.quiet();
        }
        loader
    }
}

/// Load `.env` (once per process), merge the layers and validate them.
///
/// A bad `.env` file is reported through diagnostics, not returned.
///
/// # Errors
///
/// Only validation failures, shaped by `options.failure_policy`.
pub fn load_config<V>(validator: &V, options: &LoadOptions) -> Result<V::Output, ConfigError>
where
    V: Validate + ?Sized,
{
    ConfigLoader::from_options(options)
        .load_dotenv()
        .load(validator)
}

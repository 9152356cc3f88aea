//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for every failure a load can surface.
//!
//! Does NOT handle:
//! - Config file read/parse failures, which never reach the caller of a
//!   load (see `file.rs` for `ConfigFileError`).
//!
//! Invariants:
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.
//! - Validation errors carry field names and messages, never field values.

use std::io::ErrorKind;
use thiserror::Error;

use crate::schema::ValidationFailure;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    ///
    /// SAFETY: This error does not include any raw dotenv content.
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,

    /// Validation failed under `FailurePolicy::Generic`.
    #[error("Invalid configuration")]
    InvalidConfiguration,

    /// Validation failed under `FailurePolicy::Structured`.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
}

impl ConfigError {
    /// The structured failure, when there is one.
    pub fn validation_failure(&self) -> Option<&ValidationFailure> {
        match self {
            ConfigError::Validation(failure) => Some(failure),
            _ => None,
        }
    }

    /// True for both validation policies.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ConfigError::Validation(_) | ConfigError::InvalidConfiguration
        )
    }
}

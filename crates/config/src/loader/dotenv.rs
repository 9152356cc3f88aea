//! One-time `.env` ingestion.
//!
//! Responsibilities:
//! - Load `.env` from the working directory into the process environment.
//! - Remember a successful load so later calls in the same process do nothing.
//! - Map `dotenvy` failures to `ConfigError` without echoing file content.
//!
//! Does NOT handle:
//! - Deciding whether a failure is fatal. The CLI fails at startup; the
//!   library's `ConfigLoader::load_dotenv` reports it and carries on.
//!
//! Invariants:
//! - Variables already present in the process environment are never overwritten.
//! - A missing `.env` file is not an error.
//! - `DOTENV_DISABLED=1` or `DOTENV_DISABLED=true` skips loading entirely.
//! - Failed or disabled loads are not remembered; the next call tries again.

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use super::error::ConfigError;
use crate::constants::{DOTENV_DISABLED_VAR, DOTENV_FILE_NAME};

static DOTENV_LOADED: Mutex<bool> = Mutex::new(false);

/// Check if dotenv loading is disabled via environment variable.
fn dotenv_disabled() -> bool {
    matches!(
        std::env::var(DOTENV_DISABLED_VAR).ok().as_deref(),
        Some("true") | Some("1")
    )
}

/// Check if a dotenv error indicates the file was not found.
fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}

/// Load `.env` from the current working directory, once per process.
///
/// The first successful call reads the file; later calls return `Ok(())`
/// without touching the filesystem again. A failed or disabled call is
/// not cached.
///
/// # Errors
///
/// Returns an error if:
/// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
/// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
pub fn load_dotenv() -> Result<(), ConfigError> {
    let mut loaded = DOTENV_LOADED.lock().unwrap_or_else(PoisonError::into_inner);
    if *loaded || dotenv_disabled() {
        return Ok(());
    }

    match std::env::current_dir() {
        Ok(cwd) => load_dotenv_from(&cwd.join(DOTENV_FILE_NAME))?,
        Err(e) => tracing::debug!(error = %e, "No working directory, skipping .env"),
    }
    *loaded = true;
    Ok(())
}

/// Load an explicit dotenv file into the process environment, uncached.
///
/// Same rules as [`load_dotenv`]: missing files are ignored, the
/// `DOTENV_DISABLED` gate is honored, and existing variables win.
///
/// A parse error does not roll back: lines before the malformed one have
/// already been applied to the process environment when `Err` is returned.
pub fn load_dotenv_from(path: &Path) -> Result<(), ConfigError> {
    if dotenv_disabled() {
        tracing::debug!("DOTENV_DISABLED is set, skipping .env loading");
        return Ok(());
    }

    match dotenvy::from_path(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            Ok(())
        }
        Err(e) if is_not_found(&e) => Ok(()),
        Err(dotenvy::Error::LineParse(_, idx)) => {
            Err(ConfigError::DotenvParse { error_index: idx })
        }
        Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
            kind: io_err.kind(),
        }),
        Err(_) => Err(ConfigError::DotenvUnknown),
    }
}

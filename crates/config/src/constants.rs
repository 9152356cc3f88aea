//! Centralized constants for the strata workspace.
//!
//! Names of the environment variables the tool itself reads, file names,
//! and literals shared between the merger, the validator and the masker.

// =============================================================================
// Environment & Files
// =============================================================================

/// Environment variable that, when set to `1` or `true`, skips `.env` loading.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";

/// Name of the dotenv file read from the working directory.
pub const DOTENV_FILE_NAME: &str = ".env";

/// Environment variable the CLI reads as the default `--config` value.
pub const CONFIG_PATH_ENV_VAR: &str = "STRATA_CONFIG_PATH";

// =============================================================================
// Masking
// =============================================================================

/// Replacement written over secret values in masked copies.
pub const REDACTION_MARKER: &str = "****";

// =============================================================================
// Coercion
// =============================================================================

/// Separator used when a list field arrives as a single string.
pub const LIST_SEPARATOR: char = ',';

/// Strings accepted as `true` by lenient boolean coercion (compared case-insensitively).
pub const TRUE_LITERALS: &[&str] = &["true", "1", "yes", "on"];

/// Strings accepted as `false` by lenient boolean coercion (compared case-insensitively).
pub const FALSE_LITERALS: &[&str] = &["false", "0", "no", "off"];

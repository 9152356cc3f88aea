//! Secret masking for log-safe copies of raw configuration.
//!
//! Responsibilities:
//! - Replace the values of caller-named keys with `REDACTION_MARKER`.
//!
//! Does NOT handle:
//! - Deciding which keys are secret (the caller supplies them).
//! - Masking validated output (see `TypedConfig::masked`).
//!
//! Invariants:
//! - The input is never modified; masking works on a shallow copy.
//! - Only truthy values are replaced; absent keys are ignored.

use crate::constants::REDACTION_MARKER;
use crate::value::{RawConfig, RawValue};

/// Return a copy of `config` with the values of `secret_keys` redacted.
pub fn mask_secrets<S: AsRef<str>>(config: &RawConfig, secret_keys: &[S]) -> RawConfig {
    let mut masked = config.clone();
    for key in secret_keys {
        if let Some(value) = masked.get_mut(key.as_ref())
            && value.is_truthy()
        {
            *value = RawValue::from(REDACTION_MARKER);
        }
    }
    masked
}

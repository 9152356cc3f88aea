//! Layered configuration loading for small services.
//!
//! This crate merges an optional JSON config file, a `.env` file and the
//! process environment (environment wins), then validates and coerces the
//! result against a caller-supplied schema.
//!
//! ```no_run
//! use strata_config::{FieldSpec, LoadOptions, Schema, load_config};
//!
//! let schema = Schema::new()
//!     .field(FieldSpec::integer("PORT").with_default("3000"))
//!     .field(FieldSpec::string("DB_HOST"));
//!
//! let options = LoadOptions {
//!     config_file_path: Some("config.json".into()),
//!     ..LoadOptions::default()
//! };
//! let config = load_config(&schema, &options)?;
//! assert!(config.get_i64("PORT").is_some());
//! # Ok::<(), strata_config::ConfigError>(())
//! ```

pub mod constants;
pub mod diagnostics;
mod loader;
pub mod schema;
mod secrets;
mod value;

pub use diagnostics::{Diagnostics, NoopDiagnostics, TracingDiagnostics};
pub use loader::{
    ConfigError, ConfigFileError, ConfigLoader, EnvSnapshot, LoadOptions, load_config,
    load_dotenv, load_dotenv_from, merge, read_config_file,
};
pub use schema::{
    Coercion, Constraint, FailurePolicy, FieldKind, FieldSpec, Issue, IssueKind, Presence, Rule,
    Schema, Typed, TypedConfig, Validate, ValidationFailure, Value, validate,
};
pub use secrets::mask_secrets;
pub use value::{RawConfig, RawValue};

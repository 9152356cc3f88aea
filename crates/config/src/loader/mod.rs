//! Source merging and the load pipeline.
//!
//! Responsibilities:
//! - Load `.env` into the process environment once per process.
//! - Read the optional JSON config file, failing soft on bad content.
//! - Overlay an environment snapshot on the file layer.
//! - Provide a builder-pattern `ConfigLoader` that runs merge + validate.
//!
//! Does NOT handle:
//! - Coercion or validation rules (see `schema`).
//! - Masking (see `secrets`).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over config file values.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before any `.env` file is read.

mod builder;
mod dotenv;
mod env;
mod error;
mod file;
mod merge;
mod options;

pub use builder::ConfigLoader;
pub use dotenv::{load_dotenv, load_dotenv_from};
pub use env::EnvSnapshot;
pub use error::ConfigError;
pub use file::{ConfigFileError, read_config_file};
pub use merge::merge;
pub use options::{LoadOptions, load_config};

#[cfg(test)]
mod tests;

//! `strata check`: validate the merged layers against a schema file.

use anyhow::{Context, Result};
use std::path::Path;
use strata_config::{ConfigError, FailurePolicy, Schema};

use super::loader_for;
use crate::args::SourceArgs;
use crate::output::{OutputFormat, render};

pub fn run(schema_path: &Path, source: &SourceArgs, output: &str, generic_errors: bool) -> Result<()> {
    let format = OutputFormat::parse(output)?;
    let schema = read_schema(schema_path)?;

    let policy = if generic_errors {
        FailurePolicy::Generic
    } else {
        FailurePolicy::Structured
    };
    let loader = loader_for(source).with_failure_policy(policy);

    match loader.load(&schema) {
        Ok(config) => {
            let masked = config.masked(loader.secret_keys());
            println!("{}", render(&masked, format)?);
            Ok(())
        }
        Err(err) => {
            if format == OutputFormat::Json
                && let ConfigError::Validation(failure) = &err
            {
                println!("{}", serde_json::to_string_pretty(failure)?);
            }
            Err(err).context("Configuration check failed")
        }
    }
}

fn read_schema(path: &Path) -> Result<Schema> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse schema file {}", path.display()))
}

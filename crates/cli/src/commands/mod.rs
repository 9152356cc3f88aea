//! Command handlers.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the handler for each subcommand.
//! - Build a `ConfigLoader` from the shared source options.

mod check;
mod merged;

use anyhow::Result;
use strata_config::ConfigLoader;

use crate::args::{Cli, Commands, SourceArgs};

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check {
            schema,
            source,
            output,
            generic_errors,
        } => check::run(&schema, &source, &output, generic_errors),
        Commands::Merged { source } => merged::run(&source),
    }
}

/// A loader reading the process environment plus the optional config file.
fn loader_for(source: &SourceArgs) -> ConfigLoader {
    let mut loader = ConfigLoader::new().with_secret_keys(source.secrets.iter().cloned());
    if let Some(path) = source.config_path() {
        loader = loader.with_config_path(path.clone());
    }
    loader
}

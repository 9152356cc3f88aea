//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Read `STRATA_CONFIG_PATH` as the default for `--config`.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `commands` module).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "Strata - Merge, validate and inspect layered configuration", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  strata check --schema schema.json --config config.json\n  strata check --schema schema.json --secret DB_PASSWORD --output json\n  strata merged --config config.json --secret API_KEY\n"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand that reads the layers.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// JSON config file merged beneath environment variables.
    ///
    /// Can also be set via STRATA_CONFIG_PATH environment variable.
    #[arg(long = "config", env = "STRATA_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Key whose value is masked in output (repeatable)
    #[arg(long = "secret", value_name = "KEY")]
    pub secrets: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the merged configuration against a schema file
    Check {
        /// JSON schema document describing the expected fields
        #[arg(long, value_name = "FILE")]
        schema: PathBuf,

        #[command(flatten)]
        source: SourceArgs,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: String,

        /// Report failures without per-field detail
        #[arg(long)]
        generic_errors: bool,
    },

    /// Print the merged configuration before validation
    Merged {
        #[command(flatten)]
        source: SourceArgs,
    },
}

impl SourceArgs {
    /// The config path, ignoring blank values so an empty env var falls back to none.
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.config_path
            .as_ref()
            .filter(|path| !path.to_string_lossy().trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_parses_repeated_secrets() {
        let cli = Cli::try_parse_from([
            "strata",
            "check",
            "--schema",
            "schema.json",
            "--secret",
            "DB_PASSWORD",
            "--secret",
            "API_KEY",
        ])
        .unwrap();

        match cli.command {
            Commands::Check {
                schema,
                source,
                output,
                generic_errors,
            } => {
                assert_eq!(schema, PathBuf::from("schema.json"));
                assert_eq!(source.secrets, ["DB_PASSWORD", "API_KEY"]);
                assert_eq!(output, "text");
                assert!(!generic_errors);
            }
            Commands::Merged { .. } => panic!("expected check"),
        }
    }

    #[test]
    fn test_check_requires_schema() {
        assert!(Cli::try_parse_from(["strata", "check"]).is_err());
    }

    #[test]
    fn test_blank_config_path_is_ignored() {
        let source = SourceArgs {
            config_path: Some(PathBuf::from("  ")),
            secrets: Vec::new(),
        };
        assert!(source.config_path().is_none());
    }
}

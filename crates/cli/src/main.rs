//! Strata CLI - Inspect and validate layered service configuration.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Run the merge and validation pipeline from `strata-config`.
//! - Print masked results and map failures to structured exit codes.
//!
//! Does NOT handle:
//! - Merge, coercion or masking rules (see `crates/config`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Secret values are masked before anything reaches stdout.
//! - Without `RUST_LOG`, warnings (such as a skipped config file) are shown.

mod args;
mod commands;
mod error;
mod output;

use args::Cli;
use clap::Parser;
use error::{ExitCode, ExitCodeExt};
use strata_config::load_dotenv;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    // The library reports a bad .env as a warning; the CLI refuses to start instead.
    if let Err(e) = load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match commands::run(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

//! `strata merged`: print the merged layers, masked, without validating.

use anyhow::Result;

use super::loader_for;
use crate::args::SourceArgs;

pub fn run(source: &SourceArgs) -> Result<()> {
    let merged = loader_for(source).masked_merged();
    tracing::debug!(keys = merged.len(), "Printing merged configuration");
    println!("{}", serde_json::to_string_pretty(&merged)?);
    Ok(())
}

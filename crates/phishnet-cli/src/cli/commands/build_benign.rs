//! `phishnet build-benign` – ranking file to benign URL list.

use anyhow::Result;
use phishnet_core::dataset;
use std::path::Path;

pub fn run_build_benign(input: &Path, output: &Path) -> Result<()> {
    let written = dataset::build_benign_from_ranking(input, output)?;
    println!("Wrote {} benign URLs to {}", written, output.display());
    Ok(())
}

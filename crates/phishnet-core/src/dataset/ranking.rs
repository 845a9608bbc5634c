//! Benign URL list from a domain popularity ranking (Tranco-style `rank,domain`).

use anyhow::{Context, Result};
use std::path::Path;

use super::URL_COLUMN;
use crate::error::require_input;

/// Converts a headerless `rank,domain` CSV into a benign source file with a
/// single `url` column. Returns the number of URLs written.
pub fn build_benign_from_ranking(input: &Path, output: &Path) -> Result<usize> {
    require_input(input, "download a Tranco top-sites list and save it there")?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(input)
        .with_context(|| format!("open {}", input.display()))?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create dir: {}", parent.display()))?;
    }
    let mut writer =
        csv::Writer::from_path(output).with_context(|| format!("create {}", output.display()))?;
    writer.write_record([URL_COLUMN])?;

    let mut total = 0usize;
    let mut written = 0usize;
    for record in reader.records() {
        let record = record.with_context(|| format!("read {}", input.display()))?;
        total += 1;
        let domain = record.get(1).unwrap_or("").trim();
        if domain.is_empty() {
            continue;
        }
        writer.write_record([format!("https://{domain}")])?;
        written += 1;
    }
    writer
        .flush()
        .with_context(|| format!("write {}", output.display()))?;

    tracing::info!(
        domains = total,
        urls = written,
        output = %output.display(),
        "built benign URL list from ranking"
    );
    Ok(written)
}

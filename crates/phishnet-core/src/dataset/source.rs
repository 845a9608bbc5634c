//! URL sources: locate the URL column and clean it.

use anyhow::Result;
use std::collections::HashSet;
use std::path::Path;

use crate::error::{require_input, PipelineError};
use crate::table::RawTable;

/// A recognized URL-bearing column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlColumn {
    pub name: &'static str,
    /// Column holds bare domains; `https://` is prepended to values without a scheme.
    pub domain_only: bool,
}

impl UrlColumn {
    const fn url(name: &'static str) -> Self {
        Self {
            name,
            domain_only: false,
        }
    }

    const fn domain(name: &'static str) -> Self {
        Self {
            name,
            domain_only: true,
        }
    }
}

/// Priority order for phishing feeds (PhishTank-style exports).
pub const PHISHING_URL_COLUMNS: &[UrlColumn] = &[
    UrlColumn::url("url"),
    UrlColumn::url("URL"),
    UrlColumn::url("phish_url"),
    UrlColumn::url("phish_site"),
];

/// Priority order for benign lists.
pub const BENIGN_URL_COLUMNS: &[UrlColumn] = &[
    UrlColumn::url("url"),
    UrlColumn::url("URL"),
    UrlColumn::domain("domain"),
    UrlColumn::url("site"),
];

/// Pulls the URL column out of `table`: first matching candidate wins,
/// empty cells are dropped, duplicates collapse to their first occurrence.
pub fn extract_urls(
    table: &RawTable,
    source_name: &str,
    candidates: &[UrlColumn],
) -> Result<Vec<String>, PipelineError> {
    let (col, spec) = candidates
        .iter()
        .find_map(|c| table.column_index(c.name).map(|idx| (idx, c)))
        .ok_or_else(|| PipelineError::NoUrlColumn {
            source_name: source_name.to_string(),
            candidates: candidates.iter().map(|c| c.name.to_string()).collect(),
            available: table.headers().to_vec(),
        })?;

    tracing::debug!(source = source_name, column = spec.name, "using URL column");

    let mut seen = HashSet::new();
    let urls = table
        .column(col)
        .filter(|cell| !cell.is_empty())
        .map(|cell| {
            if spec.domain_only && !cell.contains("://") {
                format!("https://{cell}")
            } else {
                cell.to_string()
            }
        })
        .filter(|url| seen.insert(url.clone()))
        .collect();
    Ok(urls)
}

/// Reads a CSV source and returns its cleaned, deduplicated URLs.
pub fn load_urls(path: &Path, source_name: &str, candidates: &[UrlColumn]) -> Result<Vec<String>> {
    require_input(
        path,
        &format!("place the {source_name} CSV there or set its path in the config"),
    )?;
    let table = RawTable::read_csv(path)?;
    let urls = extract_urls(&table, source_name, candidates)?;
    tracing::info!(
        source = source_name,
        path = %path.display(),
        rows = table.len(),
        urls = urls.len(),
        "loaded URL source"
    );
    Ok(urls)
}

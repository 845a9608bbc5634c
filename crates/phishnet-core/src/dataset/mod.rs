//! Labeled URL datasets.
//!
//! Loads the phishing and benign URL sources, balances and shuffles them into
//! one labeled dataset, and reads/writes the `url,label` raw dataset file.

mod assemble;
mod ranking;
mod source;

pub use assemble::{assemble, build_dataset, AssemblySummary};
pub use ranking::build_benign_from_ranking;
pub use source::{
    extract_urls, load_urls, UrlColumn, BENIGN_URL_COLUMNS, PHISHING_URL_COLUMNS,
};

use anyhow::{Context, Result};
use std::path::Path;

use crate::label::Label;
use crate::table::LABEL_COLUMN;

/// Name of the URL column in the raw dataset file.
pub const URL_COLUMN: &str = "url";

/// One raw URL with its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledUrl {
    pub url: String,
    pub label: Label,
}

impl LabeledUrl {
    pub fn new(url: impl Into<String>, label: Label) -> Self {
        Self {
            url: url.into(),
            label,
        }
    }
}

/// Writes the `url,label` raw dataset file, creating parent directories.
pub fn write_labeled_urls(path: &Path, rows: &[LabeledUrl]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create dir: {}", parent.display()))?;
    }
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    writer.write_record([URL_COLUMN, LABEL_COLUMN])?;
    for row in rows {
        let label = row.label.as_u8().to_string();
        writer.write_record([row.url.as_str(), label.as_str()])?;
    }
    writer
        .flush()
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

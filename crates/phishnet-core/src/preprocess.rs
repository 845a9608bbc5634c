//! Raw labeled URLs → numeric feature table.
//!
//! The output never carries the URL text: only the [`FEATURE_NAMES`] columns
//! in order, plus `label` when written to disk.

use anyhow::Result;
use std::path::Path;

use crate::dataset::{LabeledUrl, URL_COLUMN};
use crate::error::{require_input, PipelineError};
use crate::features::{extract, feature_names, FEATURE_NAMES};
use crate::label::Label;
use crate::table::{NumericTable, RawTable, LABEL_COLUMN};

/// Applies the shared feature extractor to every row.
pub fn process(raw: &[LabeledUrl]) -> NumericTable {
    NumericTable {
        columns: feature_names(),
        rows: raw.iter().map(|r| extract(&r.url).to_row()).collect(),
        labels: raw.iter().map(|r| r.label).collect(),
    }
}

/// Converts a loaded raw dataset table into labeled URLs. Both the `url` and
/// `label` columns must be present; missing URL cells become empty strings.
pub fn labeled_urls_from_table(table: &RawTable) -> Result<Vec<LabeledUrl>, PipelineError> {
    let url_col = table.require_column(URL_COLUMN)?;
    let label_col = table.require_column(LABEL_COLUMN)?;

    (0..table.len())
        .map(|row| {
            let value = table.cell(row, label_col);
            let label = Label::parse(value).ok_or_else(|| PipelineError::InvalidLabel {
                row,
                value: value.to_string(),
            })?;
            Ok(LabeledUrl::new(table.cell(row, url_col), label))
        })
        .collect()
}

/// Reads the `url,label` raw dataset file.
pub fn load_raw_dataset(path: &Path) -> Result<Vec<LabeledUrl>> {
    require_input(path, "run `phishnet assemble` first")?;
    let table = RawTable::read_csv(path)?;
    let rows = labeled_urls_from_table(&table)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "loaded raw dataset");
    Ok(rows)
}

/// Reads the raw dataset, extracts features and writes the processed file.
pub fn run_preprocess(raw_path: &Path, processed_path: &Path) -> Result<NumericTable> {
    let raw = load_raw_dataset(raw_path)?;
    let table = process(&raw);
    table.write_csv(processed_path)?;
    tracing::info!(
        path = %processed_path.display(),
        rows = table.len(),
        columns = FEATURE_NAMES.len() + 1,
        "wrote processed dataset"
    );
    Ok(table)
}

//! Typed pipeline errors.
//!
//! Stage functions return `anyhow::Result`; these values are raised inside it
//! so callers (and tests) can `downcast_ref::<PipelineError>()` to tell a
//! missing input from a schema problem or degenerate data.

use std::path::{Path, PathBuf};

use crate::label::Label;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A required input file does not exist.
    #[error("input not found at '{}'; {hint}", .path.display())]
    MissingInput { path: PathBuf, hint: String },

    /// The model artifact does not exist yet.
    #[error(
        "model file not found at '{}'; make sure you have run `phishnet train` first",
        .path.display()
    )]
    ModelNotFound { path: PathBuf },

    /// An expected column is absent from a loaded table.
    #[error("expected column '{column}' not found; available columns: {available:?}")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    /// None of the recognized URL column names is present in a source.
    #[error(
        "could not find a URL column in {source_name} (tried {candidates:?}); available columns: {available:?}"
    )]
    NoUrlColumn {
        source_name: String,
        candidates: Vec<String>,
        available: Vec<String>,
    },

    /// A label cell is not `0` or `1`.
    #[error("invalid label '{value}' at row {row}; expected 0 or 1")]
    InvalidLabel { row: usize, value: String },

    /// The model was fitted on different feature columns than the extractor produces.
    #[error("model feature columns {found:?} do not match extractor columns {expected:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// One class has no rows, so balancing is impossible.
    #[error("no {label} rows available; cannot balance classes")]
    EmptyClass { label: Label },

    /// Stratified splitting needs at least two rows per class.
    #[error("class {label} has only {count} row(s); stratified split needs at least 2")]
    TooFewForSplit { label: Label, count: usize },

    /// The split left the train or test partition empty.
    #[error("train/test split produced an empty partition")]
    EmptyPartition,

    /// The classifier rejected its training data.
    #[error("classifier fit failed: {0}")]
    Fit(String),
}

/// Fails with [`PipelineError::MissingInput`] unless `path` exists.
pub fn require_input(path: &Path, hint: &str) -> Result<(), PipelineError> {
    if path.exists() {
        Ok(())
    } else {
        Err(PipelineError::MissingInput {
            path: path.to_path_buf(),
            hint: hint.to_string(),
        })
    }
}

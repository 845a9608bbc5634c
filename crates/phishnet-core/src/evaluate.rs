//! Score a persisted model against the processed dataset.

use anyhow::Result;
use std::fmt;
use std::path::Path;

use crate::metrics::ClassificationReport;
use crate::model::ModelArtifact;
use crate::split::{stratified_split, SplitParams};
use crate::table::NumericTable;
use crate::train::load_processed;
use crate::error::PipelineError;

/// Which rows to score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvalMode {
    /// Re-run the training split and score only the test partition.
    #[default]
    HeldOut,
    /// Score every row of the table.
    Full,
}

impl fmt::Display for EvalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalMode::HeldOut => write!(f, "held-out"),
            EvalMode::Full => write!(f, "full"),
        }
    }
}

pub fn evaluate(
    model: &ModelArtifact,
    table: &NumericTable,
    mode: EvalMode,
    split: SplitParams,
) -> Result<ClassificationReport, PipelineError> {
    let table = table.select(&model.feature_names)?;
    let scored = match mode {
        EvalMode::HeldOut => {
            let indices = stratified_split(&table.labels, split.test_fraction, split.seed)?;
            table.subset(&indices.test)
        }
        EvalMode::Full => table,
    };

    tracing::info!(%mode, rows = scored.len(), "evaluating model");
    let predictions = model.predict(&scored.rows);
    Ok(ClassificationReport::compute(&scored.labels, &predictions))
}

/// Loads the artifact and the processed dataset, then evaluates.
pub fn run_evaluate(
    model_path: &Path,
    processed_path: &Path,
    mode: EvalMode,
    split: SplitParams,
) -> Result<ClassificationReport> {
    let model = ModelArtifact::load(model_path)?;
    let table = load_processed(processed_path)?;
    Ok(evaluate(&model, &table, mode, split)?)
}

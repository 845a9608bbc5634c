//! Fit the forest on a stratified training partition, score the held-out
//! partition, and persist the artifact.

use anyhow::Result;
use std::path::Path;

use crate::checksum;
use crate::config::ForestConfig;
use crate::error::{require_input, PipelineError};
use crate::metrics::ClassificationReport;
use crate::model::{Classifier, ModelArtifact, RandomForest};
use crate::split::{stratified_split, SplitParams};
use crate::table::{NumericTable, RawTable};

/// Result of one training run.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub artifact: ModelArtifact,
    pub report: ClassificationReport,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// A saved training run.
#[derive(Debug, Clone)]
pub struct TrainSummary {
    pub outcome: TrainOutcome,
    /// SHA-256 of the artifact file as written.
    pub fingerprint: String,
}

/// Reads the processed dataset through the numeric-only filter.
pub fn load_processed(path: &Path) -> Result<NumericTable> {
    require_input(path, "run `phishnet preprocess` first")?;
    let table = NumericTable::from_raw(&RawTable::read_csv(path)?)?;
    tracing::info!(
        path = %path.display(),
        rows = table.len(),
        columns = ?table.columns,
        "loaded processed dataset"
    );
    Ok(table)
}

/// Splits, fits and scores. Nothing is written here.
pub fn train(
    table: &NumericTable,
    split: SplitParams,
    forest: ForestConfig,
) -> Result<TrainOutcome, PipelineError> {
    let indices = stratified_split(&table.labels, split.test_fraction, split.seed)?;
    let train_part = table.subset(&indices.train);
    let test_part = table.subset(&indices.test);

    tracing::info!(
        train_rows = train_part.len(),
        test_rows = test_part.len(),
        trees = forest.n_trees,
        "training random forest"
    );

    let mut model = RandomForest::new(forest, split.seed);
    model.fit(&train_part.rows, &train_part.labels)?;

    let predictions = model.predict(&test_part.rows);
    let report = ClassificationReport::compute(&test_part.labels, &predictions);
    tracing::info!(accuracy = report.accuracy, "held-out evaluation");

    Ok(TrainOutcome {
        artifact: ModelArtifact::new(table.columns.clone(), model),
        report,
        train_rows: train_part.len(),
        test_rows: test_part.len(),
    })
}

/// Loads the processed file, trains, and replaces the artifact at `model_path`.
pub fn run_train(
    processed_path: &Path,
    model_path: &Path,
    split: SplitParams,
    forest: ForestConfig,
) -> Result<TrainSummary> {
    let table = load_processed(processed_path)?;
    let outcome = train(&table, split, forest)?;
    outcome.artifact.save(model_path)?;
    let fingerprint = checksum::sha256_path(model_path)?;
    tracing::info!(
        path = %model_path.display(),
        sha256 = checksum::short(&fingerprint),
        "model saved"
    );
    Ok(TrainSummary {
        outcome,
        fingerprint,
    })
}

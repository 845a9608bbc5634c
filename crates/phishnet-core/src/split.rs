//! Seeded, label-stratified train/test split.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::label::Label;

/// Held-out fraction and seed; the Trainer and Evaluator must agree on both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitParams {
    pub test_fraction: f64,
    pub seed: u64,
}

impl From<&PipelineConfig> for SplitParams {
    fn from(cfg: &PipelineConfig) -> Self {
        Self {
            test_fraction: cfg.test_fraction,
            seed: cfg.seed,
        }
    }
}

/// Row indices of each partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Splits row indices so each class contributes `round(n_class * test_fraction)`
/// rows to the test partition. Per-class index lists are shuffled with one
/// RNG seeded from `seed`, so the same labels and seed give the same split.
pub fn stratified_split(
    labels: &[Label],
    test_fraction: f64,
    seed: u64,
) -> Result<SplitIndices, PipelineError> {
    tracing::debug!(rows = labels.len(), test_fraction, seed, "stratified split");
    let mut by_class: [Vec<usize>; 2] = [Vec::new(), Vec::new()];
    for (i, label) in labels.iter().enumerate() {
        by_class[label.index()].push(i);
    }

    for label in Label::ALL {
        let count = by_class[label.index()].len();
        if count == 1 {
            return Err(PipelineError::TooFewForSplit { label, count });
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();
    for class in by_class.iter_mut() {
        class.shuffle(&mut rng);
        let n_test = (class.len() as f64 * test_fraction).round() as usize;
        let n_test = n_test.min(class.len());
        test.extend_from_slice(&class[..n_test]);
        train.extend_from_slice(&class[n_test..]);
    }

    if train.is_empty() || test.is_empty() {
        return Err(PipelineError::EmptyPartition);
    }

    train.shuffle(&mut rng);
    test.shuffle(&mut rng);
    Ok(SplitIndices { train, test })
}

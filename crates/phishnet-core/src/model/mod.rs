//! Classifier capability and the persisted model artifact.
//!
//! The pipeline only relies on [`Classifier`]: a seedable `fit`, a
//! deterministic `predict`, and an optional `predict_proba`.

mod artifact;
mod forest;
mod tree;

pub use artifact::ModelArtifact;
pub use forest::RandomForest;
pub use tree::{DecisionTree, TreeParams};

use crate::error::PipelineError;
use crate::label::Label;

/// Binary classifier over dense numeric rows.
pub trait Classifier {
    fn fit(&mut self, x: &[Vec<f64>], y: &[Label]) -> Result<(), PipelineError>;

    fn predict(&self, x: &[Vec<f64>]) -> Vec<Label>;

    /// Per-row `[P(legitimate), P(phishing)]`, or `None` when the model has no
    /// probability output.
    fn predict_proba(&self, _x: &[Vec<f64>]) -> Option<Vec<[f64; 2]>> {
        None
    }
}

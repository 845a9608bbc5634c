//! Model artifact on disk: the fitted forest plus the ordered feature columns
//! it was fitted on. Written atomically, read fully on every load.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use super::{Classifier, RandomForest};
use crate::error::PipelineError;
use crate::label::Label;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub feature_names: Vec<String>,
    pub model: RandomForest,
}

impl ModelArtifact {
    pub fn new(feature_names: Vec<String>, model: RandomForest) -> Self {
        Self {
            feature_names,
            model,
        }
    }

    /// Replaces whatever is at `path`. The bytes go to a temp file in the same
    /// directory first, so a failed write never leaves a partial artifact.
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).with_context(|| format!("create dir: {}", dir.display()))?;

        let json = serde_json::to_vec(self).context("serialize model")?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("create temp file in {}", dir.display()))?;
        tmp.write_all(&json)
            .with_context(|| format!("write model: {}", path.display()))?;
        tmp.as_file()
            .sync_all()
            .with_context(|| format!("sync model: {}", path.display()))?;
        tmp.persist(path)
            .with_context(|| format!("replace model: {}", path.display()))?;
        Ok(())
    }

    /// Loads the artifact, or [`PipelineError::ModelNotFound`] if there is none.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PipelineError::ModelNotFound {
                    path: path.to_path_buf(),
                }
                .into())
            }
            Err(e) => return Err(e).with_context(|| format!("read model: {}", path.display())),
        };
        let artifact: Self = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse model: {}", path.display()))?;
        Ok(artifact)
    }

    /// Fails unless the model was fitted on exactly `expected`, in order.
    pub fn ensure_features(&self, expected: &[String]) -> Result<(), PipelineError> {
        if self.feature_names == expected {
            Ok(())
        } else {
            Err(PipelineError::FeatureMismatch {
                expected: expected.to_vec(),
                found: self.feature_names.clone(),
            })
        }
    }

    pub fn predict(&self, x: &[Vec<f64>]) -> Vec<Label> {
        self.model.predict(x)
    }

    pub fn predict_proba(&self, x: &[Vec<f64>]) -> Option<Vec<[f64; 2]>> {
        self.model.predict_proba(x)
    }
}

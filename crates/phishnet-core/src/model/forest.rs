//! Random forest: bagged CART trees with per-node feature subsampling.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::tree::{DecisionTree, TreeParams};
use super::Classifier;
use crate::config::ForestConfig;
use crate::error::PipelineError;
use crate::label::Label;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    seed: u64,
    n_features: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(config: ForestConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            n_features: 0,
            trees: Vec::new(),
        }
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    fn tree_params(&self) -> TreeParams {
        let sqrt = (self.n_features as f64).sqrt().floor() as usize;
        TreeParams {
            max_depth: self.config.max_depth,
            min_samples_split: self.config.min_samples_split,
            max_features: self.config.max_features.unwrap_or(sqrt).clamp(1, self.n_features.max(1)),
        }
    }

    fn validate(x: &[Vec<f64>], y: &[Label]) -> Result<usize, PipelineError> {
        if x.is_empty() {
            return Err(PipelineError::Fit("no training rows".into()));
        }
        if x.len() != y.len() {
            return Err(PipelineError::Fit(format!(
                "{} rows but {} labels",
                x.len(),
                y.len()
            )));
        }
        let width = x[0].len();
        if width == 0 {
            return Err(PipelineError::Fit("rows have no feature columns".into()));
        }
        if let Some(row) = x.iter().position(|r| r.len() != width) {
            return Err(PipelineError::Fit(format!(
                "row {row} has {} values, expected {width}",
                x[row].len()
            )));
        }
        if !Label::ALL.iter().all(|class| y.contains(class)) {
            return Err(PipelineError::Fit(
                "training labels contain a single class".into(),
            ));
        }
        Ok(width)
    }
}

impl Classifier for RandomForest {
    fn fit(&mut self, x: &[Vec<f64>], y: &[Label]) -> Result<(), PipelineError> {
        self.n_features = Self::validate(x, y)?;
        let params = self.tree_params();
        let n = x.len();

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.trees = (0..self.config.n_trees.max(1))
            .map(|_| {
                let mut tree_rng = ChaCha8Rng::seed_from_u64(rng.gen());
                let bootstrap: Vec<usize> = (0..n).map(|_| tree_rng.gen_range(0..n)).collect();
                DecisionTree::fit(x, y, bootstrap, &params, &mut tree_rng)
            })
            .collect();

        tracing::debug!(
            trees = self.trees.len(),
            rows = n,
            features = self.n_features,
            max_features = params.max_features,
            "fitted random forest"
        );
        Ok(())
    }

    fn predict(&self, x: &[Vec<f64>]) -> Vec<Label> {
        self.proba(x)
            .into_iter()
            .map(|p| {
                if p[1] > p[0] {
                    Label::Phishing
                } else {
                    Label::Legitimate
                }
            })
            .collect()
    }

    fn predict_proba(&self, x: &[Vec<f64>]) -> Option<Vec<[f64; 2]>> {
        Some(self.proba(x))
    }
}

impl RandomForest {
    fn proba(&self, x: &[Vec<f64>]) -> Vec<[f64; 2]> {
        x.iter()
            .map(|row| {
                if self.trees.is_empty() {
                    return [0.5, 0.5];
                }
                let mut sum = [0.0f64; 2];
                for tree in &self.trees {
                    let p = tree.predict_proba_row(row);
                    sum[0] += p[0];
                    sum[1] += p[1];
                }
                let n = self.trees.len() as f64;
                [sum[0] / n, sum[1] / n]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> ForestConfig {
        ForestConfig {
            n_trees: 15,
            ..ForestConfig::default()
        }
    }

    /// Phishing rows are long with many dots; legitimate rows are short.
    fn separable(n: usize) -> (Vec<Vec<f64>>, Vec<Label>) {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 0..n {
            let j = (i % 7) as f64;
            x.push(vec![20.0 + j, 1.0, 1.0]);
            y.push(Label::Legitimate);
            x.push(vec![80.0 + j, 5.0 + j, 0.0]);
            y.push(Label::Phishing);
        }
        (x, y)
    }

    #[test]
    fn learns_separable_data() {
        let (x, y) = separable(30);
        let mut forest = RandomForest::new(small_config(), 42);
        forest.fit(&x, &y).unwrap();
        assert_eq!(forest.n_trees(), 15);
        assert_eq!(forest.predict(&x), y);
        let proba = forest.predict_proba(&[vec![90.0, 9.0, 0.0]]).unwrap();
        assert!(proba[0][1] > 0.9);
        assert!((proba[0][0] + proba[0][1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn same_seed_same_forest() {
        let (x, y) = separable(10);
        let mut a = RandomForest::new(small_config(), 7);
        let mut b = RandomForest::new(small_config(), 7);
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn single_class_fit_fails() {
        let x = vec![vec![1.0], vec![2.0]];
        let y = vec![Label::Phishing, Label::Phishing];
        let mut forest = RandomForest::new(small_config(), 42);
        assert!(matches!(forest.fit(&x, &y), Err(PipelineError::Fit(_))));
        assert!(!forest.is_fitted());
    }

    #[test]
    fn empty_and_ragged_input_fail() {
        let mut forest = RandomForest::new(small_config(), 42);
        assert!(forest.fit(&[], &[]).is_err());
        let x = vec![vec![1.0, 2.0], vec![1.0]];
        let y = vec![Label::Phishing, Label::Legitimate];
        assert!(forest.fit(&x, &y).is_err());
    }

    #[test]
    fn max_features_defaults_to_sqrt() {
        let (x, y) = separable(5);
        let mut forest = RandomForest::new(small_config(), 1);
        forest.fit(&x, &y).unwrap();
        assert_eq!(forest.tree_params().max_features, 1);
        assert_eq!(forest.n_features(), 3);
    }
}

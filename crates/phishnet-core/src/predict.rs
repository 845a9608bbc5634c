//! Single-URL inference.

use anyhow::Result;
use std::fmt;
use std::path::Path;

use crate::error::PipelineError;
use crate::features::{extract, feature_names};
use crate::label::Label;
use crate::model::ModelArtifact;

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub url: String,
    pub label: Label,
    /// `[P(legitimate), P(phishing)]` when the model reports probabilities.
    pub probabilities: Option<[f64; 2]>,
}

impl Prediction {
    /// Probability of the predicted class, if available.
    pub fn confidence(&self) -> Option<f64> {
        self.probabilities.map(|p| p[self.label.index()])
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "URL: {}", self.url)?;
        write!(f, "Prediction: {}", self.label)?;
        if let Some(p) = self.probabilities {
            write!(f, "\nEstimated probabilities:")?;
            write!(f, "\n  Legitimate (0): {:.3}", p[0])?;
            write!(f, "\n  Phishing   (1): {:.3}", p[1])?;
        }
        Ok(())
    }
}

/// Classifies one URL with the same extractor the preprocessor uses.
pub fn predict(model: &ModelArtifact, url: &str) -> Result<Prediction, PipelineError> {
    model.ensure_features(&feature_names())?;

    let x = vec![extract(url).to_row()];
    let label = model
        .predict(&x)
        .first()
        .copied()
        .ok_or_else(|| PipelineError::Fit("model returned no prediction".into()))?;
    let probabilities = model
        .predict_proba(&x)
        .and_then(|rows| rows.first().copied());

    Ok(Prediction {
        url: url.to_string(),
        label,
        probabilities,
    })
}

/// Loads the artifact fresh and classifies `url`.
pub fn run_predict(model_path: &Path, url: &str) -> Result<Prediction> {
    let model = ModelArtifact::load(model_path)?;
    let prediction = predict(&model, url)?;
    tracing::debug!(
        url,
        label = %prediction.label,
        confidence = ?prediction.confidence(),
        "predicted"
    );
    Ok(prediction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ForestConfig;
    use crate::model::{Classifier, RandomForest};

    fn model(names: Vec<String>) -> ModelArtifact {
        let urls = [
            ("https://example.com", Label::Legitimate),
            ("https://rust-lang.org", Label::Legitimate),
            ("https://wikipedia.org", Label::Legitimate),
            ("http://login-secure.bank.verify-account.co/x/y/z?id=1&t=2", Label::Phishing),
            ("http://user@paypal.com.account-update.info/a/b?c=d", Label::Phishing),
            ("http://secure-login.apple.id-check.net/w/x/y?z=1", Label::Phishing),
        ];
        let x: Vec<Vec<f64>> = urls.iter().map(|(u, _)| extract(u).to_row()).collect();
        let y: Vec<Label> = urls.iter().map(|(_, l)| *l).collect();
        let mut forest = RandomForest::new(
            ForestConfig {
                n_trees: 25,
                ..ForestConfig::default()
            },
            42,
        );
        forest.fit(&x, &y).unwrap();
        ModelArtifact::new(names, forest)
    }

    #[test]
    fn predicts_with_probabilities() {
        let url = "http://user@login-secure.paypal.com.verify-account.info/a/b/c/d?id=1&t=2";
        let p = predict(&model(feature_names()), url).unwrap();
        assert_eq!(p.label, Label::Phishing);
        let proba = p.probabilities.unwrap();
        assert!((proba[0] + proba[1] - 1.0).abs() < 1e-9);
        assert!(p.confidence().unwrap() >= 0.5);
    }

    #[test]
    fn rejects_model_fitted_on_other_columns() {
        let mut names = feature_names();
        names.swap(0, 1);
        assert!(matches!(
            predict(&model(names), "https://example.com"),
            Err(PipelineError::FeatureMismatch { .. })
        ));
    }

    #[test]
    fn display_includes_probabilities_when_present() {
        let p = Prediction {
            url: "https://example.com".into(),
            label: Label::Legitimate,
            probabilities: Some([0.9, 0.1]),
        };
        assert_eq!(
            p.to_string(),
            "URL: https://example.com\nPrediction: Legitimate (0)\nEstimated probabilities:\n  Legitimate (0): 0.900\n  Phishing   (1): 0.100"
        );
        let bare = Prediction {
            probabilities: None,
            ..p
        };
        assert_eq!(
            bare.to_string(),
            "URL: https://example.com\nPrediction: Legitimate (0)"
        );
        assert_eq!(bare.confidence(), None);
    }

    #[test]
    fn missing_model_points_at_training() {
        let err = run_predict(Path::new("/nonexistent/m.json"), "https://x.y").unwrap_err();
        assert!(err.to_string().contains("phishnet train"));
    }
}

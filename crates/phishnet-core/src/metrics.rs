//! Classification report: per-class precision/recall/F1/support plus accuracy.
//!
//! Confusion counts are taken per class (one-vs-rest), so the report for the
//! phishing class reads the usual way (TP = phishing flagged as phishing).

use serde::Serialize;
use std::fmt;

use crate::label::Label;

/// Scores for one class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of true rows of this class.
    pub support: usize,
}

/// Averages across both classes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AverageMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    /// Indexed by [`Label::index`].
    pub classes: [ClassMetrics; 2],
    pub accuracy: f64,
    pub macro_avg: AverageMetrics,
    pub weighted_avg: AverageMetrics,
    pub total: usize,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den > 0 {
        num as f64 / den as f64
    } else {
        0.0
    }
}

fn harmonic(precision: f64, recall: f64) -> f64 {
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

impl ClassificationReport {
    /// Builds the report from true and predicted labels of equal length.
    pub fn compute(truth: &[Label], predicted: &[Label]) -> Self {
        assert_eq!(
            truth.len(),
            predicted.len(),
            "truth and predictions must have same length"
        );

        let classes = Label::ALL.map(|class| {
            let mut tp = 0usize;
            let mut fp = 0usize;
            let mut fn_count = 0usize;
            for (&t, &p) in truth.iter().zip(predicted) {
                match (t == class, p == class) {
                    (true, true) => tp += 1,
                    (false, true) => fp += 1,
                    (true, false) => fn_count += 1,
                    (false, false) => {}
                }
            }
            let precision = ratio(tp, tp + fp);
            let recall = ratio(tp, tp + fn_count);
            ClassMetrics {
                precision,
                recall,
                f1: harmonic(precision, recall),
                support: tp + fn_count,
            }
        });
        let correct = truth.iter().zip(predicted).filter(|(t, p)| t == p).count();

        let total = truth.len();
        let n = classes.len() as f64;
        let macro_avg = AverageMetrics {
            precision: classes.iter().map(|c| c.precision).sum::<f64>() / n,
            recall: classes.iter().map(|c| c.recall).sum::<f64>() / n,
            f1: classes.iter().map(|c| c.f1).sum::<f64>() / n,
        };
        let weighted = |f: fn(&ClassMetrics) -> f64| {
            if total == 0 {
                0.0
            } else {
                classes
                    .iter()
                    .map(|c| f(c) * c.support as f64)
                    .sum::<f64>()
                    / total as f64
            }
        };
        let weighted_avg = AverageMetrics {
            precision: weighted(|c: &ClassMetrics| c.precision),
            recall: weighted(|c: &ClassMetrics| c.recall),
            f1: weighted(|c: &ClassMetrics| c.f1),
        };

        Self {
            classes,
            accuracy: ratio(correct, total),
            macro_avg,
            weighted_avg,
            total,
        }
    }

    pub fn class(&self, label: Label) -> &ClassMetrics {
        &self.classes[label.index()]
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>14}  {:>9}  {:>9}  {:>9}  {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for label in Label::ALL {
            let c = self.class(label);
            writeln!(
                f,
                "{:>14}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9}",
                label.to_string(),
                c.precision,
                c.recall,
                c.f1,
                c.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>14}  {:>9}  {:>9}  {:>9.2}  {:>9}",
            "accuracy", "", "", self.accuracy, self.total
        )?;
        for (name, avg) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>14}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9}",
                name, avg.precision, avg.recall, avg.f1, self.total
            )?;
        }
        Ok(())
    }
}

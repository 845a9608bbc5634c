//! CART decision tree (Gini impurity) over dense numeric rows.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::label::Label;

/// Growth limits for a single tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    /// Features examined per node before settling for the best split found.
    pub max_features: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Leaf {
        proba: [f64; 2],
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Nodes are stored flat; index 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

struct Data<'a> {
    x: &'a [Vec<f64>],
    y: &'a [Label],
    n_features: usize,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

fn class_counts(y: &[Label], samples: &[usize]) -> [usize; 2] {
    let mut counts = [0usize; 2];
    for &i in samples {
        counts[y[i].index()] += 1;
    }
    counts
}

fn gini(counts: [usize; 2], n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    1.0 - counts.iter().map(|&c| (c as f64 / n).powi(2)).sum::<f64>()
}

impl DecisionTree {
    /// Grows a tree on the rows listed in `samples` (repeats allowed, as in a
    /// bootstrap sample). `x` rows must all have the same width.
    pub fn fit(
        x: &[Vec<f64>],
        y: &[Label],
        samples: Vec<usize>,
        params: &TreeParams,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let data = Data {
            x,
            y,
            n_features: x.first().map_or(0, Vec::len),
        };
        let mut tree = Self { nodes: Vec::new() };
        tree.grow(&data, samples, 0, params, rng);
        tree
    }

    fn push_leaf(&mut self, counts: [usize; 2]) -> usize {
        let n = (counts[0] + counts[1]) as f64;
        let proba = if n > 0.0 {
            [counts[0] as f64 / n, counts[1] as f64 / n]
        } else {
            [0.5, 0.5]
        };
        self.nodes.push(Node::Leaf { proba });
        self.nodes.len() - 1
    }

    fn grow(
        &mut self,
        data: &Data<'_>,
        samples: Vec<usize>,
        depth: usize,
        params: &TreeParams,
        rng: &mut ChaCha8Rng,
    ) -> usize {
        let counts = class_counts(data.y, &samples);
        let pure = counts[0] == 0 || counts[1] == 0;
        let too_deep = params.max_depth.is_some_and(|d| depth >= d);
        if pure || too_deep || samples.len() < params.min_samples_split.max(2) {
            return self.push_leaf(counts);
        }

        let Some(split) = best_split(data, &samples, counts, params.max_features, rng) else {
            return self.push_leaf(counts);
        };

        let (left, right): (Vec<usize>, Vec<usize>) = samples
            .into_iter()
            .partition(|&i| data.x[i][split.feature] <= split.threshold);

        let id = self.nodes.len();
        self.nodes.push(Node::Leaf { proba: [0.5, 0.5] });
        let left = self.grow(data, left, depth + 1, params, rng);
        let right = self.grow(data, right, depth + 1, params, rng);
        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        id
    }

    /// Class fractions of the leaf `row` falls into.
    pub fn predict_proba_row(&self, row: &[f64]) -> [f64; 2] {
        let mut id = 0;
        loop {
            match self.nodes.get(id) {
                Some(Node::Leaf { proba }) => return *proba,
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = row.get(*feature).copied().unwrap_or(0.0);
                    id = if value <= *threshold { *left } else { *right };
                }
                None => return [0.5, 0.5],
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], id: usize) -> usize {
            match nodes.get(id) {
                Some(Node::Split { left, right, .. }) => {
                    1 + walk(nodes, *left).max(walk(nodes, *right))
                }
                _ => 0,
            }
        }
        walk(&self.nodes, 0)
    }
}

/// Lowest weighted child impurity over a random feature order. After
/// `max_features` features the search stops as soon as any valid split exists;
/// otherwise it keeps going through the remaining features.
fn best_split(
    data: &Data<'_>,
    samples: &[usize],
    counts: [usize; 2],
    max_features: usize,
    rng: &mut ChaCha8Rng,
) -> Option<Candidate> {
    let n = samples.len();
    let mut features: Vec<usize> = (0..data.n_features).collect();
    features.shuffle(rng);

    let mut best: Option<Candidate> = None;
    let mut sorted: Vec<(f64, Label)> = Vec::with_capacity(n);

    for (visited, &feature) in features.iter().enumerate() {
        if visited >= max_features.max(1) && best.is_some() {
            break;
        }

        sorted.clear();
        sorted.extend(samples.iter().map(|&i| (data.x[i][feature], data.y[i])));
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left = [0usize; 2];
        for k in 0..n - 1 {
            left[sorted[k].1.index()] += 1;
            let (value, next) = (sorted[k].0, sorted[k + 1].0);
            if value >= next {
                continue;
            }
            let n_left = k + 1;
            let n_right = n - n_left;
            let right = [counts[0] - left[0], counts[1] - left[1]];
            let impurity = (n_left as f64 * gini(left, n_left)
                + n_right as f64 * gini(right, n_right))
                / n as f64;

            if best.map_or(true, |b| impurity < b.impurity) {
                let mut threshold = value / 2.0 + next / 2.0;
                if threshold >= next || !threshold.is_finite() {
                    threshold = value;
                }
                best = Some(Candidate {
                    feature,
                    threshold,
                    impurity,
                });
            }
        }
    }
    best
}

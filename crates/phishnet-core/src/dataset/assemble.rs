//! Class balancing and shuffling.

use anyhow::Result;
use rand::seq::{index, SliceRandom};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use super::source::{load_urls, BENIGN_URL_COLUMNS, PHISHING_URL_COLUMNS};
use super::LabeledUrl;
use crate::error::PipelineError;
use crate::label::Label;

/// Row counts observed while assembling a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblySummary {
    pub phishing_loaded: usize,
    pub benign_loaded: usize,
    /// Benign URLs dropped because the phishing source also lists them.
    pub overlap_dropped: usize,
    /// Rows kept per class (the smaller class size).
    pub per_class: usize,
}

impl AssemblySummary {
    pub fn total(&self) -> usize {
        self.per_class * 2
    }
}

impl fmt::Display for AssemblySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "phishing loaded: {}, benign loaded: {}, overlap dropped: {}, kept per class: {}, total rows: {}",
            self.phishing_loaded,
            self.benign_loaded,
            self.overlap_dropped,
            self.per_class,
            self.total()
        )
    }
}

/// Balances two cleaned URL lists to equal size and shuffles them together.
///
/// Each class is sampled without replacement down to the smaller class size
/// using an RNG seeded with `seed`; the concatenation (phishing first) is then
/// shuffled with a fresh RNG seeded the same way.
pub fn assemble(
    phishing: Vec<String>,
    mut benign: Vec<String>,
    seed: u64,
) -> Result<(Vec<LabeledUrl>, AssemblySummary), PipelineError> {
    let phishing_loaded = phishing.len();
    let benign_loaded = benign.len();

    let phishing_set: HashSet<&str> = phishing.iter().map(String::as_str).collect();
    benign.retain(|url| !phishing_set.contains(url.as_str()));
    let overlap_dropped = benign_loaded - benign.len();
    if overlap_dropped > 0 {
        tracing::warn!(overlap_dropped, "benign URLs also listed as phishing were dropped");
    }

    if phishing.is_empty() {
        return Err(PipelineError::EmptyClass {
            label: Label::Phishing,
        });
    }
    if benign.is_empty() {
        return Err(PipelineError::EmptyClass {
            label: Label::Legitimate,
        });
    }

    let per_class = phishing.len().min(benign.len());

    let mut rows: Vec<LabeledUrl> = sample(&phishing, per_class, seed)
        .into_iter()
        .map(|url| LabeledUrl::new(url, Label::Phishing))
        .chain(
            sample(&benign, per_class, seed)
                .into_iter()
                .map(|url| LabeledUrl::new(url, Label::Legitimate)),
        )
        .collect();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rows.shuffle(&mut rng);

    let summary = AssemblySummary {
        phishing_loaded,
        benign_loaded,
        overlap_dropped,
        per_class,
    };
    tracing::info!(%summary, "assembled dataset");
    Ok((rows, summary))
}

/// Draws `n` distinct items in random order.
fn sample(urls: &[String], n: usize, seed: u64) -> Vec<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    index::sample(&mut rng, urls.len(), n)
        .into_iter()
        .map(|i| urls[i].clone())
        .collect()
}

/// Loads both source files and assembles them.
pub fn build_dataset(
    phishing_path: &Path,
    benign_path: &Path,
    seed: u64,
) -> Result<(Vec<LabeledUrl>, AssemblySummary)> {
    let phishing = load_urls(phishing_path, "phishing source", PHISHING_URL_COLUMNS)?;
    let benign = load_urls(benign_path, "benign source", BENIGN_URL_COLUMNS)?;
    Ok(assemble(phishing, benign, seed)?)
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Random forest hyperparameters (optional `[forest]` section in config.toml).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    /// Number of trees in the ensemble.
    pub n_trees: usize,
    /// Maximum tree depth (None = grow until leaves are pure).
    pub max_depth: Option<usize>,
    /// Minimum rows in a node before it may be split.
    pub min_samples_split: usize,
    /// Features examined per split (None = floor(sqrt(feature count))).
    pub max_features: Option<usize>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            max_features: None,
        }
    }
}

/// File locations for each pipeline stage. Relative paths resolve against the
/// working directory of the invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Headerless `rank,domain` popularity ranking.
    pub ranking: PathBuf,
    /// Phishing feed (e.g. PhishTank `verified_online.csv`).
    pub phishing_source: PathBuf,
    /// Benign URL list.
    pub benign_source: PathBuf,
    /// Assembled `url,label` dataset.
    pub raw_dataset: PathBuf,
    /// Feature table written by `preprocess`.
    pub processed_dataset: PathBuf,
    /// Model artifact written by `train`.
    pub model: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            ranking: PathBuf::from("data/raw/tranco.csv"),
            phishing_source: PathBuf::from("data/raw/verified_online.csv"),
            benign_source: PathBuf::from("data/raw/benign_urls.csv"),
            raw_dataset: PathBuf::from("data/raw/phishing_raw.csv"),
            processed_dataset: PathBuf::from("data/processed/phishing_processed.csv"),
            model: PathBuf::from("models/phishing_model.json"),
        }
    }
}

/// Pipeline configuration loaded from `~/.config/phishnet/config.toml` or `--config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Seed for sampling, shuffling, splitting and forest bagging.
    pub seed: u64,
    /// Fraction of each class held out for testing.
    pub test_fraction: f64,
    pub paths: PathsConfig,
    pub forest: ForestConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            test_fraction: 0.2,
            paths: PathsConfig::default(),
            forest: ForestConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Rejects values no stage can work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            anyhow::bail!(
                "test_fraction must be between 0 and 1 (exclusive), got {}",
                self.test_fraction
            );
        }
        if self.forest.n_trees == 0 {
            anyhow::bail!("forest.n_trees must be at least 1");
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("phishnet")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PipelineConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PipelineConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file; missing keys take defaults.
pub fn load_from_path(path: &Path) -> Result<PipelineConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: PipelineConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

//! `phishnet predict` – classify one URL.

use anyhow::Result;
use phishnet_core::config::PipelineConfig;
use phishnet_core::predict;

pub fn run_predict(cfg: &PipelineConfig, url: &str) -> Result<()> {
    let prediction = predict::run_predict(&cfg.paths.model, url)?;
    println!("{prediction}");
    Ok(())
}

//! `phishnet preprocess` – raw dataset to feature table.

use anyhow::Result;
use phishnet_core::config::PipelineConfig;
use phishnet_core::preprocess;

pub fn run_preprocess(cfg: &PipelineConfig) -> Result<()> {
    let paths = &cfg.paths;
    let table = preprocess::run_preprocess(&paths.raw_dataset, &paths.processed_dataset)?;
    println!("Columns: {}", table.columns.join(", "));
    println!(
        "Saved {} rows to {}",
        table.len(),
        paths.processed_dataset.display()
    );
    Ok(())
}

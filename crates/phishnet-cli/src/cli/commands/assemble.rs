//! `phishnet assemble` – build the balanced raw dataset.

use anyhow::Result;
use phishnet_core::config::PipelineConfig;
use phishnet_core::dataset;

pub fn run_assemble(cfg: &PipelineConfig) -> Result<()> {
    let paths = &cfg.paths;
    let (rows, summary) =
        dataset::build_dataset(&paths.phishing_source, &paths.benign_source, cfg.seed)?;
    dataset::write_labeled_urls(&paths.raw_dataset, &rows)?;

    println!("Phishing URLs loaded:   {}", summary.phishing_loaded);
    println!("Benign URLs loaded:     {}", summary.benign_loaded);
    if summary.overlap_dropped > 0 {
        println!("Overlap dropped:        {}", summary.overlap_dropped);
    }
    println!("Rows per class:         {}", summary.per_class);
    println!(
        "Saved {} rows to {}",
        summary.total(),
        paths.raw_dataset.display()
    );
    Ok(())
}

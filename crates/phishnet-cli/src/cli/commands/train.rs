//! `phishnet train` – fit, report, save.

use anyhow::Result;
use phishnet_core::checksum;
use phishnet_core::config::PipelineConfig;
use phishnet_core::split::SplitParams;
use phishnet_core::train;

pub fn run_train(cfg: &PipelineConfig) -> Result<()> {
    let paths = &cfg.paths;
    let summary = train::run_train(
        &paths.processed_dataset,
        &paths.model,
        SplitParams::from(cfg),
        cfg.forest,
    )?;
    let outcome = &summary.outcome;

    println!(
        "Trained on {} rows, evaluated on {} held-out rows.",
        outcome.train_rows, outcome.test_rows
    );
    println!();
    println!("{}", outcome.report);
    println!(
        "Model saved to {} (sha256 {})",
        paths.model.display(),
        checksum::short(&summary.fingerprint)
    );
    Ok(())
}

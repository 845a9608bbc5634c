//! `phishnet evaluate` – score the saved model.

use anyhow::Result;
use phishnet_core::config::PipelineConfig;
use phishnet_core::evaluate::{self, EvalMode};
use phishnet_core::split::SplitParams;

pub fn run_evaluate(cfg: &PipelineConfig, full: bool) -> Result<()> {
    let mode = if full { EvalMode::Full } else { EvalMode::HeldOut };
    let report = evaluate::run_evaluate(
        &cfg.paths.model,
        &cfg.paths.processed_dataset,
        mode,
        SplitParams::from(cfg),
    )?;
    println!("Evaluation ({mode}, {} rows):", report.total);
    println!();
    println!("{report}");
    Ok(())
}

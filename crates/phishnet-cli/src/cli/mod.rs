//! CLI for the phishnet phishing-URL classifier.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use phishnet_core::config::{self, PipelineConfig};
use std::path::PathBuf;

use commands::{
    run_assemble, run_build_benign, run_completions, run_evaluate, run_predict, run_preprocess,
    run_train,
};

/// Top-level CLI for phishnet.
#[derive(Debug, Parser)]
#[command(name = "phishnet")]
#[command(about = "phishnet: lexical phishing-URL classifier pipeline", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/phishnet/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Convert a `rank,domain` popularity ranking into the benign URL list.
    BuildBenign {
        /// Ranking CSV (defaults to paths.ranking).
        #[arg(long, value_name = "PATH")]
        input: Option<PathBuf>,
        /// Benign URL list to write (defaults to paths.benign_source).
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Balance, deduplicate and shuffle both sources into the raw `url,label` dataset.
    Assemble,

    /// Extract lexical features from the raw dataset.
    Preprocess,

    /// Train the random forest and report held-out metrics.
    Train,

    /// Score the saved model against the processed dataset.
    Evaluate {
        /// Score every row instead of the held-out partition.
        #[arg(long)]
        full: bool,
    },

    /// Classify a single URL with the saved model.
    Predict {
        /// URL to classify.
        url: String,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn load_config(path: Option<&std::path::Path>) -> Result<PipelineConfig> {
    let cfg = match path {
        Some(p) => config::load_from_path(p)?,
        None => config::load_or_init()?,
    };
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // Completions need no config and must not touch the config dir.
        if let CliCommand::Completions { shell } = cli.command {
            run_completions(shell);
            return Ok(());
        }

        let cfg = load_config(cli.config.as_deref())?;

        match cli.command {
            CliCommand::BuildBenign { input, output } => {
                let input = input.unwrap_or_else(|| cfg.paths.ranking.clone());
                let output = output.unwrap_or_else(|| cfg.paths.benign_source.clone());
                run_build_benign(&input, &output)?;
            }
            CliCommand::Assemble => run_assemble(&cfg)?,
            CliCommand::Preprocess => run_preprocess(&cfg)?,
            CliCommand::Train => run_train(&cfg)?,
            CliCommand::Evaluate { full } => run_evaluate(&cfg, full)?,
            CliCommand::Predict { url } => run_predict(&cfg, &url)?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;

//! Integration test: sources on disk through assemble, preprocess, train,
//! evaluate and predict, with every artifact written to a temp dir.

mod common;

use phishnet_core::config::{ForestConfig, PipelineConfig};
use phishnet_core::dataset;
use phishnet_core::error::PipelineError;
use phishnet_core::evaluate::{self, EvalMode};
use phishnet_core::features::FEATURE_NAMES;
use phishnet_core::label::Label;
use phishnet_core::model::ModelArtifact;
use phishnet_core::predict;
use phishnet_core::preprocess;
use phishnet_core::split::SplitParams;
use phishnet_core::table::{RawTable, LABEL_COLUMN};
use phishnet_core::train;
use std::path::Path;
use tempfile::tempdir;

fn config_in(root: &Path) -> PipelineConfig {
    let mut cfg = PipelineConfig::default();
    cfg.paths.ranking = root.join("raw/tranco.csv");
    cfg.paths.phishing_source = root.join("raw/verified_online.csv");
    cfg.paths.benign_source = root.join("raw/benign_urls.csv");
    cfg.paths.raw_dataset = root.join("raw/phishing_raw.csv");
    cfg.paths.processed_dataset = root.join("processed/phishing_processed.csv");
    cfg.paths.model = root.join("models/phishing_model.json");
    cfg.forest = ForestConfig {
        n_trees: 25,
        ..ForestConfig::default()
    };
    cfg
}

fn write_sources(cfg: &PipelineConfig, phishing: usize, benign: usize) {
    std::fs::create_dir_all(cfg.paths.phishing_source.parent().unwrap()).unwrap();
    common::corpus::write_phishing_feed(&cfg.paths.phishing_source, phishing);
    common::corpus::write_ranking(&cfg.paths.ranking, benign);
    let written =
        dataset::build_benign_from_ranking(&cfg.paths.ranking, &cfg.paths.benign_source).unwrap();
    assert_eq!(written, benign);
}

fn assemble(cfg: &PipelineConfig) {
    let (rows, _) =
        dataset::build_dataset(&cfg.paths.phishing_source, &cfg.paths.benign_source, cfg.seed)
            .unwrap();
    dataset::write_labeled_urls(&cfg.paths.raw_dataset, &rows).unwrap();
}

#[test]
fn pipeline_end_to_end() {
    let dir = tempdir().unwrap();
    let cfg = config_in(dir.path());
    write_sources(&cfg, 100, 60);

    // Assemble: balanced down to the smaller class.
    let (rows, summary) =
        dataset::build_dataset(&cfg.paths.phishing_source, &cfg.paths.benign_source, cfg.seed)
            .unwrap();
    assert_eq!(summary.phishing_loaded, 100);
    assert_eq!(summary.benign_loaded, 60);
    assert_eq!(rows.len(), 120);
    let phishing = rows.iter().filter(|r| r.label == Label::Phishing).count();
    assert_eq!(phishing, 60);
    dataset::write_labeled_urls(&cfg.paths.raw_dataset, &rows).unwrap();

    // Preprocess: 8 features plus label, no URL text.
    let table =
        preprocess::run_preprocess(&cfg.paths.raw_dataset, &cfg.paths.processed_dataset).unwrap();
    assert_eq!(table.len(), 120);
    let on_disk = RawTable::read_csv(&cfg.paths.processed_dataset).unwrap();
    assert_eq!(on_disk.len(), 120);
    let mut expected: Vec<&str> = FEATURE_NAMES.to_vec();
    expected.push(LABEL_COLUMN);
    assert_eq!(on_disk.headers(), expected.as_slice());

    // Train: stratified 80/20 hold-out.
    let split = SplitParams::from(&cfg);
    let summary = train::run_train(
        &cfg.paths.processed_dataset,
        &cfg.paths.model,
        split,
        cfg.forest,
    )
    .unwrap();
    let outcome = &summary.outcome;
    assert_eq!(outcome.train_rows, 96);
    assert_eq!(outcome.test_rows, 24);
    assert_eq!(outcome.report.class(Label::Phishing).support, 12);
    assert_eq!(outcome.report.class(Label::Legitimate).support, 12);
    assert!(outcome.report.accuracy > 0.9);
    assert_eq!(summary.fingerprint.len(), 64);

    // Evaluate: held-out reproduces the training report, full scores all rows.
    let held_out = evaluate::run_evaluate(
        &cfg.paths.model,
        &cfg.paths.processed_dataset,
        EvalMode::HeldOut,
        split,
    )
    .unwrap();
    assert_eq!(held_out, outcome.report);
    let full = evaluate::run_evaluate(
        &cfg.paths.model,
        &cfg.paths.processed_dataset,
        EvalMode::Full,
        split,
    )
    .unwrap();
    assert_eq!(full.total, 120);
    assert!(full.accuracy > 0.9);

    // Predict: the saved model flags the phishing feed.
    let flagged = (0..100)
        .filter(|&i| {
            let p = predict::run_predict(&cfg.paths.model, &common::corpus::phishing_url(i))
                .unwrap();
            p.label == Label::Phishing
        })
        .count();
    assert!(flagged >= 90, "only {flagged} of 100 phishing URLs flagged");

    let benign = predict::run_predict(&cfg.paths.model, "https://site3.com").unwrap();
    assert_eq!(benign.label, Label::Legitimate);
    assert!(benign.probabilities.is_some());
}

#[test]
fn assembly_is_reproducible_for_a_fixed_seed() {
    let dir = tempdir().unwrap();
    let cfg = config_in(dir.path());
    write_sources(&cfg, 30, 20);

    assemble(&cfg);
    let first = std::fs::read(&cfg.paths.raw_dataset).unwrap();
    assemble(&cfg);
    let second = std::fs::read(&cfg.paths.raw_dataset).unwrap();
    assert_eq!(first, second);
}

#[test]
fn retraining_replaces_the_artifact() {
    let dir = tempdir().unwrap();
    let mut cfg = config_in(dir.path());
    write_sources(&cfg, 40, 40);
    assemble(&cfg);
    preprocess::run_preprocess(&cfg.paths.raw_dataset, &cfg.paths.processed_dataset).unwrap();

    let split = SplitParams::from(&cfg);
    train::run_train(&cfg.paths.processed_dataset, &cfg.paths.model, split, cfg.forest).unwrap();
    let first = ModelArtifact::load(&cfg.paths.model).unwrap();

    cfg.forest.n_trees = 5;
    train::run_train(&cfg.paths.processed_dataset, &cfg.paths.model, split, cfg.forest).unwrap();
    let second = ModelArtifact::load(&cfg.paths.model).unwrap();

    assert_eq!(first.model.n_trees(), 25);
    assert_eq!(second.model.n_trees(), 5);
    let leftovers = std::fs::read_dir(cfg.paths.model.parent().unwrap())
        .unwrap()
        .count();
    assert_eq!(leftovers, 1);
}

#[test]
fn stages_report_missing_prerequisites() {
    let dir = tempdir().unwrap();
    let cfg = config_in(dir.path());

    let err = dataset::build_dataset(&cfg.paths.phishing_source, &cfg.paths.benign_source, 42)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PipelineError>(),
        Some(PipelineError::MissingInput { .. })
    ));

    let err = preprocess::run_preprocess(&cfg.paths.raw_dataset, &cfg.paths.processed_dataset)
        .unwrap_err();
    assert!(err.to_string().contains("phishnet assemble"));

    let err = predict::run_predict(&cfg.paths.model, "https://example.com").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PipelineError>(),
        Some(PipelineError::ModelNotFound { .. })
    ));
}

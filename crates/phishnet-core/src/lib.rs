pub mod config;
pub mod error;
pub mod logging;

// Pipeline stages
pub mod dataset;
pub mod evaluate;
pub mod preprocess;
pub mod predict;
pub mod train;

pub mod checksum;
pub mod features;
pub mod label;
pub mod metrics;
pub mod model;
pub mod split;
pub mod table;

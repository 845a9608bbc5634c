//! CLI command handlers, one per file.

mod assemble;
mod build_benign;
mod completions;
mod evaluate;
mod predict;
mod preprocess;
mod train;

pub use assemble::run_assemble;
pub use build_benign::run_build_benign;
pub use completions::run_completions;
pub use evaluate::run_evaluate;
pub use predict::run_predict;
pub use preprocess::run_preprocess;
pub use train::run_train;

//! Benchmark setup error type.
//!
//! Aggregates the errors that may arise during benchmark data preparation so
//! that setup functions can propagate failures with `?` instead of using
//! `.expect()`.

use crate::source::SyntheticError;
use sybilcut_core::PartitionError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic graph generation failed.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Partitioner configuration or execution failed.
    #[error("partitioning failed: {0}")]
    Partition(#[from] PartitionError),
}

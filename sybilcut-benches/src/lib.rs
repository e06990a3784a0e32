//! Benchmark support crate for sybilcut.
//!
//! Provides a planted honest/Sybil graph generator and parameter types used
//! by the Criterion benchmarks for region growing and metric computation.

pub mod error;
pub mod params;
pub mod source;

//! Command-line interface orchestration for sybilcut.
//!
//! The binary takes two adjacency lists and their ground-truth files, runs the
//! partitioning pipeline over each graph and writes a metrics file plus the
//! honest and Sybil vertex lists per graph.

mod commands;
mod output;

pub use commands::{
    Cli, CliError, ExecutionSummary, GraphJob, GraphLabel, GraphRun, GraphSummary,
    render_summary, run_cli, run_graph,
};
pub use output::{OutputPaths, format_metrics, format_vertices, write_outputs};

#[cfg(test)]
mod test_helpers;

//! Argument parsing and per-graph pipeline runs for the sybilcut CLI.

use std::{
    fmt,
    fs::File,
    io::{self, BufReader, Write},
    path::{Path, PathBuf},
};

use clap::Parser;
use sybilcut_core::{
    DEFAULT_SEED_ID_UPPER_BOUND, DEFAULT_SEED_SIZE, PartitionError, Partitioner,
    PartitionerBuilder,
};
use sybilcut_providers_text::{AdjacencyListProvider, GroundTruthProvider, TextProviderError};
use thiserror::Error;
use tracing::{Span, field, info, instrument, warn};

use super::output::{OutputPaths, write_outputs};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "sybilcut",
    about = "Partition two graphs into honest and Sybil regions and score the split."
)]
pub struct Cli {
    /// Adjacency list of graph A.
    pub graph_a: PathBuf,

    /// Adjacency list of graph B.
    pub graph_b: PathBuf,

    /// Known Sybil ids of graph A, one per line.
    pub truth_a: PathBuf,

    /// Known Sybil ids of graph B, one per line.
    pub truth_b: PathBuf,

    /// Directory receiving the metrics and region files.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Number of seeds drawn per graph.
    #[arg(long, default_value_t = DEFAULT_SEED_SIZE)]
    pub seed_size: usize,

    /// Inclusive upper bound of the id range seeds are drawn from.
    #[arg(long = "seed-id-bound", default_value_t = DEFAULT_SEED_ID_UPPER_BOUND)]
    pub seed_id_upper_bound: usize,

    /// Pin seed sampling for reproducible runs.
    #[arg(long)]
    pub rng_seed: Option<u64>,

    /// Process both graphs concurrently.
    #[arg(long)]
    pub parallel: bool,
}

/// Label distinguishing the two graphs of a run.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GraphLabel {
    /// First graph on the command line.
    A,
    /// Second graph on the command line.
    B,
}

impl GraphLabel {
    /// Label as it appears in file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }
}

impl fmt::Display for GraphLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// An output file could not be written.
    #[error("failed to write `{path}`: {source}")]
    Write {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Input parsing failed.
    #[error(transparent)]
    Text(#[from] TextProviderError),
    /// Partitioning failed.
    #[error(transparent)]
    Core(#[from] PartitionError),
}

impl CliError {
    /// Stable code of the underlying partitioning error, if any.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Core(err) => Some(err.code().as_str()),
            Self::Io { .. } | Self::Write { .. } | Self::Text(_) => None,
        }
    }
}

/// Inputs of one graph run.
#[derive(Clone, Debug)]
pub struct GraphJob {
    /// Label of the graph.
    pub label: GraphLabel,
    /// Adjacency-list file.
    pub graph: PathBuf,
    /// Ground-truth file.
    pub truth: PathBuf,
}

/// Summary of a successful graph run.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphSummary {
    /// Label of the graph.
    pub label: GraphLabel,
    /// Name derived from the adjacency-list file.
    pub graph_name: String,
    /// Vertices assigned to the honest region.
    pub honest_vertices: usize,
    /// Vertices assigned to the Sybil region.
    pub sybil_vertices: usize,
    /// Final normalised conductance.
    pub final_score: f64,
    /// Files written for this graph.
    pub outputs: OutputPaths,
}

/// Outcome of one graph run.
#[derive(Debug)]
pub struct GraphRun {
    /// Label of the graph.
    pub label: GraphLabel,
    /// Summary, or the error that halted the run.
    pub result: Result<GraphSummary, CliError>,
}

/// Outcomes of both graph runs, in label order.
#[derive(Debug)]
pub struct ExecutionSummary {
    /// One entry per graph.
    pub runs: Vec<GraphRun>,
}

impl ExecutionSummary {
    /// Returns whether every graph run succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.runs.iter().all(|run| run.result.is_ok())
    }

    /// Iterates the failed runs.
    pub fn failures(&self) -> impl Iterator<Item = (GraphLabel, &CliError)> {
        self.runs
            .iter()
            .filter_map(|run| run.result.as_ref().err().map(|err| (run.label, err)))
    }
}

/// Executes the CLI command represented by `cli`.
///
/// Each graph is processed independently; a failure in one does not stop the
/// other and is reported in the returned summary.
///
/// # Errors
/// Returns [`CliError::Core`] when the seed configuration is invalid, before
/// any graph is processed.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use sybilcut_cli::cli::{Cli, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = tempfile::tempdir()?;
/// let graph = dir.path().join("graph.txt");
/// std::fs::write(&graph, "a 1\nb 0 2\nc 1 3\nd 2\n")?;
/// let truth = dir.path().join("truth.txt");
/// std::fs::write(&truth, "3\n")?;
/// let cli = Cli {
///     graph_a: graph.clone(),
///     graph_b: graph,
///     truth_a: truth.clone(),
///     truth_b: truth,
///     output_dir: dir.path().to_path_buf(),
///     seed_size: 2,
///     seed_id_upper_bound: 3,
///     rng_seed: Some(1),
///     parallel: false,
/// };
/// let summary = run_cli(cli)?;
/// assert!(summary.all_succeeded());
/// assert!(dir.path().join("metricsGA.txt").exists());
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(output_dir = %cli.output_dir.display(), parallel = cli.parallel),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let mut builder = PartitionerBuilder::new()
        .with_seed_size(cli.seed_size)
        .with_seed_id_upper_bound(cli.seed_id_upper_bound);
    if let Some(seed) = cli.rng_seed {
        builder = builder.with_rng_seed(seed);
    }
    let partitioner = builder.build()?;

    let job_a = GraphJob {
        label: GraphLabel::A,
        graph: cli.graph_a,
        truth: cli.truth_a,
    };
    let job_b = GraphJob {
        label: GraphLabel::B,
        graph: cli.graph_b,
        truth: cli.truth_b,
    };
    let output_dir = cli.output_dir.as_path();

    let (run_a, run_b) = if cli.parallel {
        let parent = Span::current();
        rayon::join(
            || parent.in_scope(|| execute_job(&partitioner, &job_a, output_dir)),
            || parent.in_scope(|| execute_job(&partitioner, &job_b, output_dir)),
        )
    } else {
        (
            execute_job(&partitioner, &job_a, output_dir),
            execute_job(&partitioner, &job_b, output_dir),
        )
    };

    let summary = ExecutionSummary {
        runs: vec![run_a, run_b],
    };
    for (label, err) in summary.failures() {
        warn!(graph = %label, error = %err, code = err.code(), "graph run failed");
    }
    Ok(summary)
}

fn execute_job(partitioner: &Partitioner, job: &GraphJob, output_dir: &Path) -> GraphRun {
    GraphRun {
        label: job.label,
        result: run_graph(partitioner, job, output_dir),
    }
}

/// Loads one graph and its ground truth, partitions it and writes the result
/// files.
///
/// # Errors
/// Returns [`CliError`] when an input cannot be read or parsed, the graph is
/// unsuitable for seed sampling, or an output cannot be written.
#[instrument(
    name = "cli.run_graph",
    err,
    skip(partitioner, job, output_dir),
    fields(label = %job.label, graph = %job.graph.display(), vertices = field::Empty),
)]
pub fn run_graph(
    partitioner: &Partitioner,
    job: &GraphJob,
    output_dir: &Path,
) -> Result<GraphSummary, CliError> {
    let graph_name = derive_graph_name(&job.graph, job.label);
    let graph = AdjacencyListProvider::try_from_reader(
        graph_name.as_str(),
        open_text_reader(&job.graph)?,
    )?
    .into_graph();
    Span::current().record("vertices", graph.vertex_count());
    let truth = GroundTruthProvider::try_from_reader(
        graph_name.as_str(),
        open_text_reader(&job.truth)?,
    )?
    .into_truth();

    let outcome = partitioner.run(&graph_name, &graph, &truth)?;
    let outputs = write_outputs(output_dir, job.label, &outcome)?;
    info!(
        graph = graph_name.as_str(),
        honest = outcome.honest().vertex_count(),
        sybil = outcome.sybil().vertex_count(),
        "graph run completed"
    );
    Ok(GraphSummary {
        label: job.label,
        honest_vertices: outcome.honest().vertex_count(),
        sybil_vertices: outcome.sybil().vertex_count(),
        final_score: outcome.report().final_score,
        graph_name,
        outputs,
    })
}

#[instrument(name = "cli.open_text_reader", err, fields(path = field::Empty))]
pub(super) fn open_text_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_graph_name(path: &Path, label: GraphLabel) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| format!("graph{label}"), ToOwned::to_owned)
}

/// Renders `summary` to `writer`, one block per graph.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    for run in &summary.runs {
        match &run.result {
            Ok(graph) => {
                writeln!(
                    writer,
                    "graph {} ({}): honest {}, sybil {}, score {:.4}",
                    graph.label,
                    graph.graph_name,
                    graph.honest_vertices,
                    graph.sybil_vertices,
                    graph.final_score
                )?;
                writeln!(writer, "  metrics: {}", graph.outputs.metrics.display())?;
                writeln!(writer, "  honest: {}", graph.outputs.honest.display())?;
                writeln!(writer, "  sybil: {}", graph.outputs.sybil.display())?;
            }
            Err(err) => writeln!(writer, "graph {}: failed: {err}", run.label)?,
        }
    }
    Ok(())
}

//! Result files written for each partitioned graph.

use std::{
    fs, iter,
    path::{Path, PathBuf},
};

use sybilcut_core::{PartitionMetrics, PartitionOutcome, VertexId};
use tracing::{debug, instrument};

use super::commands::{CliError, GraphLabel};

/// Locations of the three files written for one graph.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutputPaths {
    /// Metrics record, one value per line.
    pub metrics: PathBuf,
    /// Honest vertex ids, one per line.
    pub honest: PathBuf,
    /// Sybil vertex ids, one per line.
    pub sybil: PathBuf,
}

impl OutputPaths {
    /// Paths of the files for `label` inside `dir`.
    ///
    /// # Examples
    /// ```
    /// use std::path::Path;
    /// use sybilcut_cli::cli::{GraphLabel, OutputPaths};
    ///
    /// let paths = OutputPaths::for_label(Path::new("out"), GraphLabel::B);
    /// assert_eq!(paths.metrics, Path::new("out/metricsGB.txt"));
    /// assert_eq!(paths.honest, Path::new("out/regionHonestGB.txt"));
    /// assert_eq!(paths.sybil, Path::new("out/regionSybilGB.txt"));
    /// ```
    #[must_use]
    pub fn for_label(dir: &Path, label: GraphLabel) -> Self {
        Self {
            metrics: dir.join(format!("metricsG{label}.txt")),
            honest: dir.join(format!("regionHonestG{label}.txt")),
            sybil: dir.join(format!("regionSybilG{label}.txt")),
        }
    }
}

/// Formats the metrics record with two decimals per line.
///
/// Values are rounded half away from zero on their shortest decimal form, so
/// `0.125` is written as `0.13`. Unbounded conductance is written as `inf`.
#[must_use]
pub fn format_metrics(metrics: &PartitionMetrics) -> String {
    let mut out = String::new();
    for value in metrics.values() {
        if value.is_infinite() && value.is_sign_positive() {
            out.push_str("inf");
        } else {
            out.push_str(&two_decimals(value));
        }
        out.push('\n');
    }
    out
}

fn two_decimals(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let shortest = value.abs().to_string();
    let (whole, fraction) = shortest
        .split_once('.')
        .unwrap_or((shortest.as_str(), ""));
    let kept: String = fraction.chars().chain(iter::repeat('0')).take(2).collect();
    let truncated = format!("{whole}.{kept}")
        .parse::<f64>()
        .unwrap_or_else(|_| value.abs());
    let magnitude = if fraction.chars().nth(2).is_some_and(|digit| digit >= '5') {
        truncated + 0.01
    } else {
        truncated
    };
    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{sign}{magnitude:.2}")
}

/// Formats vertex ids one per line in the order given.
#[must_use]
pub fn format_vertices(vertices: &[VertexId]) -> String {
    vertices
        .iter()
        .map(|vertex| format!("{vertex}\n"))
        .collect()
}

/// Writes the metrics and both region files for `label` into `dir`.
///
/// # Errors
/// Returns [`CliError::Write`] naming the first file that could not be
/// written. Files written before the failure are left in place.
#[instrument(name = "cli.write_outputs", err, skip(outcome), fields(dir = %dir.display()))]
pub fn write_outputs(
    dir: &Path,
    label: GraphLabel,
    outcome: &PartitionOutcome,
) -> Result<OutputPaths, CliError> {
    let paths = OutputPaths::for_label(dir, label);
    write_file(&paths.metrics, &format_metrics(outcome.metrics()))?;
    write_file(&paths.honest, &format_vertices(&outcome.honest_vertices()))?;
    write_file(&paths.sybil, &format_vertices(&outcome.sybil_vertices()))?;
    Ok(paths)
}

fn write_file(path: &Path, contents: &str) -> Result<(), CliError> {
    fs::write(path, contents).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = contents.len(), "output written");
    Ok(())
}

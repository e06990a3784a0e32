//! Small helpers shared across CLI tests.
//!
//! The CLI unit tests build temporary input files and assert error handling
//! behaviour. These helpers keep the test cases concise and consistent.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::Cli;

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_text_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

/// Adjacency list of two 6-cycles with chords joined by one edge, written
/// with a label column as the first token.
pub(super) fn two_community_list(offset_label: &str) -> String {
    let mut edges: Vec<(usize, usize)> = Vec::new();
    for base in [0, 6] {
        for i in 0..6 {
            edges.push((base + i, base + (i + 1) % 6));
            edges.push((base + i, base + (i + 2) % 6));
        }
    }
    edges.push((5, 6));

    let mut rows = vec![Vec::new(); 12];
    for (u, v) in edges {
        if let Some(row) = rows.get_mut(u) {
            row.push(v);
        }
        if let Some(row) = rows.get_mut(v) {
            row.push(u);
        }
    }
    let mut out = String::new();
    for (vertex, row) in rows.iter().enumerate() {
        out.push_str(&format!("{offset_label}{vertex}"));
        for neighbour in row {
            out.push_str(&format!(" {neighbour}"));
        }
        out.push('\n');
    }
    out
}

pub(super) fn cli_for(
    graph_a: PathBuf,
    graph_b: PathBuf,
    truth_a: PathBuf,
    truth_b: PathBuf,
    output_dir: &Path,
) -> Cli {
    Cli {
        graph_a,
        graph_b,
        truth_a,
        truth_b,
        output_dir: output_dir.to_path_buf(),
        seed_size: 3,
        seed_id_upper_bound: 5,
        rng_seed: Some(17),
        parallel: false,
    }
}

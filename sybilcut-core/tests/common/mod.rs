#![allow(
    dead_code,
    reason = "each integration test binary uses a different subset of helpers"
)]

use proptest::{collection::vec, prelude::*, test_runner::Config as ProptestConfig};
use sybilcut_core::{Graph, VertexId};

/// Coverage jobs cap shrinking to keep instrumented runs short.
#[cfg(coverage)]
const MAX_SHRINK_ITERS: u32 = 128;
#[cfg(not(coverage))]
const MAX_SHRINK_ITERS: u32 = 1024;

/// Builds a proptest configuration honouring `PROPTEST_CASES` when set.
#[must_use]
pub fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default_cases);
    ProptestConfig {
        cases,
        max_shrink_iters: MAX_SHRINK_ITERS,
        ..ProptestConfig::default()
    }
}

/// Path `0 - 1 - ... - (len - 1)`.
#[must_use]
pub fn path_graph(len: usize) -> Graph {
    let edges: Vec<(VertexId, VertexId)> = (1..len).map(|v| (v - 1, v)).collect();
    Graph::from_edges(&edges)
}

/// Two dense communities `0..honest` and `honest..honest + sybil`, each a
/// ring with chords every `stride` vertices, joined by `attack_edges` edges.
#[must_use]
pub fn planted_graph(honest: usize, sybil: usize, attack_edges: usize) -> Graph {
    let mut edges = Vec::new();
    for (offset, size) in [(0, honest), (honest, sybil)] {
        for i in 0..size {
            edges.push((offset + i, offset + (i + 1) % size));
            edges.push((offset + i, offset + (i + 3) % size));
        }
    }
    for k in 0..attack_edges {
        edges.push((k % honest, honest + (k * 7) % sybil));
    }
    Graph::from_edges(&edges)
}

/// Strategy producing undirected edge lists over ids `0..max_vertex`.
pub fn edge_lists(max_vertex: usize, max_edges: usize) -> impl Strategy<Value = Vec<(VertexId, VertexId)>> {
    vec((0..max_vertex, 0..max_vertex), 0..=max_edges)
}

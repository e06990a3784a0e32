//! Benchmark parameter types.

use std::fmt;

/// Community sizes of a planted-graph benchmark run.
#[derive(Clone, Debug)]
pub struct PlantedBenchParams {
    /// Vertices in the honest community.
    pub honest_vertices: usize,
    /// Vertices in the Sybil community.
    pub sybil_vertices: usize,
}

impl fmt::Display for PlantedBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h={},s={}", self.honest_vertices, self.sybil_vertices)
    }
}

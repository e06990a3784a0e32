//! Planted honest/Sybil graph generator.
//!
//! Builds a graph with two densely connected communities joined by a small
//! number of attack edges. Honest vertices take the ids `0..honest_vertices`
//! and Sybil vertices follow them, so the default seed range lands inside the
//! honest community whenever it holds enough vertices.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use sybilcut_core::{EdgeDirection, Graph, SybilGroundTruth, VertexId};

/// Errors that may occur while preparing a planted graph.
#[derive(Debug, thiserror::Error)]
pub enum SyntheticError {
    /// One of the two communities was empty.
    #[error("{community} community must contain at least one vertex")]
    EmptyCommunity {
        /// Community that was requested empty.
        community: &'static str,
    },
    /// Each vertex was asked to draw zero intra-community edges.
    #[error("edges per vertex must be greater than zero")]
    ZeroEdgesPerVertex,
    /// The combined vertex count does not fit in a vertex id.
    #[error("vertex count overflow: honest={honest}, sybil={sybil}")]
    VertexCountOverflow {
        /// Requested honest vertices.
        honest: usize,
        /// Requested Sybil vertices.
        sybil: usize,
    },
}

/// Parameters of a planted graph.
#[derive(Clone, Debug)]
pub struct PlantedConfig {
    /// Vertices in the honest community.
    pub honest_vertices: usize,
    /// Vertices in the Sybil community.
    pub sybil_vertices: usize,
    /// Random peers each vertex links to inside its own community.
    pub edges_per_vertex: usize,
    /// Random honest-to-Sybil edges.
    pub attack_edges: usize,
    /// RNG seed.
    pub seed: u64,
}

/// A generated graph together with the ids of its Sybil community.
#[derive(Clone, Debug)]
pub struct PlantedGraph {
    graph: Graph,
    sybils: SybilGroundTruth,
}

impl PlantedGraph {
    /// Generates a planted graph from `config`.
    ///
    /// Self picks are skipped and repeated picks collapse, so vertices may end
    /// up with fewer than `edges_per_vertex` distinct neighbours.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when a community is empty, no intra-community
    /// edges are requested, or the vertex ids would overflow.
    ///
    /// # Examples
    /// ```
    /// use sybilcut_benches::source::{PlantedConfig, PlantedGraph};
    ///
    /// let planted = PlantedGraph::generate(&PlantedConfig {
    ///     honest_vertices: 20,
    ///     sybil_vertices: 10,
    ///     edges_per_vertex: 3,
    ///     attack_edges: 2,
    ///     seed: 7,
    /// })?;
    /// assert_eq!(planted.graph().vertex_count(), 30);
    /// assert_eq!(planted.sybils().len(), 10);
    /// # Ok::<(), sybilcut_benches::source::SyntheticError>(())
    /// ```
    pub fn generate(config: &PlantedConfig) -> Result<Self, SyntheticError> {
        validate(config)?;
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let honest = 0..config.honest_vertices;
        let sybil_end = config
            .honest_vertices
            .checked_add(config.sybil_vertices)
            .ok_or(SyntheticError::VertexCountOverflow {
                honest: config.honest_vertices,
                sybil: config.sybil_vertices,
            })?;
        let sybil = config.honest_vertices..sybil_end;

        let mut graph = Graph::new();
        for community in [honest.clone(), sybil.clone()] {
            for vertex in community.clone() {
                graph.add_vertex(vertex);
                for _ in 0..config.edges_per_vertex {
                    let peer: VertexId = rng.gen_range(community.clone());
                    if peer != vertex {
                        graph.add_edge(vertex, peer, EdgeDirection::Undirected);
                    }
                }
            }
        }
        for _ in 0..config.attack_edges {
            let source: VertexId = rng.gen_range(honest.clone());
            let target: VertexId = rng.gen_range(sybil.clone());
            graph.add_edge(source, target, EdgeDirection::Undirected);
        }

        Ok(Self {
            graph,
            sybils: SybilGroundTruth::from_ids(sybil),
        })
    }

    /// Generated graph.
    #[must_use]
    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Ids of the Sybil community.
    #[must_use]
    pub const fn sybils(&self) -> &SybilGroundTruth {
        &self.sybils
    }
}

const fn validate(config: &PlantedConfig) -> Result<(), SyntheticError> {
    if config.honest_vertices == 0 {
        return Err(SyntheticError::EmptyCommunity {
            community: "honest",
        });
    }
    if config.sybil_vertices == 0 {
        return Err(SyntheticError::EmptyCommunity { community: "sybil" });
    }
    if config.edges_per_vertex == 0 {
        return Err(SyntheticError::ZeroEdgesPerVertex);
    }
    Ok(())
}

//! Seed-induced split of a graph into honest and Sybil candidate regions.

use crate::{
    graph::{EdgeDirection, Graph},
    seeds::SeedSet,
};

/// Two disjoint regions covering the vertex set of an original graph.
///
/// `honest` is the region grown from the seeds; `sybil` holds everything
/// else. Each region only stores edges whose endpoints both lie inside it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionPair {
    /// Candidate honest region (A).
    pub honest: Graph,
    /// Candidate Sybil region (B).
    pub sybil: Graph,
}

/// Splits `original` along the seed set.
///
/// Seeds go to the honest region with their seed-to-seed edges; every other
/// vertex goes to the Sybil region with its non-seed edges. Edges crossing
/// the split are dropped from both sides and can be recovered with
/// [`cross_region_edges`].
///
/// # Examples
/// ```
/// use sybilcut_core::{Graph, SeedSet, build_initial_partition, cross_region_edges};
///
/// let graph = Graph::from_edges(&[(0, 1), (1, 2), (2, 3)]);
/// let regions = build_initial_partition(&graph, &SeedSet::from_ids([0, 1]));
/// assert_eq!(regions.honest.sorted_vertices(), vec![0, 1]);
/// assert_eq!(regions.sybil.sorted_vertices(), vec![2, 3]);
/// let cross = cross_region_edges(&graph, &regions.honest, &regions.sybil);
/// assert_eq!(cross.edge_count(), 1);
/// ```
#[must_use]
pub fn build_initial_partition(original: &Graph, seeds: &SeedSet) -> RegionPair {
    let mut regions = RegionPair::default();
    for (&vertex, neighbours) in original.adjacency() {
        let is_seed = seeds.contains(vertex);
        let region = if is_seed {
            &mut regions.honest
        } else {
            &mut regions.sybil
        };
        region.add_vertex(vertex);
        for &neighbour in neighbours {
            if seeds.contains(neighbour) == is_seed {
                region.add_edge(vertex, neighbour, EdgeDirection::Undirected);
            }
        }
    }
    regions
}

/// Collects the edges of `original` with one endpoint in `honest` and the
/// other in `sybil`. Runs in `O(V + E)`.
#[must_use]
pub fn cross_region_edges(original: &Graph, honest: &Graph, sybil: &Graph) -> Graph {
    let mut cross = Graph::new();
    for (&u, neighbours) in original.adjacency() {
        for &v in neighbours {
            let crosses = (honest.contains_vertex(u) && sybil.contains_vertex(v))
                || (honest.contains_vertex(v) && sybil.contains_vertex(u));
            if crosses {
                cross.add_edge(u, v, EdgeDirection::Undirected);
            }
        }
    }
    cross
}

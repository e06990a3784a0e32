//! Degree and clustering statistics over a [`Graph`].

use super::{Graph, VertexId};

/// Returns `upper! / lower!` without evaluating either factorial.
///
/// Yields `Some(1)` when the bounds coincide and `None` when `lower > upper`
/// or the product overflows.
pub(crate) fn factorial_ratio(upper: u64, lower: u64) -> Option<u64> {
    if lower > upper {
        return None;
    }
    if lower == upper {
        return Some(1);
    }
    ((lower + 1)..=upper).try_fold(1_u64, u64::checked_mul)
}

/// Number of unordered pairs that can be drawn from `n` items.
fn possible_pairs(n: usize) -> u64 {
    let Ok(n) = u64::try_from(n) else {
        return u64::MAX;
    };
    if n < 2 {
        return 0;
    }
    factorial_ratio(n, n - 2).map_or(u64::MAX, |ordered| ordered / 2)
}

impl Graph {
    /// Mean degree over all vertices; self-loops contribute two.
    ///
    /// Returns `0.0` for an empty graph.
    ///
    /// # Examples
    /// ```
    /// use sybilcut_core::Graph;
    ///
    /// let graph = Graph::from_edges(&[(0, 1), (1, 2)]);
    /// assert!((graph.average_degree() - 4.0 / 3.0).abs() < 1e-12);
    /// assert_eq!(Graph::new().average_degree(), 0.0);
    /// ```
    #[must_use]
    pub fn average_degree(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let degree_sum: usize = self
            .adjacency()
            .iter()
            .map(|(&vertex, neighbours)| {
                neighbours
                    .iter()
                    .map(|&neighbour| if neighbour == vertex { 2 } else { 1 })
                    .sum::<usize>()
            })
            .sum();
        degree_sum as f64 / self.vertex_count() as f64
    }

    /// Local clustering coefficient of `vertex`, or `None` when absent.
    ///
    /// The coefficient is the fraction of neighbour pairs that are themselves
    /// adjacent. Vertices with fewer than two neighbours score `0.0`.
    #[must_use]
    pub fn local_clustering(&self, vertex: VertexId) -> Option<f64> {
        let neighbours = self.neighbours(vertex)?;
        let degree = neighbours.iter().filter(|&&n| n != vertex).count();
        let pairs = possible_pairs(degree);
        if pairs == 0 {
            return Some(0.0);
        }

        let mut closed = 0_u64;
        for &neighbour in neighbours.iter().filter(|&&n| n != vertex) {
            let Some(second_hop) = self.neighbours(neighbour) else {
                continue;
            };
            closed += second_hop
                .iter()
                .filter(|&&t| t != vertex && t != neighbour && neighbours.contains(&t))
                .count() as u64;
        }
        // Every closed pair is discovered once from each side.
        Some(closed as f64 / 2.0 / pairs as f64)
    }

    /// Mean of the local clustering coefficients of all vertices.
    ///
    /// Returns `0.0` for an empty graph. The result always lies in `[0, 1]`.
    ///
    /// # Examples
    /// ```
    /// use sybilcut_core::Graph;
    ///
    /// let triangle = Graph::from_edges(&[(0, 1), (1, 2), (2, 0)]);
    /// assert_eq!(triangle.clustering_coefficient(), 1.0);
    ///
    /// let path = Graph::from_edges(&[(0, 1), (1, 2)]);
    /// assert_eq!(path.clustering_coefficient(), 0.0);
    /// ```
    #[must_use]
    pub fn clustering_coefficient(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .adjacency()
            .keys()
            .filter_map(|&vertex| self.local_clustering(vertex))
            .sum();
        total / self.vertex_count() as f64
    }
}

//! Quality metrics for a settled honest/Sybil split.
//!
//! Every function here is pure and runs in `O(V + E)` over the graphs it
//! receives.

use std::collections::BTreeSet;

use tracing::warn;

use crate::{
    graph::{Graph, VertexId},
    partition::cross_region_edges,
};

/// Vertex ids known to be Sybil identities.
///
/// # Examples
/// ```
/// use sybilcut_core::SybilGroundTruth;
///
/// let truth = SybilGroundTruth::from_ids([4, 2, 4]);
/// assert_eq!(truth.len(), 2);
/// assert!(truth.contains(4));
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SybilGroundTruth {
    ids: BTreeSet<VertexId>,
}

impl SybilGroundTruth {
    /// Builds the ground truth from ids, discarding duplicates.
    #[must_use]
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = VertexId>,
    {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Returns whether `vertex` is a known Sybil.
    #[must_use]
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.ids.contains(&vertex)
    }

    /// Number of known Sybils.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns whether no Sybils are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates the ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.ids.iter().copied()
    }

    fn count_in(&self, region: &Graph) -> usize {
        self.ids
            .iter()
            .filter(|&&id| region.contains_vertex(id))
            .count()
    }
}

/// Conductance of `region` against `other`: boundary edges over internal
/// edges.
///
/// Returns [`f64::INFINITY`] when `region` has no internal edges.
///
/// # Examples
/// ```
/// use sybilcut_core::{Graph, conductance};
///
/// let original = Graph::from_edges(&[(0, 1), (1, 2)]);
/// let honest = Graph::from_edges(&[(0, 1)]);
/// let mut sybil = Graph::new();
/// sybil.add_vertex(2);
/// assert_eq!(conductance(&original, &honest, &sybil), 1.0);
/// assert_eq!(conductance(&original, &sybil, &honest), f64::INFINITY);
/// ```
#[must_use]
pub fn conductance(original: &Graph, region: &Graph, other: &Graph) -> f64 {
    let internal = region.edge_count();
    if internal == 0 {
        warn!(
            vertices = region.vertex_count(),
            "region has no internal edges, conductance is unbounded"
        );
        return f64::INFINITY;
    }
    let boundary = cross_region_edges(original, region, other).edge_count();
    boundary as f64 / internal as f64
}

/// Newman modularity of the two-region split over `original`.
///
/// Returns `0.0` when `original` has no edges.
#[must_use]
pub fn modularity(original: &Graph, honest: &Graph, sybil: &Graph) -> f64 {
    let total = original.edge_count();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    let e_h = honest.edge_count() as f64;
    let e_s = sybil.edge_count() as f64;
    let e_hs = cross_region_edges(original, honest, sybil).edge_count() as f64;

    let honest_term = e_h / total - ((e_h + e_hs) / total).powi(2);
    let sybil_term = e_s / total - ((e_s + e_hs) / total).powi(2);
    honest_term + sybil_term
}

/// Fraction of known Sybils that ended up in the Sybil region.
///
/// Returns `1.0` for an empty ground truth.
#[must_use]
pub fn sybil_correctness(sybil: &Graph, truth: &SybilGroundTruth) -> f64 {
    if truth.is_empty() {
        return 1.0;
    }
    truth.count_in(sybil) as f64 / truth.len() as f64
}

/// Fraction of honest vertices of `original` that ended up in the honest
/// region.
///
/// Known Sybils outside `original` do not shrink the denominator. Returns
/// `1.0` when every vertex is a known Sybil.
#[must_use]
pub fn honest_correctness(original: &Graph, honest: &Graph, truth: &SybilGroundTruth) -> f64 {
    let honest_population = original.vertex_count() - truth.count_in(original);
    if honest_population == 0 {
        return 1.0;
    }
    let classified = honest.vertex_count() - truth.count_in(honest);
    classified as f64 / honest_population as f64
}

/// Metrics record produced once per run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PartitionMetrics {
    /// Mean degree of the original graph.
    pub average_degree: f64,
    /// Modularity of the split.
    pub modularity: f64,
    /// Conductance of the Sybil region.
    pub sybil_conductance: f64,
    /// Conductance of the honest region.
    pub honest_conductance: f64,
    /// Clustering coefficient of the Sybil region.
    pub sybil_clustering: f64,
    /// Clustering coefficient of the honest region.
    pub honest_clustering: f64,
    /// Share of known Sybils placed in the Sybil region.
    pub sybil_correctness: f64,
    /// Share of honest vertices placed in the honest region.
    pub honest_correctness: f64,
    /// `1 - honest_correctness`.
    pub false_positive_rate: f64,
    /// `1 - sybil_correctness`.
    pub false_negative_rate: f64,
}

impl PartitionMetrics {
    /// Number of values in a metrics record.
    pub const LEN: usize = 10;

    /// Scores the split of `original` into `honest` and `sybil`.
    ///
    /// # Examples
    /// ```
    /// use sybilcut_core::{Graph, PartitionMetrics, SybilGroundTruth};
    ///
    /// let original = Graph::from_edges(&[(0, 1), (2, 3)]);
    /// let honest = Graph::from_edges(&[(0, 1)]);
    /// let sybil = Graph::from_edges(&[(2, 3)]);
    /// let metrics =
    ///     PartitionMetrics::compute(&original, &honest, &sybil, &SybilGroundTruth::from_ids([2, 3]));
    /// assert_eq!(metrics.sybil_correctness, 1.0);
    /// assert_eq!(metrics.false_positive_rate, 0.0);
    /// assert_eq!(metrics.honest_conductance, 0.0);
    /// ```
    #[must_use]
    pub fn compute(
        original: &Graph,
        honest: &Graph,
        sybil: &Graph,
        truth: &SybilGroundTruth,
    ) -> Self {
        let sybil_correctness = sybil_correctness(sybil, truth);
        let honest_correctness = honest_correctness(original, honest, truth);
        Self {
            average_degree: original.average_degree(),
            modularity: modularity(original, honest, sybil),
            sybil_conductance: conductance(original, sybil, honest),
            honest_conductance: conductance(original, honest, sybil),
            sybil_clustering: sybil.clustering_coefficient(),
            honest_clustering: honest.clustering_coefficient(),
            sybil_correctness,
            honest_correctness,
            false_positive_rate: 1.0 - honest_correctness,
            false_negative_rate: 1.0 - sybil_correctness,
        }
    }

    /// Returns the values in report order.
    #[must_use]
    pub const fn values(&self) -> [f64; Self::LEN] {
        [
            self.average_degree,
            self.modularity,
            self.sybil_conductance,
            self.honest_conductance,
            self.sybil_clustering,
            self.honest_clustering,
            self.sybil_correctness,
            self.honest_correctness,
            self.false_positive_rate,
            self.false_negative_rate,
        ]
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    /// Two triangles joined by the bridge `2-3`, split along the bridge.
    #[fixture]
    fn triangles() -> (Graph, Graph, Graph) {
        let original =
            Graph::from_edges(&[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3)]);
        let honest = Graph::from_edges(&[(0, 1), (1, 2), (2, 0)]);
        let sybil = Graph::from_edges(&[(3, 4), (4, 5), (5, 3)]);
        (original, honest, sybil)
    }

    #[rstest]
    fn conductance_is_boundary_over_internal(triangles: (Graph, Graph, Graph)) {
        let (original, honest, sybil) = triangles;
        assert_close(conductance(&original, &honest, &sybil), 1.0 / 3.0);
        assert_close(conductance(&original, &sybil, &honest), 1.0 / 3.0);
    }

    #[rstest]
    fn isolated_vertex_region_yields_infinite_conductance() {
        let original = Graph::from_edges(&[(0, 1)]);
        let mut region = Graph::new();
        region.add_vertex(0);
        let mut other = Graph::new();
        other.add_vertex(1);
        assert_eq!(conductance(&original, &region, &other), f64::INFINITY);
    }

    #[rstest]
    fn modularity_rewards_the_natural_split(triangles: (Graph, Graph, Graph)) {
        let (original, honest, sybil) = triangles;
        let expected = 2.0 * (3.0 / 7.0 - (4.0_f64 / 7.0).powi(2));
        assert_close(modularity(&original, &honest, &sybil), expected);
    }

    #[rstest]
    fn modularity_of_an_edgeless_graph_is_zero() {
        let mut original = Graph::new();
        original.add_vertex(0);
        assert_eq!(modularity(&original, &original, &Graph::new()), 0.0);
    }

    #[rstest]
    #[case(&[3, 4, 5], 1.0, 1.0)]
    #[case(&[3, 4, 0], 2.0 / 3.0, 2.0 / 3.0)]
    #[case(&[], 1.0, 1.0)]
    fn correctness_counts_agreements(
        triangles: (Graph, Graph, Graph),
        #[case] truth: &[VertexId],
        #[case] sybil_expected: f64,
        #[case] honest_expected: f64,
    ) {
        let (original, honest, sybil) = triangles;
        let truth = SybilGroundTruth::from_ids(truth.iter().copied());
        assert_close(sybil_correctness(&sybil, &truth), sybil_expected);
        assert_close(
            honest_correctness(&original, &honest, &truth),
            honest_expected,
        );
    }

    #[rstest]
    fn truth_outside_the_graph_does_not_skew_honest_correctness(
        triangles: (Graph, Graph, Graph),
    ) {
        let (original, honest, _) = triangles;
        let truth = SybilGroundTruth::from_ids([3, 4, 5, 900]);
        assert_close(honest_correctness(&original, &honest, &truth), 1.0);
    }

    #[rstest]
    fn all_sybil_graph_has_perfect_honest_correctness() {
        let original = Graph::from_edges(&[(0, 1)]);
        let truth = SybilGroundTruth::from_ids([0, 1]);
        assert_eq!(honest_correctness(&original, &Graph::new(), &truth), 1.0);
    }

    #[rstest]
    fn record_lists_values_in_report_order(triangles: (Graph, Graph, Graph)) {
        let (original, honest, sybil) = triangles;
        let truth = SybilGroundTruth::from_ids([3, 4, 0]);
        let metrics = PartitionMetrics::compute(&original, &honest, &sybil, &truth);
        let values = metrics.values();

        assert_close(values[0], 2.0);
        assert_close(values[1], metrics.modularity);
        assert_close(values[2], 1.0 / 3.0);
        assert_close(values[3], 1.0 / 3.0);
        assert_close(values[4], 1.0);
        assert_close(values[5], 1.0);
        assert_close(values[6], 2.0 / 3.0);
        assert_close(values[7], 2.0 / 3.0);
        assert_close(values[8], 1.0 / 3.0);
        assert_close(values[9], 1.0 / 3.0);
    }

    #[rstest]
    fn degenerate_regions_produce_sentinels_not_faults() {
        let mut original = Graph::new();
        original.add_vertex(0);
        let honest = original.clone();
        let metrics =
            PartitionMetrics::compute(&original, &honest, &Graph::new(), &SybilGroundTruth::default());
        assert_eq!(metrics.honest_conductance, f64::INFINITY);
        assert_eq!(metrics.sybil_conductance, f64::INFINITY);
        assert_eq!(metrics.modularity, 0.0);
        assert_eq!(metrics.average_degree, 0.0);
        assert_eq!(metrics.honest_clustering, 0.0);
    }
}

//! End-to-end partitioning pipeline.
//!
//! A run selects seeds, splits the graph along them, grows the honest region
//! and scores the settled split.

use std::{num::NonZeroUsize, sync::Arc};

use rand::{SeedableRng, rngs::SmallRng};
use tracing::{info, instrument, warn};

use crate::{
    Result,
    error::PartitionError,
    graph::{Graph, VertexId},
    metrics::{PartitionMetrics, SybilGroundTruth},
    optimizer::{GrowthReport, grow_honest_region},
    partition::{RegionPair, build_initial_partition},
    seeds::{SeedSet, select_seeds},
};

/// Entry point for partitioning a graph into honest and Sybil regions.
///
/// # Examples
/// ```
/// use sybilcut_core::{Graph, PartitionerBuilder, SybilGroundTruth};
///
/// let edges: Vec<(usize, usize)> = (0..12).map(|v| (v, v + 1)).collect();
/// let graph = Graph::from_edges(&edges);
/// let partitioner = PartitionerBuilder::new()
///     .with_seed_size(3)
///     .with_seed_id_upper_bound(5)
///     .with_rng_seed(1)
///     .build()?;
/// let outcome = partitioner.run("path", &graph, &SybilGroundTruth::from_ids([12]))?;
/// assert_eq!(
///     outcome.honest().vertex_count() + outcome.sybil().vertex_count(),
///     graph.vertex_count()
/// );
/// # Ok::<(), sybilcut_core::PartitionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Partitioner {
    seed_size: NonZeroUsize,
    seed_id_upper_bound: VertexId,
    rng_seed: Option<u64>,
}

impl Partitioner {
    pub(crate) fn new(
        seed_size: NonZeroUsize,
        seed_id_upper_bound: VertexId,
        rng_seed: Option<u64>,
    ) -> Self {
        Self {
            seed_size,
            seed_id_upper_bound,
            rng_seed,
        }
    }

    /// Returns the number of seeds drawn per run.
    #[must_use]
    pub fn seed_size(&self) -> NonZeroUsize {
        self.seed_size
    }

    /// Returns the inclusive upper bound of the seed id range.
    #[must_use]
    pub fn seed_id_upper_bound(&self) -> VertexId {
        self.seed_id_upper_bound
    }

    /// Returns the pinned random seed, if any.
    #[must_use]
    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// Samples seeds and runs the pipeline over `graph`.
    ///
    /// Without a pinned random seed the sample is drawn from OS entropy and
    /// repeated runs may settle on different splits.
    ///
    /// # Errors
    /// Returns [`PartitionError::EmptyGraph`] when `graph` has no vertices and
    /// [`PartitionError::InsufficientVertices`] when it has fewer vertices
    /// than the seed id range covers.
    #[instrument(
        name = "core.partition",
        err,
        skip(self, graph, truth),
        fields(
            vertices = graph.vertex_count(),
            seed_size = self.seed_size.get(),
            seed_id_upper_bound = self.seed_id_upper_bound,
        ),
    )]
    pub fn run(
        &self,
        name: &str,
        graph: &Graph,
        truth: &SybilGroundTruth,
    ) -> Result<PartitionOutcome> {
        ensure_not_empty(name, graph)?;
        let required = self.seed_id_upper_bound.saturating_add(1);
        if graph.vertex_count() < required {
            return Err(PartitionError::InsufficientVertices {
                graph: Arc::from(name),
                vertices: graph.vertex_count(),
                required,
            });
        }

        let mut rng = match self.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let seeds = select_seeds(&mut rng, self.seed_size.get(), self.seed_id_upper_bound)?;
        self.run_with_seeds(name, graph, seeds, truth)
    }

    /// Runs the pipeline over `graph` with an explicit seed set.
    ///
    /// Seeds that are not vertices of `graph` are ignored.
    ///
    /// # Errors
    /// Returns [`PartitionError::EmptyGraph`] when `graph` has no vertices.
    ///
    /// # Examples
    /// ```
    /// use sybilcut_core::{Graph, PartitionerBuilder, SeedSet, SybilGroundTruth};
    ///
    /// let graph = Graph::from_edges(&[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)]);
    /// let outcome = PartitionerBuilder::new().build()?.run_with_seeds(
    ///     "path",
    ///     &graph,
    ///     SeedSet::from_ids([0, 1, 2]),
    ///     &SybilGroundTruth::default(),
    /// )?;
    /// assert_eq!(outcome.honest_vertices(), vec![0, 1, 2, 3, 4, 5]);
    /// assert!(outcome.sybil_vertices().is_empty());
    /// assert_eq!(outcome.report().accepted, 3);
    /// # Ok::<(), sybilcut_core::PartitionError>(())
    /// ```
    pub fn run_with_seeds(
        &self,
        name: &str,
        graph: &Graph,
        seeds: SeedSet,
        truth: &SybilGroundTruth,
    ) -> Result<PartitionOutcome> {
        ensure_not_empty(name, graph)?;
        let mut regions = build_initial_partition(graph, &seeds);
        if regions.honest.is_empty() {
            warn!(graph = name, "no seed is a vertex of the graph");
        }
        let report = grow_honest_region(graph, &mut regions);
        let metrics = PartitionMetrics::compute(graph, &regions.honest, &regions.sybil, truth);
        info!(
            graph = name,
            honest = regions.honest.vertex_count(),
            sybil = regions.sybil.vertex_count(),
            score = report.final_score,
            "partition complete"
        );
        Ok(PartitionOutcome {
            seeds,
            regions,
            report,
            metrics,
        })
    }
}

fn ensure_not_empty(name: &str, graph: &Graph) -> Result<()> {
    if graph.is_empty() {
        warn!(graph = name, "graph is empty, returning error");
        return Err(PartitionError::EmptyGraph {
            graph: Arc::from(name),
        });
    }
    Ok(())
}

/// Result of a [`Partitioner`] run.
#[derive(Clone, Debug, PartialEq)]
pub struct PartitionOutcome {
    seeds: SeedSet,
    regions: RegionPair,
    report: GrowthReport,
    metrics: PartitionMetrics,
}

impl PartitionOutcome {
    /// Seeds the honest region was grown from.
    #[must_use]
    pub fn seeds(&self) -> &SeedSet {
        &self.seeds
    }

    /// Settled honest region.
    #[must_use]
    pub fn honest(&self) -> &Graph {
        &self.regions.honest
    }

    /// Settled Sybil region.
    #[must_use]
    pub fn sybil(&self) -> &Graph {
        &self.regions.sybil
    }

    /// Honest vertex ids in ascending order.
    #[must_use]
    pub fn honest_vertices(&self) -> Vec<VertexId> {
        self.regions.honest.sorted_vertices()
    }

    /// Sybil vertex ids in ascending order.
    #[must_use]
    pub fn sybil_vertices(&self) -> Vec<VertexId> {
        self.regions.sybil.sorted_vertices()
    }

    /// Optimiser summary.
    #[must_use]
    pub fn report(&self) -> &GrowthReport {
        &self.report
    }

    /// Metrics record of the settled split.
    #[must_use]
    pub fn metrics(&self) -> &PartitionMetrics {
        &self.metrics
    }

    /// Consumes the outcome and returns the settled regions.
    #[must_use]
    pub fn into_regions(self) -> RegionPair {
        self.regions
    }
}

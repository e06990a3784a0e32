//! Greedy region growing driven by normalised conductance.
//!
//! The grower walks a snapshot of the Sybil region in ascending id order and
//! tentatively migrates each vertex into the honest region. A move is kept
//! only when it strictly improves the normalised conductance of the split;
//! otherwise the honest region, the Sybil region, and the deferred-edge
//! ledger are restored exactly.

mod ledger;

use tracing::{debug, field, info, instrument};

use crate::{
    graph::{Edge, EdgeDirection, Graph, VertexId},
    partition::{RegionPair, cross_region_edges},
};

pub use self::ledger::{DeferredEdgeLedger, EdgeState};

/// Edge tallies of a two-region split.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EdgeCounts {
    /// Edges with both endpoints in the honest region.
    pub honest_internal: usize,
    /// Edges with both endpoints in the Sybil region.
    pub sybil_internal: usize,
    /// Edges with one endpoint in each region.
    pub cross: usize,
}

impl EdgeCounts {
    /// Counts the edges stored in each region and in the cross-region graph.
    #[must_use]
    pub fn measure(honest: &Graph, sybil: &Graph, cross: &Graph) -> Self {
        Self {
            honest_internal: honest.edge_count(),
            sybil_internal: sybil.edge_count(),
            cross: cross.edge_count(),
        }
    }

    /// Normalised conductance `K − eA·eB / (eA² + eA·eB)` where
    /// `K = eAA / (eAA + eAB)`, `eA = eAA + eAB` and `eB = eBB + eAB`.
    ///
    /// The value is NaN when the honest region has neither internal nor
    /// boundary edges.
    ///
    /// # Examples
    /// ```
    /// use sybilcut_core::EdgeCounts;
    ///
    /// let counts = EdgeCounts { honest_internal: 4, sybil_internal: 0, cross: 0 };
    /// assert_eq!(counts.normalized_conductance(), 1.0);
    ///
    /// let empty = EdgeCounts::default();
    /// assert!(empty.normalized_conductance().is_nan());
    /// ```
    #[must_use]
    pub fn normalized_conductance(&self) -> f64 {
        let e_aa = self.honest_internal as f64;
        let e_bb = self.sybil_internal as f64;
        let e_ab = self.cross as f64;
        let e_a = e_aa + e_ab;
        let e_b = e_bb + e_ab;
        let k = e_aa / e_a;
        k - (e_a * e_b) / (e_a * e_a + e_a * e_b)
    }
}

/// Result of a single tentative migration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveOutcome {
    /// The move improved the score and was kept.
    Accepted {
        /// Score after the move.
        score: f64,
    },
    /// The move did not improve the score and was rolled back.
    Rejected {
        /// Score the move would have produced.
        candidate: f64,
    },
    /// The vertex was not in the Sybil region.
    Skipped,
}

/// Summary of a completed region-growing run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GrowthReport {
    /// Score of the split before any migration.
    pub initial_score: f64,
    /// Score of the settled split.
    pub final_score: f64,
    /// Scores reached by each accepted move, in order.
    pub accepted_scores: Vec<f64>,
    /// Number of accepted migrations.
    pub accepted: usize,
    /// Number of rejected migrations.
    pub rejected: usize,
    /// Edges still waiting for their second endpoint when the run ended.
    pub unresolved_edges: usize,
}

/// Changes applied by a tentative migration, kept so it can be undone.
#[derive(Debug)]
struct TentativeMove {
    vertex: VertexId,
    displaced: Vec<Edge>,
    journal: Vec<(Edge, Option<EdgeState>)>,
}

/// Region-growing optimiser holding exclusive access to both regions.
///
/// While a grower exists nothing else can observe or mutate the regions it
/// borrows; [`RegionGrower::run`] consumes it and releases them.
///
/// # Examples
/// ```
/// use sybilcut_core::{Graph, RegionGrower, SeedSet, build_initial_partition};
///
/// let graph = Graph::from_edges(&[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)]);
/// let mut regions = build_initial_partition(&graph, &SeedSet::from_ids([0, 1, 2]));
/// let report = RegionGrower::new(&graph, &mut regions.honest, &mut regions.sybil).run();
/// assert_eq!(report.accepted, 3);
/// assert!(regions.sybil.is_empty());
/// assert_eq!(regions.honest.vertex_count(), 6);
/// ```
#[derive(Debug)]
pub struct RegionGrower<'g> {
    original: &'g Graph,
    honest: &'g mut Graph,
    sybil: &'g mut Graph,
    ledger: DeferredEdgeLedger,
    cross: Graph,
    score: f64,
}

impl<'g> RegionGrower<'g> {
    /// Creates a grower over an initial split of `original`.
    pub fn new(original: &'g Graph, honest: &'g mut Graph, sybil: &'g mut Graph) -> Self {
        let cross = cross_region_edges(original, &*honest, &*sybil);
        let score = EdgeCounts::measure(&*honest, &*sybil, &cross).normalized_conductance();
        Self {
            original,
            honest,
            sybil,
            ledger: DeferredEdgeLedger::default(),
            cross,
            score,
        }
    }

    /// Current best score.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Current honest region.
    #[must_use]
    pub fn honest(&self) -> &Graph {
        &*self.honest
    }

    /// Current Sybil region.
    #[must_use]
    pub fn sybil(&self) -> &Graph {
        &*self.sybil
    }

    /// Edges currently crossing the split.
    #[must_use]
    pub fn cross_edges(&self) -> &Graph {
        &self.cross
    }

    /// Deferred-edge ledger accumulated so far.
    #[must_use]
    pub fn ledger(&self) -> &DeferredEdgeLedger {
        &self.ledger
    }

    /// Tries to migrate `vertex` from the Sybil region into the honest region.
    ///
    /// Ties with the current score count as no improvement.
    pub fn step(&mut self, vertex: VertexId) -> MoveOutcome {
        let Some(tentative) = self.migrate(vertex) else {
            return MoveOutcome::Skipped;
        };
        let cross = cross_region_edges(self.original, &*self.honest, &*self.sybil);
        let candidate =
            EdgeCounts::measure(&*self.honest, &*self.sybil, &cross).normalized_conductance();
        if candidate > self.score {
            self.score = candidate;
            self.cross = cross;
            MoveOutcome::Accepted { score: candidate }
        } else {
            self.rollback(tentative);
            MoveOutcome::Rejected { candidate }
        }
    }

    /// Runs one pass over the Sybil vertices present at the start, in
    /// ascending id order, and returns a summary of the run.
    #[instrument(
        name = "core.optimize",
        skip_all,
        fields(candidates = field::Empty, initial_score = self.score),
    )]
    pub fn run(mut self) -> GrowthReport {
        let candidates = self.sybil.sorted_vertices();
        tracing::Span::current().record("candidates", candidates.len());

        let mut report = GrowthReport {
            initial_score: self.score,
            ..GrowthReport::default()
        };
        for vertex in candidates {
            match self.step(vertex) {
                MoveOutcome::Accepted { score } => {
                    debug!(vertex, score, "migration accepted");
                    report.accepted += 1;
                    report.accepted_scores.push(score);
                }
                MoveOutcome::Rejected { candidate } => {
                    debug!(vertex, candidate, best = self.score, "migration rejected");
                    report.rejected += 1;
                }
                MoveOutcome::Skipped => {}
            }
        }
        report.final_score = self.score;
        report.unresolved_edges = self.ledger.deferred_count();

        info!(
            accepted = report.accepted,
            rejected = report.rejected,
            final_score = report.final_score,
            unresolved_edges = report.unresolved_edges,
            honest_vertices = self.honest.vertex_count(),
            sybil_vertices = self.sybil.vertex_count(),
            "region growing finished"
        );
        report
    }

    fn migrate(&mut self, vertex: VertexId) -> Option<TentativeMove> {
        let displaced = self.sybil.adjacent_edges(vertex)?;
        self.honest.add_vertex(vertex);

        let mut journal = Vec::new();
        for partner in self.ledger.resolve_ready(vertex, &*self.honest) {
            self.honest
                .add_edge(vertex, partner, EdgeDirection::Undirected);
            journal.push((Edge::new(vertex, partner), Some(EdgeState::Deferred)));
        }

        for edge in &displaced {
            if self.honest.contains_vertex(edge.target()) {
                self.honest
                    .add_edge(edge.source(), edge.target(), EdgeDirection::Undirected);
            } else {
                let previous = self.ledger.defer(edge.source(), edge.target());
                journal.push((*edge, previous));
            }
        }

        self.sybil.remove_vertex(vertex);
        Some(TentativeMove {
            vertex,
            displaced,
            journal,
        })
    }

    fn rollback(&mut self, tentative: TentativeMove) {
        let TentativeMove {
            vertex,
            displaced,
            journal,
        } = tentative;
        self.honest.remove_vertex(vertex);
        self.sybil.add_vertex(vertex);
        self.sybil.add_edges(displaced, EdgeDirection::Undirected);
        for (edge, previous) in journal.into_iter().rev() {
            self.ledger.restore(edge, previous);
        }
    }
}

/// Grows the honest region of `regions` in place and returns the run summary.
///
/// # Examples
/// ```
/// use sybilcut_core::{Graph, SeedSet, build_initial_partition, grow_honest_region};
///
/// let graph = Graph::from_edges(&[(0, 1), (1, 2), (2, 3)]);
/// let mut regions = build_initial_partition(&graph, &SeedSet::from_ids([0, 1]));
/// let report = grow_honest_region(&graph, &mut regions);
/// assert!(report.final_score >= report.initial_score);
/// ```
pub fn grow_honest_region(original: &Graph, regions: &mut RegionPair) -> GrowthReport {
    RegionGrower::new(original, &mut regions.honest, &mut regions.sybil).run()
}

#[cfg(test)]
mod tests;

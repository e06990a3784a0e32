//! Sybilcut core library.
//!
//! Splits a social graph into an honest region and a suspected Sybil region
//! by greedily growing a seed-induced honest core while the normalised
//! conductance of the split keeps improving, then scores the result.
//!
//! The pipeline lives behind [`Partitioner`]; the individual stages
//! ([`select_seeds`], [`build_initial_partition`], [`RegionGrower`] and
//! [`PartitionMetrics`]) are exported for callers that need finer control.

mod builder;
mod error;
mod graph;
mod metrics;
mod optimizer;
mod partition;
mod partitioner;
mod seeds;

pub use crate::{
    builder::PartitionerBuilder,
    error::{GraphError, GraphErrorCode, PartitionError, PartitionErrorCode, Result},
    graph::{Edge, EdgeDirection, Graph, Traversal, VertexId, VisitColor, VisitRecord},
    metrics::{
        PartitionMetrics, SybilGroundTruth, conductance, honest_correctness, modularity,
        sybil_correctness,
    },
    optimizer::{
        DeferredEdgeLedger, EdgeCounts, EdgeState, GrowthReport, MoveOutcome, RegionGrower,
        grow_honest_region,
    },
    partition::{RegionPair, build_initial_partition, cross_region_edges},
    partitioner::{PartitionOutcome, Partitioner},
    seeds::{DEFAULT_SEED_ID_UPPER_BOUND, DEFAULT_SEED_SIZE, SeedSet, select_seeds},
};

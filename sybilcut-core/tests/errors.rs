use std::sync::Arc;

use rstest::rstest;
use sybilcut_core::{GraphError, GraphErrorCode, PartitionError, PartitionErrorCode};

#[rstest]
fn returns_expected_graph_code() {
    let error = GraphError::VertexNotFound { vertex: 3 };
    assert_eq!(error.code(), GraphErrorCode::VertexNotFound);
    assert_eq!(error.code().as_str(), "GRAPH_VERTEX_NOT_FOUND");
    assert_eq!(error.to_string(), "vertex 3 is not present in the graph");
}

#[rstest]
#[case(
    PartitionError::InvalidSeedSize { got: 0 },
    PartitionErrorCode::InvalidSeedSize,
    "PARTITION_INVALID_SEED_SIZE",
)]
#[case(
    PartitionError::SeedRangeTooSmall { seed_size: 30, range: 11 },
    PartitionErrorCode::SeedRangeTooSmall,
    "PARTITION_SEED_RANGE_TOO_SMALL",
)]
#[case(
    PartitionError::InsufficientVertices {
        graph: Arc::from("small"),
        vertices: 40,
        required: 101,
    },
    PartitionErrorCode::InsufficientVertices,
    "PARTITION_INSUFFICIENT_VERTICES",
)]
#[case(
    PartitionError::EmptyGraph { graph: Arc::from("empty") },
    PartitionErrorCode::EmptyGraph,
    "PARTITION_EMPTY_GRAPH",
)]
fn returns_expected_partition_code(
    #[case] error: PartitionError,
    #[case] expected: PartitionErrorCode,
    #[case] text: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), text);
    assert_eq!(expected.to_string(), text);
}

#[rstest]
fn messages_name_the_graph() {
    let error = PartitionError::InsufficientVertices {
        graph: Arc::from("graphA"),
        vertices: 40,
        required: 101,
    };
    assert_eq!(
        error.to_string(),
        "graph `graphA` has 40 vertices but seed sampling requires 101"
    );
}

//! Integration tests for the adjacency-list and ground-truth readers.
use std::io::Cursor;

use rstest::rstest;
use sybilcut_core::Edge;
use sybilcut_providers_text::{AdjacencyListProvider, GroundTruthProvider, TextProviderError};

struct FailingReader;

impl std::io::Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
        Err(std::io::Error::other("boom"))
    }
}

impl std::io::BufRead for FailingReader {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        Err(std::io::Error::other("boom"))
    }

    fn consume(&mut self, _amt: usize) {}
}

#[rstest]
fn adjacency_ignores_the_leading_label() {
    let raw = "0 1\n1 0 2\n2 1\n";
    let provider =
        AdjacencyListProvider::try_from_reader("demo", Cursor::new(raw)).expect("valid list");
    let graph = provider.graph();
    assert_eq!(graph.sorted_vertices(), vec![0, 1, 2]);
    assert!(graph.contains_edge(Edge::new(0, 1)));
    assert!(graph.contains_edge(Edge::new(2, 1)));
    assert!(!graph.contains_edge(Edge::new(0, 0)));
}

#[rstest]
fn adjacency_keeps_label_only_lines_as_isolated_vertices() {
    let raw = "a 1\nb 0\nc\n";
    let graph = AdjacencyListProvider::try_from_reader("demo", Cursor::new(raw))
        .expect("valid list")
        .into_graph();
    assert_eq!(graph.vertex_count(), 3);
    assert_eq!(graph.degree(2), Some(0));
}

#[rstest]
#[case("x 1\n\n  \ny 0\n")]
#[case("x\t1\r\ny   0\r\n")]
fn adjacency_tolerates_blank_lines_and_mixed_whitespace(#[case] raw: &str) {
    let graph = AdjacencyListProvider::try_from_reader("demo", Cursor::new(raw))
        .expect("valid list")
        .into_graph();
    assert_eq!(graph.sorted_vertices(), vec![0, 1]);
    assert_eq!(graph.edge_count(), 1);
}

#[rstest]
fn adjacency_symmetrises_one_sided_rows() {
    let raw = "a 2\nb\nc\n";
    let graph = AdjacencyListProvider::try_from_reader("demo", Cursor::new(raw))
        .expect("valid list")
        .into_graph();
    assert!(graph.contains_edge(Edge::new(2, 0)));
}

#[rstest]
#[case("a 1\nb zero\n", 2, "zero")]
#[case("a -1\n", 1, "-1")]
#[case("a 1.5\n", 1, "1.5")]
fn adjacency_rejects_bad_tokens(#[case] raw: &str, #[case] line: usize, #[case] token: &str) {
    let err = AdjacencyListProvider::try_from_reader("demo", Cursor::new(raw))
        .expect_err("malformed token must fail the read");
    assert!(matches!(
        err,
        TextProviderError::MalformedAdjacency { line: l, token: ref t } if l == line && t == token
    ));
}

#[rstest]
#[case("")]
#[case("\n \n")]
fn adjacency_rejects_empty_input(#[case] raw: &str) {
    let err = AdjacencyListProvider::try_from_reader("demo", Cursor::new(raw))
        .expect_err("empty input must fail");
    assert!(matches!(err, TextProviderError::EmptyInput));
}

#[rstest]
fn adjacency_propagates_io_error() {
    let err = AdjacencyListProvider::try_from_reader("demo", FailingReader)
        .expect_err("I/O failure must propagate");
    assert!(matches!(err, TextProviderError::Io(_)));
}

#[rstest]
fn ground_truth_trims_and_deduplicates() {
    let provider = GroundTruthProvider::try_from_reader("truth", Cursor::new(" 4 \n2\n4\n\n"))
        .expect("valid truth");
    assert_eq!(provider.name(), "truth");
    assert_eq!(provider.truth().len(), 2);
    assert!(provider.truth().contains(4));
}

#[rstest]
fn ground_truth_may_be_empty() {
    let truth = GroundTruthProvider::try_from_reader("truth", Cursor::new(""))
        .expect("empty truth is valid")
        .into_truth();
    assert!(truth.is_empty());
}

#[rstest]
#[case("1\n2 3\n", 2, "2 3")]
#[case("sybil\n", 1, "sybil")]
fn ground_truth_rejects_non_integer_lines(
    #[case] raw: &str,
    #[case] line: usize,
    #[case] value: &str,
) {
    let err = GroundTruthProvider::try_from_reader("truth", Cursor::new(raw))
        .expect_err("malformed line must fail the read");
    assert!(matches!(
        err,
        TextProviderError::MalformedGroundTruth { line: l, value: ref v } if l == line && v == value
    ));
}

#[rstest]
fn ground_truth_propagates_io_error() {
    let err = GroundTruthProvider::try_from_reader("truth", FailingReader)
        .expect_err("I/O failure must propagate");
    assert!(matches!(err, TextProviderError::Io(_)));
}

//! Unit tests for the region-growing optimiser.

use rstest::{fixture, rstest};

use super::{EdgeCounts, EdgeState, MoveOutcome, RegionGrower, grow_honest_region};
use crate::{
    graph::{Edge, Graph},
    partition::{RegionPair, build_initial_partition},
    seeds::SeedSet,
};

const TOLERANCE: f64 = 1e-12;

#[fixture]
fn path() -> Graph {
    Graph::from_edges(&[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)])
}

#[fixture]
fn bridged_triangles() -> Graph {
    Graph::from_edges(&[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3)])
}

fn split(graph: &Graph, seeds: &[usize]) -> RegionPair {
    build_initial_partition(graph, &SeedSet::from_ids(seeds.iter().copied()))
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

fn assert_partitioned(original: &Graph, honest: &Graph, sybil: &Graph) {
    for vertex in original.vertices() {
        assert!(
            honest.contains_vertex(vertex) ^ sybil.contains_vertex(vertex),
            "vertex {vertex} must be in exactly one region"
        );
    }
    assert_eq!(
        honest.vertex_count() + sybil.vertex_count(),
        original.vertex_count()
    );
}

#[rstest]
#[case(EdgeCounts { honest_internal: 2, sybil_internal: 2, cross: 1 }, 1.0 / 6.0)]
#[case(EdgeCounts { honest_internal: 2, sybil_internal: 1, cross: 1 }, 4.0 / 15.0)]
#[case(EdgeCounts { honest_internal: 3, sybil_internal: 0, cross: 1 }, 0.55)]
#[case(EdgeCounts { honest_internal: 4, sybil_internal: 0, cross: 0 }, 1.0)]
fn normalized_conductance_matches_formula(#[case] counts: EdgeCounts, #[case] expected: f64) {
    assert_close(counts.normalized_conductance(), expected);
}

#[rstest]
fn path_migrates_one_vertex_at_a_time(path: Graph) {
    let mut regions = split(&path, &[0, 1, 2]);
    let mut grower = RegionGrower::new(&path, &mut regions.honest, &mut regions.sybil);
    assert_close(grower.score(), 1.0 / 6.0);
    assert_eq!(grower.cross_edges().edge_count(), 1);
    assert!(grower.cross_edges().contains_edge(Edge::new(2, 3)));

    assert!(matches!(grower.step(3), MoveOutcome::Accepted { .. }));
    assert_close(grower.score(), 4.0 / 15.0);
    assert_eq!(grower.ledger().state(3, 4), Some(EdgeState::Deferred));
    assert_partitioned(&path, grower.honest(), grower.sybil());

    assert!(matches!(grower.step(4), MoveOutcome::Accepted { .. }));
    assert_close(grower.score(), 0.55);
    assert_eq!(grower.ledger().state(3, 4), Some(EdgeState::Resolved));
    assert_eq!(grower.ledger().state(4, 5), Some(EdgeState::Deferred));
    assert!(grower.honest().contains_edge(Edge::new(4, 3)));
    assert_partitioned(&path, grower.honest(), grower.sybil());

    assert!(matches!(grower.step(5), MoveOutcome::Accepted { .. }));
    assert_close(grower.score(), 1.0);
    assert_eq!(grower.ledger().deferred_count(), 0);
    assert_eq!(grower.cross_edges().edge_count(), 0);
    assert!(grower.sybil().is_empty());
    assert_eq!(grower.honest().sorted_vertices(), vec![0, 1, 2, 3, 4, 5]);
}

#[rstest]
fn boundary_edge_from_the_initial_split_is_never_materialised(path: Graph) {
    let mut regions = split(&path, &[0, 1, 2]);
    grow_honest_region(&path, &mut regions);
    assert!(!regions.honest.contains_edge(Edge::new(2, 3)));
    assert_eq!(regions.honest.edge_count(), 4);
}

#[rstest]
fn report_summarises_the_run(path: Graph) {
    let mut regions = split(&path, &[0, 1, 2]);
    let report = grow_honest_region(&path, &mut regions);
    assert_eq!(report.accepted, 3);
    assert_eq!(report.rejected, 0);
    assert_eq!(report.unresolved_edges, 0);
    assert_close(report.initial_score, 1.0 / 6.0);
    assert_close(report.final_score, 1.0);
    assert_eq!(report.accepted_scores.len(), 3);
}

#[rstest]
fn worse_moves_are_rejected(bridged_triangles: Graph) {
    let mut regions = split(&bridged_triangles, &[0, 1, 2]);
    let report = grow_honest_region(&bridged_triangles, &mut regions);
    assert_eq!(report.accepted, 0);
    assert_eq!(report.rejected, 3);
    assert_close(report.final_score, 0.25);
    assert_eq!(regions.honest.sorted_vertices(), vec![0, 1, 2]);
    assert_eq!(regions.sybil.sorted_vertices(), vec![3, 4, 5]);
    assert_eq!(regions.sybil.edge_count(), 3);
    assert_eq!(report.unresolved_edges, 0);
}

#[rstest]
fn rejected_move_restores_every_structure(bridged_triangles: Graph) {
    let mut regions = split(&bridged_triangles, &[0, 1, 2]);
    let mut grower = RegionGrower::new(
        &bridged_triangles,
        &mut regions.honest,
        &mut regions.sybil,
    );
    let honest = grower.honest().clone();
    let sybil = grower.sybil().clone();
    let ledger = grower.ledger().clone();
    let cross = grower.cross_edges().clone();
    let score = grower.score();

    let outcome = grower.step(3);
    assert!(
        matches!(outcome, MoveOutcome::Rejected { candidate } if (candidate - 0.225).abs() < TOLERANCE)
    );
    assert_eq!(grower.honest(), &honest);
    assert_eq!(grower.sybil(), &sybil);
    assert_eq!(grower.ledger(), &ledger);
    assert_eq!(grower.cross_edges(), &cross);
    assert_close(grower.score(), score);
}

#[rstest]
fn rollback_restores_resolved_ledger_entries(path: Graph) {
    let mut regions = split(&path, &[0, 1, 2]);
    let mut grower = RegionGrower::new(&path, &mut regions.honest, &mut regions.sybil);
    assert!(matches!(grower.step(3), MoveOutcome::Accepted { .. }));

    let honest = grower.honest().clone();
    let sybil = grower.sybil().clone();
    let ledger = grower.ledger().clone();

    let tentative = grower.migrate(4).expect("vertex 4 is in the Sybil region");
    assert_eq!(grower.ledger().state(3, 4), Some(EdgeState::Resolved));
    assert_eq!(grower.ledger().state(4, 5), Some(EdgeState::Deferred));
    grower.rollback(tentative);

    assert_eq!(grower.honest(), &honest);
    assert_eq!(grower.sybil(), &sybil);
    assert_eq!(grower.ledger(), &ledger);
}

#[rstest]
fn ties_do_not_count_as_improvement() {
    let mut graph = Graph::from_edges(&[(0, 1), (1, 2)]);
    graph.add_vertex(9);
    let mut regions = split(&graph, &[0, 1]);
    let mut grower = RegionGrower::new(&graph, &mut regions.honest, &mut regions.sybil);

    assert!(matches!(grower.step(2), MoveOutcome::Accepted { .. }));
    let best = grower.score();
    assert!(matches!(
        grower.step(9),
        MoveOutcome::Rejected { candidate } if candidate == best
    ));
    assert!(grower.sybil().contains_vertex(9));
}

#[rstest]
fn stepping_an_honest_vertex_is_skipped(path: Graph) {
    let mut regions = split(&path, &[0, 1, 2]);
    let mut grower = RegionGrower::new(&path, &mut regions.honest, &mut regions.sybil);
    assert_eq!(grower.step(1), MoveOutcome::Skipped);
    assert_eq!(grower.step(77), MoveOutcome::Skipped);
}

#[rstest]
fn nan_baseline_blocks_every_move() {
    // Seeds without edges leave the honest region with no internal or
    // boundary edges, so the score is undefined and nothing can beat it.
    let mut graph = Graph::from_edges(&[(2, 3)]);
    graph.add_vertex(0);
    let mut regions = split(&graph, &[0]);
    let report = grow_honest_region(&graph, &mut regions);
    assert!(report.initial_score.is_nan());
    assert_eq!(report.accepted, 0);
    assert_eq!(regions.sybil.sorted_vertices(), vec![2, 3]);
}

#[rstest]
fn repeated_runs_are_identical(bridged_triangles: Graph) {
    let mut graph = bridged_triangles;
    graph.add_edge(1, 4, crate::graph::EdgeDirection::Undirected);
    let run = || {
        let mut regions = split(&graph, &[0, 1]);
        let report = grow_honest_region(&graph, &mut regions);
        (regions, report)
    };
    let (first_regions, first_report) = run();
    let (second_regions, second_report) = run();
    assert_eq!(first_regions, second_regions);
    assert_eq!(first_report, second_report);
}

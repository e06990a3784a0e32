//! Partition metric benchmarks.
//!
//! Measures the full metrics record over a grown partition. Clustering
//! coefficients dominate, so sizes are kept moderate.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use sybilcut_benches::{
    error::BenchSetupError,
    params::PlantedBenchParams,
    source::{PlantedConfig, PlantedGraph},
};
use sybilcut_core::{PartitionMetrics, SeedSet, build_initial_partition, grow_honest_region};

/// Seed used for graph generation.
const SEED: u64 = 7;

/// Honest/Sybil community sizes to benchmark.
const COMMUNITIES: &[(usize, usize)] = &[(200, 50), (1_000, 250)];

fn partition_metrics_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("partition_metrics");
    group.sample_size(30);

    for &(honest_vertices, sybil_vertices) in COMMUNITIES {
        let planted = PlantedGraph::generate(&PlantedConfig {
            honest_vertices,
            sybil_vertices,
            edges_per_vertex: 4,
            attack_edges: 10,
            seed: SEED,
        })?;
        let mut regions = build_initial_partition(planted.graph(), &SeedSet::from_ids(0..20));
        let _report = grow_honest_region(planted.graph(), &mut regions);
        let params = PlantedBenchParams {
            honest_vertices,
            sybil_vertices,
        };

        group.bench_with_input(
            BenchmarkId::from_parameter(&params),
            &(&planted, &regions),
            |b, &(planted, regions)| {
                b.iter(|| {
                    PartitionMetrics::compute(
                        planted.graph(),
                        &regions.honest,
                        &regions.sybil,
                        planted.sybils(),
                    )
                });
            },
        );
    }

    group.finish();
    Ok(())
}

fn partition_metrics(c: &mut Criterion) {
    if let Err(err) = partition_metrics_impl(c) {
        panic!("partition_metrics benchmark setup failed: {err}");
    }
}

criterion_group!(benches, partition_metrics);
criterion_main!(benches);

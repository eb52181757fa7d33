//! Worker-pool tests: batch dispatch, subtree integrity, counters.

use std::collections::BTreeSet;
use std::sync::Arc;

use auriga_core::ParticleId;
use auriga_engine::{Chain, RunConfig};
use auriga_modules::Collector;
use auriga_test_utils::{seeded_candidates, DeactivateAfter, SecondarySpawner};

#[test]
fn batch_processes_every_primary_and_its_subtree() {
    let collector = Arc::new(Collector::builder().build());
    let mut chain = Chain::new();
    chain.add(collector.clone());
    chain.add(Arc::new(SecondarySpawner::new(2, ParticleId(22))));
    chain.add(Arc::new(DeactivateAfter::new(1)));

    let primaries = seeded_candidates(50, 7, 1e22);
    let expected: BTreeSet<u64> = primaries.iter().map(|c| c.serial().value()).collect();

    let report = chain
        .run_batch(primaries, &RunConfig::with_workers(4))
        .unwrap();

    assert_eq!(report.primaries, 50);
    assert_eq!(report.nodes, 150, "each primary spawned two secondaries");
    // Each of the 150 nodes was active for exactly one collector pass.
    assert_eq!(collector.len(), 150);

    // Every dispatched primary shows up exactly once.
    let seen: BTreeSet<u64> = collector
        .snapshot()
        .iter()
        .filter(|c| c.parent_serial().is_none())
        .map(|c| c.serial().value())
        .collect();
    assert_eq!(seen, expected);
}

#[test]
fn worker_counts_do_not_change_results() {
    for workers in [1, 2, 8] {
        let collector = Arc::new(Collector::builder().build());
        let mut chain = Chain::new();
        chain.add(collector.clone());
        chain.add(Arc::new(DeactivateAfter::new(1)));

        let report = chain
            .run_batch(seeded_candidates(40, 11, 1e22), &RunConfig::with_workers(workers))
            .unwrap();
        assert_eq!(report.primaries, 40);
        assert_eq!(report.nodes, 40);
        assert_eq!(collector.len(), 40, "workers={workers}");
    }
}

#[test]
fn empty_batch_reports_zero() {
    let chain = Chain::new();
    let report = chain
        .run_batch(Vec::new(), &RunConfig::with_workers(2))
        .unwrap();
    assert_eq!(report.primaries, 0);
    assert_eq!(report.nodes, 0);
}

//! Ordering tests for the chain traversal policy.
//!
//! The driver promises: the parent's module chain is fully exhausted
//! (repeated full passes until inactive) before any secondary is touched,
//! and secondaries are visited depth-first in creation order. Replay and
//! dump consumers depend on this order, so it is pinned here.

use std::sync::Arc;

use auriga_core::{Candidate, CandidateRef, CandidateSerial, ParticleId, ParticleState, Vector3};
use auriga_engine::Chain;
use auriga_test_utils::{DeactivateAfter, RecordingModule, SecondarySpawner};

fn primary() -> CandidateRef {
    Candidate::from_source(ParticleState::new(
        ParticleId(2212),
        1e19,
        Vector3::ZERO,
        Vector3::new(1.0, 0.0, 0.0),
    ))
}

#[test]
fn parent_fully_resolved_before_secondaries() {
    let recorder = Arc::new(RecordingModule::new());
    let mut chain = Chain::new();
    chain.add(recorder.clone());
    chain.add(Arc::new(SecondarySpawner::new(2, ParticleId(22))));
    chain.add(Arc::new(DeactivateAfter::new(2)));

    let parent = primary();
    chain.run(&parent);

    let children = parent.secondaries();
    assert_eq!(children.len(), 2);
    let p = parent.serial();
    let a = children[0].serial();
    let b = children[1].serial();

    // Two passes over the parent, then each child's two passes, in
    // creation order.
    assert_eq!(recorder.serials(), vec![p, p, a, a, b, b]);
}

#[test]
fn traversal_is_depth_first_preorder() {
    let parent = primary();
    let child_a = parent.add_secondary(parent.current().with_particle(ParticleId(22), 1e18));
    let grandchild = child_a.add_secondary(child_a.current().with_particle(ParticleId(11), 5e17));
    let child_b = parent.add_secondary(parent.current().with_particle(ParticleId(-11), 1e18));

    let recorder = Arc::new(RecordingModule::new());
    let mut chain = Chain::new();
    chain.add(recorder.clone());
    chain.add(Arc::new(DeactivateAfter::new(1)));

    chain.run(&parent);

    let expected: Vec<CandidateSerial> = vec![
        parent.serial(),
        child_a.serial(),
        grandchild.serial(),
        child_b.serial(),
    ];
    assert_eq!(recorder.serials(), expected);
}

#[test]
fn rerun_of_exhausted_tree_touches_only_reactivated_nodes() {
    let recorder = Arc::new(RecordingModule::new());
    let mut chain = Chain::new();
    chain.add(recorder.clone());
    chain.add(Arc::new(DeactivateAfter::new(1)));

    let parent = primary();
    let child = parent.add_secondary(parent.current().with_particle(ParticleId(22), 1e18));
    chain.run(&parent);
    assert_eq!(recorder.calls(), 2);

    // Everything is inactive; a second run is pure recursion, no
    // processing.
    chain.run(&parent);
    assert_eq!(recorder.calls(), 2);

    // Restarting just the child makes exactly the child run again.
    child.restart();
    chain.run(&parent);
    assert_eq!(recorder.calls(), 3);
    assert_eq!(*recorder.serials().last().unwrap(), child.serial());
}

#[test]
fn secondaries_spawned_mid_run_are_traversed() {
    // The spawner fires on the parent's first pass; the children must
    // still be picked up in the same run() call.
    let mut chain = Chain::new();
    chain.add(Arc::new(SecondarySpawner::new(3, ParticleId(22))));
    chain.add(Arc::new(DeactivateAfter::new(1)));

    let parent = primary();
    chain.run(&parent);

    assert_eq!(parent.secondary_count(), 3);
    for child in parent.secondaries() {
        assert!(!child.is_active(), "child was not traversed");
    }
}

//! Minimal end-to-end pipeline: a decaying population, a photon filter
//! routing to a collector, and a performance wrapper around the physics.
//!
//! Run with: `cargo run --example quickstart`

use std::sync::Arc;

use auriga_core::ParticleId;
use auriga_engine::{Chain, RunConfig};
use auriga_modules::{Collector, Forward, Ignore, ParticleFilter, PerformanceModule};
use auriga_test_utils::{seeded_candidates, DeactivateAfter, EnergyDecay, SecondarySpawner};

fn main() {
    // Collector for everything that looks like a photon.
    let photons = Arc::new(Collector::builder().clone_on_insert(true).build());
    let filter = ParticleFilter::builder()
        .ids([ParticleId(22)])
        .on_accept(Forward::to(photons.clone()))
        .on_reject(Ignore)
        .build();

    // Wrap the physics stand-ins so we can see where the time goes.
    let mut timed = PerformanceModule::new();
    timed.add(Arc::new(EnergyDecay {
        loss: 0.05,
        floor: 0.0,
        step: 3.0e22,
    }));
    timed.add(Arc::new(SecondarySpawner::new(1, ParticleId(22))));
    let timed = Arc::new(timed);

    let mut chain = Chain::new();
    chain.add(timed.clone());
    chain.add(Arc::new(filter));
    chain.add(Arc::new(DeactivateAfter::new(10)));

    let primaries = seeded_candidates(1_000, 1885, 1e22);
    let report = chain
        .run_batch(primaries, &RunConfig::default())
        .expect("default config is valid");

    println!(
        "processed {} primaries ({} nodes) in {:?}",
        report.primaries, report.nodes, report.elapsed
    );
    println!("collected {} photon snapshots", photons.len());
    print!("{}", timed.report());
}

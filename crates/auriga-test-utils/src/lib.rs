//! Test utilities and mock modules for Auriga development.
//!
//! Small, deterministic [`Module`] implementations for exercising the
//! driver and the built-in modules, plus a seeded candidate-population
//! generator. Not published; used as a dev-dependency across the
//! workspace.

#![forbid(unsafe_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use auriga_core::{Candidate, CandidateRef, CandidateSerial, ParticleId, ParticleState, Vector3};
use auriga_module::Module;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Records the serial of every candidate it processes, in call order.
///
/// Records regardless of the candidate's active state — it is a probe for
/// what the driver actually invoked.
pub struct RecordingModule {
    log: Mutex<Vec<CandidateSerial>>,
}

impl RecordingModule {
    /// An empty recorder.
    pub fn new() -> Self {
        Self {
            log: Mutex::new(Vec::new()),
        }
    }

    /// Number of `process` calls seen.
    pub fn calls(&self) -> usize {
        self.log.lock().unwrap().len()
    }

    /// The recorded serials, in call order.
    pub fn serials(&self) -> Vec<CandidateSerial> {
        self.log.lock().unwrap().clone()
    }
}

impl Default for RecordingModule {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for RecordingModule {
    fn name(&self) -> &str {
        "recording"
    }

    fn process(&self, candidate: &CandidateRef) {
        self.log.lock().unwrap().push(candidate.serial());
    }
}

/// Deactivates each candidate after it has seen it `passes` times.
///
/// The per-candidate pass count lives in the candidate's property bag
/// under the module's key, so independent instances in one chain count
/// independently.
pub struct DeactivateAfter {
    passes: i64,
    key: String,
}

/// Counter for unique [`DeactivateAfter`] property keys.
static DEACTIVATE_KEY_COUNTER: AtomicUsize = AtomicUsize::new(0);

impl DeactivateAfter {
    /// Deactivate after `passes` sightings of a candidate.
    pub fn new(passes: i64) -> Self {
        let n = DEACTIVATE_KEY_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self {
            passes,
            key: format!("deactivate_after.{n}.seen"),
        }
    }
}

impl Module for DeactivateAfter {
    fn name(&self) -> &str {
        "deactivate_after"
    }

    fn process(&self, candidate: &CandidateRef) {
        let seen = candidate
            .property(&self.key)
            .and_then(|v| v.as_int())
            .unwrap_or(0)
            + 1;
        candidate.set_property(self.key.clone(), seen);
        if seen >= self.passes {
            candidate.set_active(false);
        }
    }
}

/// Spawns `count` secondaries the first time it sees each primary
/// candidate.
///
/// Each secondary gets the given particle id and an equal share of the
/// parent's current energy, at the parent's position and direction.
/// Secondaries themselves are left alone, so spawning terminates; tests
/// needing deeper trees build them by hand.
pub struct SecondarySpawner {
    count: usize,
    id: ParticleId,
    key: String,
}

/// Counter for unique [`SecondarySpawner`] property keys.
static SPAWNER_KEY_COUNTER: AtomicUsize = AtomicUsize::new(0);

impl SecondarySpawner {
    /// Spawn `count` secondaries of type `id` per candidate.
    pub fn new(count: usize, id: ParticleId) -> Self {
        let n = SPAWNER_KEY_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self {
            count,
            id,
            key: format!("secondary_spawner.{n}.done"),
        }
    }
}

impl Module for SecondarySpawner {
    fn name(&self) -> &str {
        "secondary_spawner"
    }

    fn process(&self, candidate: &CandidateRef) {
        if candidate.parent_serial().is_some() || candidate.has_property(&self.key) {
            return;
        }
        candidate.set_property(self.key.clone(), true);
        let current = candidate.current();
        let share = current.energy / (self.count.max(1) as f64 + 1.0);
        for _ in 0..self.count {
            candidate.add_secondary(current.with_particle(self.id, share));
        }
    }
}

/// A propagation stand-in: advances the position, accumulates trajectory
/// length, bleeds energy, and deactivates below a floor.
pub struct EnergyDecay {
    /// Fractional energy loss per step.
    pub loss: f64,
    /// Deactivation threshold in joules.
    pub floor: f64,
    /// Step length in meters.
    pub step: f64,
}

impl Module for EnergyDecay {
    fn name(&self) -> &str {
        "energy_decay"
    }

    fn process(&self, candidate: &CandidateRef) {
        let mut state = candidate.current();
        state.position += state.direction * self.step;
        state.energy *= 1.0 - self.loss;
        candidate.set_current(state);
        candidate.set_current_step(self.step);
        candidate.add_trajectory_length(self.step);
        if state.energy <= self.floor {
            candidate.set_active(false);
        }
    }
}

/// A deterministic population of primary candidates.
///
/// Particle types are drawn from a small PDG palette, energies
/// log-uniform over 10^17..10^21 eV-equivalents (in joules), positions
/// inside a cube of the given half-size, directions uniform on the
/// sphere. Identical seeds produce identical populations.
pub fn seeded_candidates(n: usize, seed: u64, half_size: f64) -> Vec<CandidateRef> {
    const PALETTE: [i32; 4] = [22, 11, -11, 2212];
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let id = ParticleId(PALETTE[rng.random_range(0..PALETTE.len())]);
            let log_energy = rng.random_range(17.0..21.0);
            let energy = 10f64.powf(log_energy) * auriga_core::units::ELECTRON_VOLT;
            let position = Vector3::new(
                rng.random_range(-half_size..=half_size),
                rng.random_range(-half_size..=half_size),
                rng.random_range(-half_size..=half_size),
            );
            // Uniform direction via normalized Gaussian triple.
            let direction = loop {
                let v = Vector3::new(
                    rng.random::<f64>() * 2.0 - 1.0,
                    rng.random::<f64>() * 2.0 - 1.0,
                    rng.random::<f64>() * 2.0 - 1.0,
                );
                if v.length() > 1e-6 {
                    break v.normalized();
                }
            };
            Candidate::from_source(ParticleState::new(id, energy, position, direction))
        })
        .collect()
}

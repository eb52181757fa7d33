//! The emission-map filler: forwarding source states into a shared
//! accumulation structure.

use std::sync::{Arc, Mutex, RwLock};

use auriga_core::{CandidateRef, ParticleState};
use auriga_module::Module;

/// An externally owned accumulation structure binned over source states —
/// typically a directional emission histogram.
///
/// The map itself is out of the pipeline's scope; it only promises that
/// [`fill`](EmissionMap::fill) folds one source state into its bins. The
/// filler serializes calls, so implementations need no internal locking.
pub trait EmissionMap: Send + 'static {
    /// Fold one candidate's source state into the map.
    fn fill(&mut self, source: &ParticleState);
}

/// A shared handle to an emission map, with the mutex keyed to that
/// specific structure.
pub type SharedEmissionMap = Arc<Mutex<dyn EmissionMap>>;

/// A module that forwards every candidate's *source* state into a shared
/// emission map.
///
/// Many workers may update the map's bins concurrently, so the single
/// `fill` call runs inside the map's own mutex — and nothing else does.
/// With no map configured, or for an inactive candidate, `process` is a
/// silent no-op.
pub struct EmissionMapFiller {
    map: RwLock<Option<SharedEmissionMap>>,
}

impl EmissionMapFiller {
    /// A filler feeding `map`.
    pub fn new(map: SharedEmissionMap) -> Self {
        Self {
            map: RwLock::new(Some(map)),
        }
    }

    /// A filler with no map configured; `process` is a no-op until
    /// [`set_map`](EmissionMapFiller::set_map) is called.
    pub fn unconfigured() -> Self {
        Self {
            map: RwLock::new(None),
        }
    }

    /// Replace the target map.
    pub fn set_map(&self, map: SharedEmissionMap) {
        *self.map.write().unwrap() = Some(map);
    }

    /// Remove the target map; subsequent `process` calls are no-ops.
    pub fn clear_map(&self) {
        *self.map.write().unwrap() = None;
    }

    /// Whether a map is currently configured.
    pub fn is_configured(&self) -> bool {
        self.map.read().unwrap().is_some()
    }
}

impl Module for EmissionMapFiller {
    fn name(&self) -> &str {
        "emission_map_filler"
    }

    fn process(&self, candidate: &CandidateRef) {
        if !candidate.is_active() {
            return;
        }
        let map = match self.map.read().unwrap().clone() {
            Some(map) => map,
            None => return,
        };
        let source = candidate.source();
        // The one call into the shared structure, under its own mutex.
        map.lock().unwrap().fill(&source);
    }
}

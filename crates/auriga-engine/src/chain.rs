//! The ordered module chain and its traversal policy.

use auriga_core::CandidateRef;
use auriga_module::ModuleRef;

/// An ordered list of modules and the policy for applying them to a
/// candidate tree.
///
/// # Traversal policy
///
/// For a given candidate, [`run`](Chain::run) applies the *full* module
/// chain, in order, once per step, and repeats until the candidate goes
/// inactive or the configured step budget is exhausted. Only then does it
/// descend into the secondaries, traversing each one's entire subtree the
/// same way, in creation order. Consequences:
///
/// - no secondary is processed before its parent has reached a terminal
///   state for this run;
/// - the whole candidate tree is eventually exhausted;
/// - traversal order within one tree is deterministic.
///
/// Distinct top-level candidates are independent units of work; across
/// workers there is no relative ordering, and modules must not depend on
/// one.
///
/// # Step budget
///
/// `max_steps == 0` (the default) means unbounded: termination is the
/// modules' job, via deactivation. A nonzero budget is a driver guard for
/// chains whose modules cannot guarantee termination; when it runs out
/// the candidate is left exactly as the modules left it (still active)
/// and traversal moves on to the secondaries.
#[derive(Default)]
pub struct Chain {
    modules: Vec<ModuleRef>,
    max_steps: usize,
}

impl Chain {
    /// An empty chain with an unbounded step budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a module to the end of the chain.
    pub fn add(&mut self, module: ModuleRef) {
        self.modules.push(module);
    }

    /// Insert a module at `index`, shifting later modules back.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&mut self, index: usize, module: ModuleRef) {
        self.modules.insert(index, module);
    }

    /// Remove and return the module at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> ModuleRef {
        self.modules.remove(index)
    }

    /// The module at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&ModuleRef> {
        self.modules.get(index)
    }

    /// Number of modules in the chain.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the chain has no modules.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// The per-candidate step budget (0 = unbounded).
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Set the per-candidate step budget (0 = unbounded).
    pub fn set_max_steps(&mut self, max_steps: usize) {
        self.max_steps = max_steps;
    }

    /// Drive one candidate — and, recursively, its whole subtree — to
    /// completion.
    ///
    /// See the type-level docs for the traversal policy.
    pub fn run(&self, candidate: &CandidateRef) {
        let mut steps = 0usize;
        while candidate.is_active() {
            if self.max_steps != 0 && steps >= self.max_steps {
                break;
            }
            for module in &self.modules {
                module.process(candidate);
            }
            steps += 1;
        }
        // Parent fully resolved; now each secondary's subtree, in
        // creation order.
        for secondary in candidate.secondaries() {
            self.run(&secondary);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auriga_core::{Candidate, CandidateRef, ParticleId, ParticleState, Vector3};
    use auriga_module::Module;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn candidate() -> CandidateRef {
        Candidate::from_source(ParticleState::new(
            ParticleId(2212),
            1e19,
            Vector3::ZERO,
            Vector3::new(1.0, 0.0, 0.0),
        ))
    }

    struct CountThenStop {
        calls: AtomicUsize,
        stop_after: usize,
    }

    impl Module for CountThenStop {
        fn name(&self) -> &str {
            "count_then_stop"
        }

        fn process(&self, candidate: &CandidateRef) {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n >= self.stop_after {
                candidate.set_active(false);
            }
        }
    }

    #[test]
    fn chain_reruns_until_deactivation() {
        let module = Arc::new(CountThenStop {
            calls: AtomicUsize::new(0),
            stop_after: 4,
        });
        let mut chain = Chain::new();
        chain.add(module.clone());

        chain.run(&candidate());
        assert_eq!(module.calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn step_budget_stops_rerun_but_leaves_candidate_active() {
        let module = Arc::new(CountThenStop {
            calls: AtomicUsize::new(0),
            stop_after: usize::MAX,
        });
        let mut chain = Chain::new();
        chain.add(module.clone());
        chain.set_max_steps(7);

        let c = candidate();
        chain.run(&c);
        assert_eq!(module.calls.load(Ordering::SeqCst), 7);
        assert!(c.is_active(), "budget exhaustion is not deactivation");
    }

    #[test]
    fn inactive_candidate_is_not_reprocessed_but_secondaries_are() {
        let module = Arc::new(CountThenStop {
            calls: AtomicUsize::new(0),
            stop_after: 1,
        });
        let mut chain = Chain::new();
        chain.add(module.clone());

        let parent = candidate();
        let child = parent.add_secondary(parent.current().with_particle(ParticleId(22), 1e18));
        parent.set_active(false);

        chain.run(&parent);
        // The parent contributed zero calls; the child was still visited.
        assert_eq!(module.calls.load(Ordering::SeqCst), 1);
        assert!(!child.is_active());
    }

    #[test]
    fn add_insert_remove_keep_order() {
        struct Named(&'static str);
        impl Module for Named {
            fn name(&self) -> &str {
                self.0
            }
            fn process(&self, _c: &CandidateRef) {}
        }

        let mut chain = Chain::new();
        chain.add(Arc::new(Named("first")));
        chain.add(Arc::new(Named("third")));
        chain.insert(1, Arc::new(Named("second")));
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.get(1).unwrap().name(), "second");

        let removed = chain.remove(2);
        assert_eq!(removed.name(), "third");
        assert_eq!(chain.len(), 2);
        assert!(!chain.is_empty());
    }
}

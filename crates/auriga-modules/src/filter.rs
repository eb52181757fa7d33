//! The particle filter: an accept/reject gate over a particle-id set.

use std::collections::BTreeSet;
use std::sync::RwLock;

use auriga_core::{CandidateRef, ParticleId};
use auriga_module::{Module, ModuleRef};

/// What a [`ParticleFilter`] does with a candidate on one side of the
/// gate.
///
/// The filter itself only decides membership; the outcome objects carry
/// the side effects, so one filter type covers deactivate-on-reject,
/// route-to-alternate-module-on-accept, and any user-supplied behavior.
pub trait FilterOutcome: Send + Sync + 'static {
    /// Apply the outcome to the candidate.
    fn apply(&self, candidate: &CandidateRef);
}

/// Outcome: deactivate the candidate.
pub struct Deactivate;

impl FilterOutcome for Deactivate {
    fn apply(&self, candidate: &CandidateRef) {
        candidate.set_active(false);
    }
}

/// Outcome: do nothing, let the candidate continue down the chain.
pub struct Ignore;

impl FilterOutcome for Ignore {
    fn apply(&self, _candidate: &CandidateRef) {}
}

/// Outcome: route the candidate to another module.
pub struct Forward {
    target: ModuleRef,
}

impl Forward {
    /// Forward matching candidates to `target`.
    pub fn to(target: ModuleRef) -> Self {
        Self { target }
    }
}

impl FilterOutcome for Forward {
    fn apply(&self, candidate: &CandidateRef) {
        self.target.process(candidate);
    }
}

/// An accept/reject gate keyed on the candidate's current particle id.
///
/// `process` applies the accept outcome iff the current id is a member of
/// the filter's set, and the reject outcome otherwise. Inactive
/// candidates are a silent no-op.
///
/// The membership set is behind a lock so it can be adjusted between
/// runs; mutating it *while* `process` runs concurrently is not a
/// designed-for scenario — the lock keeps it safe, but callers wanting a
/// consistent cut synchronize around the mutation themselves.
///
/// # Examples
///
/// ```
/// use auriga_core::{Candidate, ParticleId, ParticleState, Vector3};
/// use auriga_module::Module;
/// use auriga_modules::{Deactivate, Ignore, ParticleFilter};
///
/// // Keep photons and electrons, deactivate everything else.
/// let filter = ParticleFilter::builder()
///     .ids([ParticleId(22), ParticleId(11), ParticleId(-11)])
///     .on_accept(Ignore)
///     .on_reject(Deactivate)
///     .build();
///
/// let proton = ParticleState::new(ParticleId(2212), 1.0, Vector3::ZERO, Vector3::new(1.0, 0.0, 0.0));
/// let candidate = Candidate::from_source(proton);
/// filter.process(&candidate);
/// assert!(!candidate.is_active());
/// ```
pub struct ParticleFilter {
    ids: RwLock<BTreeSet<ParticleId>>,
    on_accept: Box<dyn FilterOutcome>,
    on_reject: Box<dyn FilterOutcome>,
}

/// Builder for [`ParticleFilter`].
///
/// Defaults: empty id set, accept does nothing, reject deactivates.
pub struct ParticleFilterBuilder {
    ids: BTreeSet<ParticleId>,
    on_accept: Box<dyn FilterOutcome>,
    on_reject: Box<dyn FilterOutcome>,
}

impl ParticleFilter {
    /// Create a new builder.
    pub fn builder() -> ParticleFilterBuilder {
        ParticleFilterBuilder {
            ids: BTreeSet::new(),
            on_accept: Box::new(Ignore),
            on_reject: Box::new(Deactivate),
        }
    }

    /// Add an id to the membership set.
    pub fn add_id(&self, id: ParticleId) {
        self.ids.write().unwrap().insert(id);
    }

    /// Remove an id from the membership set.
    pub fn remove_id(&self, id: ParticleId) {
        self.ids.write().unwrap().remove(&id);
    }

    /// Whether `id` is a member.
    pub fn contains(&self, id: ParticleId) -> bool {
        self.ids.read().unwrap().contains(&id)
    }

    /// The membership set, in ascending id order.
    pub fn ids(&self) -> Vec<ParticleId> {
        self.ids.read().unwrap().iter().copied().collect()
    }
}

impl ParticleFilterBuilder {
    /// Seed the membership set.
    pub fn ids(mut self, ids: impl IntoIterator<Item = ParticleId>) -> Self {
        self.ids.extend(ids);
        self
    }

    /// Set the accept outcome.
    pub fn on_accept(mut self, outcome: impl FilterOutcome) -> Self {
        self.on_accept = Box::new(outcome);
        self
    }

    /// Set the reject outcome.
    pub fn on_reject(mut self, outcome: impl FilterOutcome) -> Self {
        self.on_reject = Box::new(outcome);
        self
    }

    /// Build the filter.
    pub fn build(self) -> ParticleFilter {
        ParticleFilter {
            ids: RwLock::new(self.ids),
            on_accept: self.on_accept,
            on_reject: self.on_reject,
        }
    }
}

impl Module for ParticleFilter {
    fn name(&self) -> &str {
        "particle_filter"
    }

    fn process(&self, candidate: &CandidateRef) {
        if !candidate.is_active() {
            return;
        }
        // Read the membership under the lock, run the outcome outside it:
        // an outcome may do arbitrary work, including re-entering this
        // filter through a forwarded module.
        let accepted = self.contains(candidate.current().id);
        if accepted {
            self.on_accept.apply(candidate);
        } else {
            self.on_reject.apply(candidate);
        }
    }
}

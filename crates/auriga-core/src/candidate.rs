//! The candidate: one particle's mutable state plus its secondaries tree.
//!
//! A candidate is shared between the worker thread driving it and any
//! module (collector, output) that buffers a handle to it, so all mutable
//! state sits behind one lock and every accessor does its own locking.
//! Modules receive `&CandidateRef` and never see the lock directly.
//!
//! # Ownership
//!
//! Parents own their secondaries ([`Shared`] handles in creation order);
//! children record only the parent's [`CandidateSerial`] — a non-owning
//! back-reference that cannot form cycles and never participates in
//! destruction.

use std::sync::RwLock;

use auriga_kernel::Shared;
use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::id::CandidateSerial;
use crate::property::PropertyValue;
use crate::state::ParticleState;

/// Shared-ownership handle to a [`Candidate`].
///
/// Clones are cheap (one atomic increment) and may cross worker threads.
pub type CandidateRef = Shared<Candidate>;

/// Everything mutable, behind the candidate's lock.
struct Inner {
    current: ParticleState,
    created: ParticleState,
    source: ParticleState,
    active: bool,
    trajectory_length: f64,
    current_step: f64,
    next_step: f64,
    properties: IndexMap<String, PropertyValue>,
    secondaries: SmallVec<[CandidateRef; 2]>,
}

/// One simulated particle: current state, creation and source snapshots,
/// trajectory bookkeeping, a property bag, and the owned tree of
/// secondary candidates spawned by branching interactions.
///
/// # State machine
///
/// A candidate starts `active`. The driver re-runs its module chain while
/// it stays active; any module may deactivate it. Once inactive, the
/// chain is no longer applied to this node, but the driver still recurses
/// into its secondaries.
///
/// # Examples
///
/// ```
/// use auriga_core::{Candidate, ParticleId, ParticleState, Vector3};
///
/// let source = ParticleState::new(
///     ParticleId(2212),
///     1e19 * auriga_core::units::ELECTRON_VOLT,
///     Vector3::ZERO,
///     Vector3::new(1.0, 0.0, 0.0),
/// );
/// let candidate = Candidate::from_source(source);
/// assert!(candidate.is_active());
/// assert_eq!(candidate.created(), candidate.current());
///
/// // A branching interaction: secondary photon at the parent's position.
/// let photon = candidate.current().with_particle(ParticleId(22), 1e18);
/// let secondary = candidate.add_secondary(photon);
/// assert_eq!(secondary.parent_serial(), Some(candidate.serial()));
/// assert_eq!(candidate.secondary_count(), 1);
/// ```
pub struct Candidate {
    serial: CandidateSerial,
    parent: Option<CandidateSerial>,
    inner: RwLock<Inner>,
}

impl Candidate {
    /// A fresh next-step hint: unconstrained until a propagation module
    /// tightens it via [`limit_next_step`](Candidate::limit_next_step).
    const UNCONSTRAINED_STEP: f64 = f64::MAX;

    fn build(
        serial: CandidateSerial,
        parent: Option<CandidateSerial>,
        current: ParticleState,
        created: ParticleState,
        source: ParticleState,
        trajectory_length: f64,
    ) -> CandidateRef {
        Shared::new(Self {
            serial,
            parent,
            inner: RwLock::new(Inner {
                current,
                created,
                source,
                active: true,
                trajectory_length,
                current_step: 0.0,
                next_step: Self::UNCONSTRAINED_STEP,
                properties: IndexMap::new(),
                secondaries: SmallVec::new(),
            }),
        })
    }

    /// Create an active primary candidate at its source.
    ///
    /// The current state and both snapshots start equal to `source`.
    pub fn from_source(source: ParticleState) -> CandidateRef {
        Self::build(CandidateSerial::next(), None, source, source, source, 0.0)
    }

    /// Reconstitute a candidate from persisted fields.
    ///
    /// Used by the persistence layer when loading dumped records: all
    /// three states and the trajectory length are restored verbatim, the
    /// parent serial is carried as recorded, and the candidate comes back
    /// fresh and active with a newly allocated serial of its own.
    pub fn restore(
        current: ParticleState,
        created: ParticleState,
        source: ParticleState,
        parent: Option<CandidateSerial>,
        trajectory_length: f64,
    ) -> CandidateRef {
        Self::build(
            CandidateSerial::next(),
            parent,
            current,
            created,
            source,
            trajectory_length,
        )
    }

    // ── Identity ───────────────────────────────────────────────────

    /// This candidate's unique serial.
    pub fn serial(&self) -> CandidateSerial {
        self.serial
    }

    /// The parent's serial, or `None` for a primary candidate.
    pub fn parent_serial(&self) -> Option<CandidateSerial> {
        self.parent
    }

    // ── Activity ───────────────────────────────────────────────────

    /// Whether the module chain should still be applied to this node.
    pub fn is_active(&self) -> bool {
        self.inner.read().unwrap().active
    }

    /// Activate or deactivate this candidate.
    pub fn set_active(&self, active: bool) {
        self.inner.write().unwrap().active = active;
    }

    // ── States ─────────────────────────────────────────────────────

    /// Copy of the live current state.
    pub fn current(&self) -> ParticleState {
        self.inner.read().unwrap().current
    }

    /// Replace the live current state.
    pub fn set_current(&self, state: ParticleState) {
        self.inner.write().unwrap().current = state;
    }

    /// Copy of the created-state snapshot (state at the point this
    /// candidate came into existence).
    pub fn created(&self) -> ParticleState {
        self.inner.read().unwrap().created
    }

    /// Copy of the source-state snapshot (state at the originating
    /// source).
    pub fn source(&self) -> ParticleState {
        self.inner.read().unwrap().source
    }

    // ── Trajectory bookkeeping ─────────────────────────────────────

    /// Path length accumulated so far, in meters.
    pub fn trajectory_length(&self) -> f64 {
        self.inner.read().unwrap().trajectory_length
    }

    /// Overwrite the accumulated path length.
    pub fn set_trajectory_length(&self, length: f64) {
        self.inner.write().unwrap().trajectory_length = length;
    }

    /// Add a propagated step to the accumulated path length.
    pub fn add_trajectory_length(&self, step: f64) {
        self.inner.write().unwrap().trajectory_length += step;
    }

    /// The step size used by the most recent propagation, in meters.
    pub fn current_step(&self) -> f64 {
        self.inner.read().unwrap().current_step
    }

    /// Record the step size the propagation just took.
    pub fn set_current_step(&self, step: f64) {
        self.inner.write().unwrap().current_step = step;
    }

    /// The upper bound on the next propagation step, in meters.
    pub fn next_step(&self) -> f64 {
        self.inner.read().unwrap().next_step
    }

    /// Overwrite the next-step hint.
    pub fn set_next_step(&self, step: f64) {
        self.inner.write().unwrap().next_step = step;
    }

    /// Tighten the next-step hint. Never increases it — interaction
    /// modules each propose a bound and the propagation takes the
    /// smallest.
    pub fn limit_next_step(&self, step: f64) {
        let mut inner = self.inner.write().unwrap();
        inner.next_step = inner.next_step.min(step);
    }

    // ── Property bag ───────────────────────────────────────────────

    /// Copy of a property, if set.
    pub fn property(&self, key: &str) -> Option<PropertyValue> {
        self.inner.read().unwrap().properties.get(key).cloned()
    }

    /// Set a property, replacing any previous value for the key.
    pub fn set_property(&self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.inner
            .write()
            .unwrap()
            .properties
            .insert(key.into(), value.into());
    }

    /// Remove a property, returning the removed value.
    pub fn remove_property(&self, key: &str) -> Option<PropertyValue> {
        self.inner.write().unwrap().properties.shift_remove(key)
    }

    /// Whether a property is set.
    pub fn has_property(&self, key: &str) -> bool {
        self.inner.read().unwrap().properties.contains_key(key)
    }

    /// The property keys in insertion order.
    pub fn property_keys(&self) -> Vec<String> {
        self.inner
            .read()
            .unwrap()
            .properties
            .keys()
            .cloned()
            .collect()
    }

    // ── Secondaries ────────────────────────────────────────────────

    /// Spawn a secondary candidate from a branching interaction.
    ///
    /// The secondary's current and created states are `state` (usually
    /// derived from the parent's current state via
    /// [`ParticleState::with_particle`]), its source snapshot is the
    /// parent's source, its trajectory length starts at zero, and its
    /// parent back-reference is this candidate's serial. The new
    /// candidate is appended to this candidate's secondaries in creation
    /// order, and a handle to it is returned.
    pub fn add_secondary(&self, state: ParticleState) -> CandidateRef {
        let mut inner = self.inner.write().unwrap();
        let secondary = Self::build(
            CandidateSerial::next(),
            Some(self.serial),
            state,
            state,
            inner.source,
            0.0,
        );
        inner.secondaries.push(secondary.clone());
        secondary
    }

    /// Number of direct secondaries.
    pub fn secondary_count(&self) -> usize {
        self.inner.read().unwrap().secondaries.len()
    }

    /// Snapshot of the direct secondaries, in creation order.
    pub fn secondaries(&self) -> Vec<CandidateRef> {
        self.inner.read().unwrap().secondaries.to_vec()
    }

    /// Drop all direct secondaries (and, transitively, their subtrees,
    /// unless other handles keep them alive).
    pub fn clear_secondaries(&self) {
        self.inner.write().unwrap().secondaries.clear();
    }

    /// Total number of nodes in this candidate's subtree, itself
    /// included.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .secondaries()
            .iter()
            .map(|s| s.subtree_len())
            .sum::<usize>()
    }

    // ── Lifecycle ──────────────────────────────────────────────────

    /// Rewind this candidate for a fresh pipeline run.
    ///
    /// Reactivates it, zeroes the trajectory bookkeeping, resets the
    /// step hints, and rewinds the current state to the created
    /// snapshot. The created and source snapshots, the property bag, and
    /// the secondaries are untouched.
    pub fn restart(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.active = true;
        inner.trajectory_length = 0.0;
        inner.current_step = 0.0;
        inner.next_step = Self::UNCONSTRAINED_STEP;
        inner.current = inner.created;
    }

    /// Independent deep copy with a fresh serial.
    ///
    /// All three states, the activity flag, the trajectory bookkeeping,
    /// and the property bag are copied. The secondary subtree is copied
    /// only when `recursive` is set; otherwise the copy has no
    /// secondaries. The copy shares no mutable state with the original.
    pub fn clone_candidate(&self, recursive: bool) -> CandidateRef {
        let inner = self.inner.read().unwrap();
        let secondaries: SmallVec<[CandidateRef; 2]> = if recursive {
            inner
                .secondaries
                .iter()
                .map(|s| s.clone_candidate(true))
                .collect()
        } else {
            SmallVec::new()
        };
        Shared::new(Self {
            serial: CandidateSerial::next(),
            parent: self.parent,
            inner: RwLock::new(Inner {
                current: inner.current,
                created: inner.created,
                source: inner.source,
                active: inner.active,
                trajectory_length: inner.trajectory_length,
                current_step: inner.current_step,
                next_step: inner.next_step,
                properties: inner.properties.clone(),
                secondaries,
            }),
        })
    }
}

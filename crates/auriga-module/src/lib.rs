//! The [`Module`] trait.
//!
//! Modules are the pipeline's processing stages: propagation, interaction,
//! filtering, observation, output. The driver applies an ordered list of
//! them to each candidate, repeatedly, until the candidate goes inactive.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use std::sync::Arc;

use auriga_core::CandidateRef;

/// One processing stage in the pipeline.
///
/// # Contract
///
/// - `process()` may mutate the candidate's current state, deactivate it,
///   or append secondary candidates to its tree.
/// - `&self` — modules are invoked concurrently on distinct candidates
///   from multiple worker threads. A module touching a shared resource
///   (a buffer, an accumulator, an output stream) serializes the
///   mutation itself, with the smallest possible critical region; the
///   actual computation stays outside it.
/// - Errors do not cross this boundary. Anything that can fail is checked
///   at construction time (builders return `Result`); a running module
///   records anomalies instead of panicking.
///
/// # Object safety
///
/// This trait is object-safe; the driver stores modules as
/// [`ModuleRef`] and invokes them uniformly.
///
/// # Examples
///
/// A minimal module that deactivates everything it sees:
///
/// ```
/// use auriga_core::{Candidate, CandidateRef, ParticleId, ParticleState, Vector3};
/// use auriga_module::Module;
///
/// struct Sink;
///
/// impl Module for Sink {
///     fn name(&self) -> &str {
///         "sink"
///     }
///
///     fn process(&self, candidate: &CandidateRef) {
///         candidate.set_active(false);
///     }
/// }
///
/// let state = ParticleState::new(ParticleId(2212), 1.0, Vector3::ZERO, Vector3::new(1.0, 0.0, 0.0));
/// let candidate = Candidate::from_source(state);
/// Sink.process(&candidate);
/// assert!(!candidate.is_active());
/// ```
pub trait Module: Send + Sync + 'static {
    /// Human-readable name for reports and telemetry.
    fn name(&self) -> &str;

    /// Apply this stage to one candidate.
    fn process(&self, candidate: &CandidateRef);
}

/// Shared handle to a module in a chain.
///
/// `Arc` rather than `Box`: collectors replay buffered candidates through
/// the same module instances the chain holds, and worker threads invoke
/// them concurrently.
pub type ModuleRef = Arc<dyn Module>;

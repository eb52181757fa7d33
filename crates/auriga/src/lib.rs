//! Auriga: a concurrent candidate-processing pipeline for Monte-Carlo
//! particle-propagation studies.
//!
//! This is the top-level facade crate re-exporting the public API from
//! all Auriga sub-crates. For most users, adding `auriga` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use auriga::prelude::*;
//! use std::sync::Arc;
//!
//! // A minimal physics stand-in: halve the energy each pass, stop at
//! // one tenth of the source energy.
//! struct Attenuate;
//! impl Module for Attenuate {
//!     fn name(&self) -> &str { "attenuate" }
//!     fn process(&self, candidate: &CandidateRef) {
//!         let mut state = candidate.current();
//!         state.energy *= 0.5;
//!         candidate.set_current(state);
//!         if state.energy < candidate.source().energy / 10.0 {
//!             candidate.set_active(false);
//!         }
//!     }
//! }
//!
//! // One proton primary.
//! let source = ParticleState::new(
//!     ParticleId(2212),
//!     1e19 * auriga::types::units::ELECTRON_VOLT,
//!     Vector3::ZERO,
//!     Vector3::new(1.0, 0.0, 0.0),
//! );
//! let candidate = Candidate::from_source(source);
//!
//! // Drive it through the chain on a two-worker pool.
//! let mut chain = Chain::new();
//! chain.add(Arc::new(Attenuate));
//! let report = chain
//!     .run_batch(vec![candidate.clone()], &RunConfig::with_workers(2))
//!     .unwrap();
//!
//! assert_eq!(report.primaries, 1);
//! assert!(!candidate.is_active());
//! assert!(candidate.current().energy < source.energy / 10.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`kernel`] | `auriga-kernel` | Reference-counting ownership kernel |
//! | [`types`] | `auriga-core` | IDs, states, candidates, property bag |
//! | [`module`] | `auriga-module` | The `Module` capability trait |
//! | [`engine`] | `auriga-engine` | Chain driver and worker pool |
//! | [`modules`] | `auriga-modules` | Collector, filter, performance, accumulator, output |
//! | [`output`] | `auriga-output` | Text record persistence |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Reference-counting ownership kernel (`auriga-kernel`).
///
/// [`kernel::Shared`] is the handle type behind
/// [`types::CandidateRef`].
pub use auriga_kernel as kernel;

/// Core types (`auriga-core`).
///
/// Candidates, particle states, strongly-typed IDs, the property bag,
/// and the unit constants used by the persistence layer.
pub use auriga_core as types;

/// The module capability trait (`auriga-module`).
///
/// [`module::Module`] is the main extension point for user-defined
/// pipeline stages.
pub use auriga_module as module;

/// Chain driver and worker pool (`auriga-engine`).
///
/// [`engine::Chain`] owns the ordered module list and the depth-first
/// traversal policy; [`engine::Chain::run_batch`] spreads independent
/// candidates over worker threads.
pub use auriga_engine as engine;

/// Built-in pipeline modules (`auriga-modules`).
///
/// Includes [`modules::Collector`], [`modules::ParticleFilter`],
/// [`modules::PerformanceModule`], [`modules::EmissionMapFiller`], and
/// [`modules::TextRecordOutput`].
pub use auriga_modules as modules;

/// Text record persistence (`auriga-output`).
///
/// Dump candidates with [`output::RecordWriter`], reload them with
/// [`output::RecordReader`].
pub use auriga_output as output;

/// Common imports for typical Auriga usage.
///
/// ```rust
/// use auriga::prelude::*;
/// ```
pub mod prelude {
    // Ownership kernel
    pub use auriga_kernel::{RefCount, Shared};

    // Core types
    pub use auriga_core::{
        Candidate, CandidateRef, CandidateSerial, ParticleId, ParticleState, PropertyValue,
        Vector3,
    };

    // The module capability
    pub use auriga_module::{Module, ModuleRef};

    // Driver
    pub use auriga_engine::{Chain, ConfigError, RunConfig, RunReport};

    // Built-in modules
    pub use auriga_modules::{
        Collector, EmissionMap, EmissionMapFiller, ParticleFilter, PerformanceModule,
        TextRecordOutput,
    };

    // Persistence
    pub use auriga_output::{CandidateRecord, PersistError, RecordReader, RecordWriter};
}

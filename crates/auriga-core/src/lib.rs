//! Core types for the Auriga candidate-processing pipeline.
//!
//! Defines the data model every other crate builds on: strongly-typed
//! identifiers, the particle state record, the extensible property bag,
//! and [`Candidate`] — one simulated particle's mutable state plus its
//! owned tree of secondary candidates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod candidate;
pub mod id;
pub mod property;
pub mod state;
pub mod units;
pub mod vector;

pub use candidate::{Candidate, CandidateRef};
pub use id::{CandidateSerial, ParticleId};
pub use property::PropertyValue;
pub use state::ParticleState;
pub use vector::Vector3;

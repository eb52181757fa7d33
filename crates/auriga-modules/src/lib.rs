//! Built-in modules for the Auriga pipeline.
//!
//! The thread-safe collection, instrumentation, filtering and output
//! stages built on the candidate/module contract:
//!
//! - [`Collector`] — growable buffer of candidate handles with replay,
//!   persistence, and on-demand trajectory reconstruction.
//! - [`ParticleFilter`] — accept/reject gate over a particle-id set,
//!   polymorphic in both outcomes.
//! - [`PerformanceModule`] — composite wrapper measuring per-sub-module
//!   timing under concurrent invocation.
//! - [`EmissionMapFiller`] — forwards source states into an externally
//!   owned accumulation map under its mutex.
//! - [`TextRecordOutput`] — streams one text record per candidate to a
//!   writer under an exclusive lock held for exactly one record.
//!
//! Every module serializes only the mutation of its shared resource; the
//! surrounding work runs outside the critical region.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod collector;
mod emission;
mod error;
mod filter;
mod performance;
mod text_output;

pub use collector::{Collector, CollectorBuilder, TrajectoryError};
pub use emission::{EmissionMap, EmissionMapFiller, SharedEmissionMap};
pub use error::ConfigError;
pub use filter::{Deactivate, FilterOutcome, Forward, Ignore, ParticleFilter, ParticleFilterBuilder};
pub use performance::{PerformanceEntry, PerformanceModule, PerformanceReport};
pub use text_output::{Compression, TextRecordOutput, TextRecordOutputBuilder};

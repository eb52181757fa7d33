//! Ownership kernel for the Auriga candidate-processing pipeline.
//!
//! Every candidate in a simulation run — and every secondary candidate it
//! spawns — is heap-allocated exactly once and shared between the worker
//! that drives it, the collectors that buffer it, and any replay machinery
//! that revisits it later. This crate provides the two primitives that make
//! those lifetimes deterministic and leak-free:
//!
//! - [`RefCount`]: a lock-free atomic reference counter. Increments and
//!   decrements are single hardware atomics; the caller destroys the
//!   counted object exactly when a decrement returns zero.
//! - [`Shared<T>`]: an RAII handle over a heap allocation that embeds a
//!   [`RefCount`] header. Cloning increments, dropping decrements, and the
//!   allocation is freed exactly once, exactly when the count reaches zero.
//!
//! Counter misuse (decrementing a counter that is already zero) is a
//! programmer error. It is diagnosed on stderr in debug builds and
//! swallowed in release builds — destruction must never fail, so these
//! paths never panic and never return errors.
//!
//! This is the only crate in the workspace that uses `unsafe`; the blocks
//! are confined to the [`Shared`] implementation and each carries its
//! safety argument.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod count;
mod shared;

pub use count::RefCount;
pub use shared::Shared;

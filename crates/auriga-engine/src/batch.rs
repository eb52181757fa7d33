//! The worker pool: spreading top-level candidates over threads.
//!
//! Each worker takes one top-level candidate from a bounded crossbeam
//! channel and drives its entire subtree to completion before taking the
//! next, so a subtree never migrates between threads mid-traversal.
//! Workers shut down when the channel closes; there is no separate
//! shutdown flag and no cancellation beyond a candidate's own `active`
//! state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Instant;

use auriga_core::CandidateRef;

use crate::chain::Chain;
use crate::config::{ConfigError, RunConfig};
use crate::metrics::RunReport;

impl Chain {
    /// Drive a batch of independent top-level candidates across a worker
    /// pool.
    ///
    /// Every candidate's subtree is traversed exactly once, by exactly
    /// one worker, under the policy documented on [`Chain::run`]. No
    /// relative ordering between distinct top-level candidates is
    /// guaranteed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation; in that case
    /// no candidate has been processed.
    pub fn run_batch(
        &self,
        candidates: Vec<CandidateRef>,
        config: &RunConfig,
    ) -> Result<RunReport, ConfigError> {
        config.validate()?;

        let started = Instant::now();
        let primaries = candidates.len() as u64;
        let nodes = AtomicU64::new(0);
        let (sender, receiver) = crossbeam_channel::bounded::<CandidateRef>(config.queue_capacity);

        thread::scope(|scope| {
            for _ in 0..config.worker_threads {
                let receiver = receiver.clone();
                let nodes = &nodes;
                scope.spawn(move || {
                    while let Ok(candidate) = receiver.recv() {
                        self.run(&candidate);
                        nodes.fetch_add(candidate.subtree_len() as u64, Ordering::Relaxed);
                    }
                });
            }
            drop(receiver);

            for candidate in candidates {
                // Send fails only if every worker is gone, which the
                // module contract (no panics) rules out; stop feeding
                // rather than spin if it ever happens.
                if sender.send(candidate).is_err() {
                    break;
                }
            }
            drop(sender);
        });

        Ok(RunReport {
            primaries,
            nodes: nodes.into_inner(),
            elapsed: started.elapsed(),
        })
    }
}

//! Worker-pool configuration and its validation errors.

use std::error::Error;
use std::fmt;
use std::thread;

/// Configuration for [`Chain::run_batch`](crate::Chain::run_batch).
///
/// Validated once per batch, before any worker is spawned; invalid
/// configurations are rejected with a [`ConfigError`] and no candidate is
/// touched.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Number of worker threads driving candidates.
    pub worker_threads: usize,
    /// Capacity of the bounded dispatch channel feeding the workers.
    ///
    /// Purely a memory/backpressure knob; any positive value is correct.
    pub queue_capacity: usize,
}

impl RunConfig {
    /// A configuration using `worker_threads` workers and the default
    /// queue capacity.
    pub fn with_workers(worker_threads: usize) -> Self {
        Self {
            worker_threads,
            ..Self::default()
        }
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_threads == 0 {
            return Err(ConfigError::NoWorkerThreads);
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::NoQueueCapacity);
        }
        Ok(())
    }
}

impl Default for RunConfig {
    /// One worker per available core (at least one), queue capacity 256.
    fn default() -> Self {
        Self {
            worker_threads: thread::available_parallelism().map_or(1, |n| n.get()),
            queue_capacity: 256,
        }
    }
}

/// Errors from batch-run configuration validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `worker_threads` was zero.
    NoWorkerThreads,
    /// `queue_capacity` was zero.
    NoQueueCapacity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWorkerThreads => write!(f, "worker_threads must be at least 1"),
            Self::NoQueueCapacity => write!(f, "queue_capacity must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

//! Per-batch run metrics.

use std::time::Duration;

/// Counters and timing for one [`Chain::run_batch`](crate::Chain::run_batch)
/// call.
///
/// Populated by the driver, read by telemetry and tests. Node counts are
/// taken after each subtree completes, so they include secondaries
/// spawned during processing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Number of top-level candidates dispatched.
    pub primaries: u64,
    /// Total candidate-tree nodes traversed, secondaries included.
    pub nodes: u64,
    /// Wall-clock time for the whole batch.
    pub elapsed: Duration,
}

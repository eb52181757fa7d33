//! The performance wrapper: per-sub-module timing under concurrency.

use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use auriga_core::CandidateRef;
use auriga_module::{Module, ModuleRef};
use smallvec::SmallVec;

/// Accumulated totals, merged under one short lock.
struct Totals {
    per_module: Vec<Duration>,
    calls: u64,
}

/// A composite module that forwards to wrapped modules in order,
/// measuring each one's wall-clock time per call.
///
/// Timing happens without contention: each `process` call measures its
/// wrapped modules with a stack-local clock, and only the merge of the
/// finished durations into the cumulative totals (plus the invocation
/// counter) is serialized — never the timed work itself.
///
/// Reporting is explicit: call [`report`](PerformanceModule::report) at a
/// well-defined shutdown point. Nothing is printed on drop, so teardown
/// order across threads cannot scramble diagnostics.
pub struct PerformanceModule {
    modules: Vec<ModuleRef>,
    totals: Mutex<Totals>,
}

impl PerformanceModule {
    /// An empty wrapper.
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
            totals: Mutex::new(Totals {
                per_module: Vec::new(),
                calls: 0,
            }),
        }
    }

    /// Append a module to the wrapped list.
    pub fn add(&mut self, module: ModuleRef) {
        self.modules.push(module);
        self.totals.get_mut().unwrap().per_module.push(Duration::ZERO);
    }

    /// Number of wrapped modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the wrapper is empty.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Snapshot the accumulated timings into a report.
    ///
    /// Purely derived from the accumulated state; safe to call at any
    /// point, typically once at shutdown.
    pub fn report(&self) -> PerformanceReport {
        let totals = self.totals.lock().unwrap();
        let total: Duration = totals.per_module.iter().sum();
        let entries = self
            .modules
            .iter()
            .zip(&totals.per_module)
            .map(|(module, &accumulated)| {
                let share = if total.is_zero() {
                    0.0
                } else {
                    100.0 * accumulated.as_secs_f64() / total.as_secs_f64()
                };
                let mean = if totals.calls == 0 {
                    Duration::ZERO
                } else {
                    accumulated / totals.calls as u32
                };
                PerformanceEntry {
                    name: module.name().to_string(),
                    accumulated,
                    share,
                    mean,
                }
            })
            .collect();
        PerformanceReport {
            calls: totals.calls,
            total,
            entries,
        }
    }
}

impl Default for PerformanceModule {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for PerformanceModule {
    fn name(&self) -> &str {
        "performance"
    }

    fn process(&self, candidate: &CandidateRef) {
        // Time each wrapped module with a stack-local clock; no shared
        // state is touched until every measurement is done.
        let mut times: SmallVec<[Duration; 8]> = SmallVec::with_capacity(self.modules.len());
        for module in &self.modules {
            let start = Instant::now();
            module.process(candidate);
            times.push(start.elapsed());
        }

        // The merge is the only serialized part.
        let mut totals = self.totals.lock().unwrap();
        for (slot, time) in totals.per_module.iter_mut().zip(times) {
            *slot += time;
        }
        totals.calls += 1;
    }
}

/// One wrapped module's line in a [`PerformanceReport`].
#[derive(Clone, Debug)]
pub struct PerformanceEntry {
    /// The wrapped module's name.
    pub name: String,
    /// Total accumulated wall-clock time across all calls.
    pub accumulated: Duration,
    /// Percentage share of the report's total time.
    pub share: f64,
    /// Average time per `process` invocation of the wrapper.
    pub mean: Duration,
}

/// Timing summary for a [`PerformanceModule`].
#[derive(Clone, Debug)]
pub struct PerformanceReport {
    /// Number of `process` invocations merged in.
    pub calls: u64,
    /// Sum of the per-module accumulated times.
    pub total: Duration,
    /// One entry per wrapped module, in chain order.
    pub entries: Vec<PerformanceEntry>,
}

impl fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "performance over {} calls:", self.calls)?;
        for entry in &self.entries {
            writeln!(
                f,
                " - {:.1}% -> {}: {:?} per call",
                entry.share, entry.name, entry.mean
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auriga_core::{Candidate, ParticleId, ParticleState, Vector3};
    use std::sync::Arc;
    use std::thread;

    fn candidate() -> CandidateRef {
        Candidate::from_source(ParticleState::new(
            ParticleId(22),
            1.0,
            Vector3::ZERO,
            Vector3::new(1.0, 0.0, 0.0),
        ))
    }

    struct Busy(Duration);

    impl Module for Busy {
        fn name(&self) -> &str {
            "busy"
        }

        fn process(&self, _candidate: &CandidateRef) {
            let start = Instant::now();
            while start.elapsed() < self.0 {
                std::hint::spin_loop();
            }
        }
    }

    #[test]
    fn empty_wrapper_reports_nothing() {
        let wrapper = PerformanceModule::new();
        wrapper.process(&candidate());
        let report = wrapper.report();
        assert_eq!(report.calls, 1);
        assert!(report.entries.is_empty());
        assert_eq!(report.total, Duration::ZERO);
    }

    #[test]
    fn total_equals_sum_of_per_module_times() {
        let mut wrapper = PerformanceModule::new();
        wrapper.add(Arc::new(Busy(Duration::from_micros(200))));
        wrapper.add(Arc::new(Busy(Duration::from_micros(100))));

        for _ in 0..5 {
            wrapper.process(&candidate());
        }

        let report = wrapper.report();
        assert_eq!(report.calls, 5);
        let sum: Duration = report.entries.iter().map(|e| e.accumulated).sum();
        assert_eq!(report.total, sum);

        let share_sum: f64 = report.entries.iter().map(|e| e.share).sum();
        assert!((share_sum - 100.0).abs() < 1e-6);
    }

    #[test]
    fn concurrent_invocations_count_every_call() {
        let mut wrapper = PerformanceModule::new();
        wrapper.add(Arc::new(Busy(Duration::from_micros(10))));
        let wrapper = Arc::new(wrapper);

        let threads = 4;
        let per_thread = 50;
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let wrapper = Arc::clone(&wrapper);
                thread::spawn(move || {
                    for _ in 0..per_thread {
                        wrapper.process(&candidate());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let report = wrapper.report();
        assert_eq!(report.calls, (threads * per_thread) as u64);
        let sum: Duration = report.entries.iter().map(|e| e.accumulated).sum();
        assert_eq!(report.total, sum);
    }

    #[test]
    fn report_display_lists_each_module() {
        let mut wrapper = PerformanceModule::new();
        wrapper.add(Arc::new(Busy(Duration::from_micros(50))));
        wrapper.process(&candidate());

        let text = wrapper.report().to_string();
        assert!(text.contains("performance over 1 calls"));
        assert!(text.contains("busy"));
    }
}

//! The collector: a thread-safe buffer of candidate handles.

use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use auriga_core::CandidateRef;
use auriga_engine::Chain;
use auriga_module::{Module, ModuleRef};
use auriga_output::{CandidateRecord, PersistError, RecordReader, RecordWriter};

// Compile-time assertion: a Collector is shared across worker threads.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<Collector>();
};

/// A thread-safe growable buffer of candidate handles.
///
/// As a [`Module`], `process` appends a handle for every *active*
/// candidate it sees (inactive candidates are a silent no-op). What gets
/// stored depends on flags fixed at construction:
///
/// - reference mode (default): a shared handle to the live candidate —
///   later mutations by the simulation are visible through the buffer;
/// - clone mode: an independent copy taken at insertion time, deep-copying
///   the secondary subtree only when the `recursive` flag is also set.
///
/// Insertion is a single named critical region, because the backing
/// buffer may reallocate under concurrent growth from several workers.
/// Everything else (cloning, record formatting, module replay) happens
/// outside the lock.
///
/// # Examples
///
/// ```
/// use auriga_core::{Candidate, ParticleId, ParticleState, Vector3};
/// use auriga_module::Module;
/// use auriga_modules::Collector;
///
/// let collector = Collector::builder().capacity(128).build();
/// let state = ParticleState::new(ParticleId(22), 1.0, Vector3::ZERO, Vector3::new(1.0, 0.0, 0.0));
/// let candidate = Candidate::from_source(state);
///
/// collector.process(&candidate);
/// assert_eq!(collector.len(), 1);
/// ```
pub struct Collector {
    entries: Mutex<Vec<CandidateRef>>,
    clone_on_insert: bool,
    recursive: bool,
}

/// Builder for [`Collector`].
///
/// Defaults: no preallocation, reference mode, non-recursive.
pub struct CollectorBuilder {
    capacity: usize,
    clone_on_insert: bool,
    recursive: bool,
}

impl Collector {
    /// Create a new builder.
    pub fn builder() -> CollectorBuilder {
        CollectorBuilder {
            capacity: 0,
            clone_on_insert: false,
            recursive: false,
        }
    }

    /// Whether entries are independent copies rather than shared handles.
    pub fn clone_on_insert(&self) -> bool {
        self.clone_on_insert
    }

    /// Whether copies include the whole secondary subtree.
    pub fn recursive(&self) -> bool {
        self.recursive
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Handle to the entry at `index`, if any.
    pub fn get(&self, index: usize) -> Option<CandidateRef> {
        self.entries.lock().unwrap().get(index).cloned()
    }

    /// Snapshot of all entries, in insertion order.
    ///
    /// The snapshot is consistent at the instant it is taken; callers
    /// interleaving with live insertion synchronize themselves.
    pub fn snapshot(&self) -> Vec<CandidateRef> {
        self.entries.lock().unwrap().clone()
    }

    /// Drop all entries.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    /// Replay every stored entry through `module`.
    ///
    /// In clone mode each entry is cloned first (non-recursively), so the
    /// replayed module sees an independent copy — the stored entries are
    /// never mutated by a replay. The buffer is snapshotted once; the
    /// module runs outside the collector's lock.
    pub fn reprocess(&self, module: &dyn Module) {
        for entry in self.snapshot() {
            if self.clone_on_insert {
                module.process(&entry.clone_candidate(false));
            } else {
                module.process(&entry);
            }
        }
    }

    /// Write every stored entry to `path` in the text record format.
    pub fn dump(&self, path: impl AsRef<Path>) -> Result<u64, PersistError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        let written = self.dump_to(&mut writer)?;
        writer.flush()?;
        Ok(written)
    }

    /// Write every stored entry to an arbitrary sink.
    pub fn dump_to<W: Write>(&self, sink: W) -> Result<u64, PersistError> {
        let mut writer = RecordWriter::new(sink)?;
        for entry in self.snapshot() {
            writer.write_record(&CandidateRecord::from_candidate(&entry))?;
        }
        writer.flush()?;
        Ok(writer.records_written())
    }

    /// Load a dump from `path`, appending fresh candidates to the buffer.
    ///
    /// Returns the number of candidates loaded. Malformed input is a hard
    /// error; nothing is appended from a dump that fails to parse.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<usize, PersistError> {
        let file = File::open(path)?;
        self.load_from(BufReader::new(file))
    }

    /// Load a dump from an arbitrary source, appending fresh candidates.
    pub fn load_from<R: BufRead>(&self, source: R) -> Result<usize, PersistError> {
        let records = RecordReader::new(source).read_all()?;
        let loaded = records.len();
        let mut entries = self.entries.lock().unwrap();
        entries.extend(records.iter().map(CandidateRecord::restore));
        Ok(loaded)
    }

    /// Reconstruct the trajectory of the entry at `index` on demand.
    ///
    /// Clones the stored candidate, restarts the clone (reactivating it
    /// and rewinding its current state to the created snapshot),
    /// temporarily appends `output` to `chain`, re-runs the full pipeline
    /// on the clone, then removes the temporary module again. The stored
    /// entry is never touched — this trades recomputation for not storing
    /// trajectories eagerly.
    pub fn trajectory(
        &self,
        chain: &mut Chain,
        index: usize,
        output: ModuleRef,
    ) -> Result<(), TrajectoryError> {
        let stored = self.get(index).ok_or(TrajectoryError::IndexOutOfBounds {
            index,
            len: self.len(),
        })?;
        let replayed = stored.clone_candidate(false);
        replayed.restart();

        chain.add(output);
        chain.run(&replayed);
        chain.remove(chain.len() - 1);
        Ok(())
    }
}

impl CollectorBuilder {
    /// Preallocate space for `capacity` entries.
    ///
    /// Purely an allocation hint; the buffer grows past it whenever
    /// needed.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Store independent copies instead of shared handles.
    pub fn clone_on_insert(mut self, clone_on_insert: bool) -> Self {
        self.clone_on_insert = clone_on_insert;
        self
    }

    /// When cloning, deep-copy the whole secondary subtree.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Build the collector.
    pub fn build(self) -> Collector {
        Collector {
            entries: Mutex::new(Vec::with_capacity(self.capacity)),
            clone_on_insert: self.clone_on_insert,
            recursive: self.recursive,
        }
    }
}

impl Module for Collector {
    fn name(&self) -> &str {
        "collector"
    }

    fn process(&self, candidate: &CandidateRef) {
        if !candidate.is_active() {
            return;
        }
        let entry = if self.clone_on_insert {
            candidate.clone_candidate(self.recursive)
        } else {
            candidate.clone()
        };
        // Insertion only; the clone above already happened outside.
        self.entries.lock().unwrap().push(entry);
    }
}

/// Errors from on-demand trajectory reconstruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrajectoryError {
    /// The requested entry does not exist.
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The buffer length at the time of the request.
        len: usize,
    },
}

impl fmt::Display for TrajectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "no entry at index {index} (collector holds {len})")
            }
        }
    }
}

impl Error for TrajectoryError {}

#[cfg(test)]
mod tests {
    use super::*;
    use auriga_core::{Candidate, ParticleId, ParticleState, Vector3};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    fn candidate_with_id(id: i32) -> CandidateRef {
        Candidate::from_source(ParticleState::new(
            ParticleId(id),
            1e18,
            Vector3::ZERO,
            Vector3::new(1.0, 0.0, 0.0),
        ))
    }

    #[test]
    fn inactive_candidates_are_ignored() {
        let collector = Collector::builder().build();
        let candidate = candidate_with_id(22);
        candidate.set_active(false);
        collector.process(&candidate);
        assert!(collector.is_empty());
    }

    #[test]
    fn reference_mode_shares_mutation_visibility() {
        let collector = Collector::builder().build();
        let candidate = candidate_with_id(2212);
        collector.process(&candidate);

        candidate.set_trajectory_length(42.0);
        let stored = collector.get(0).unwrap();
        assert_eq!(stored.trajectory_length(), 42.0);
        assert_eq!(stored.serial(), candidate.serial());
    }

    #[test]
    fn clone_mode_stores_independent_copies() {
        let collector = Collector::builder().clone_on_insert(true).build();
        let candidate = candidate_with_id(2212);
        collector.process(&candidate);

        candidate.set_trajectory_length(42.0);
        let stored = collector.get(0).unwrap();
        assert_eq!(stored.trajectory_length(), 0.0);
        assert_ne!(stored.serial(), candidate.serial());
    }

    #[test]
    fn recursive_clone_mode_keeps_subtree() {
        let flat = Collector::builder().clone_on_insert(true).build();
        let deep = Collector::builder()
            .clone_on_insert(true)
            .recursive(true)
            .build();

        let candidate = candidate_with_id(2212);
        candidate.add_secondary(candidate.current().with_particle(ParticleId(22), 1e17));

        flat.process(&candidate);
        deep.process(&candidate);
        assert_eq!(flat.get(0).unwrap().secondary_count(), 0);
        assert_eq!(deep.get(0).unwrap().secondary_count(), 1);
    }

    #[test]
    fn capacity_is_a_hint_not_a_bound() {
        let collector = Collector::builder().capacity(2).build();
        for i in 0..10 {
            collector.process(&candidate_with_id(i));
        }
        assert_eq!(collector.len(), 10);
    }

    #[test]
    fn concurrent_inserts_keep_every_entry_and_thread_order() {
        let collector = Arc::new(Collector::builder().build());
        let threads = 4;
        let per_thread = 500;

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let collector = Arc::clone(&collector);
                thread::spawn(move || {
                    for i in 0..per_thread {
                        let candidate = candidate_with_id(22);
                        candidate.set_property("thread", t as i64);
                        candidate.set_property("seq", i as i64);
                        collector.process(&candidate);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(collector.len(), threads * per_thread);

        // Entries inserted by the same thread appear in that thread's
        // call order.
        for t in 0..threads {
            let seqs: Vec<i64> = collector
                .snapshot()
                .iter()
                .filter(|c| c.property("thread").and_then(|v| v.as_int()) == Some(t as i64))
                .map(|c| c.property("seq").and_then(|v| v.as_int()).unwrap())
                .collect();
            assert_eq!(seqs.len(), per_thread);
            assert!(seqs.windows(2).all(|w| w[0] < w[1]), "thread {t} reordered");
        }
    }

    #[test]
    fn reprocess_in_clone_mode_does_not_touch_entries() {
        struct Mutator;
        impl Module for Mutator {
            fn name(&self) -> &str {
                "mutator"
            }
            fn process(&self, candidate: &CandidateRef) {
                candidate.set_trajectory_length(99.0);
            }
        }

        let collector = Collector::builder().clone_on_insert(true).build();
        collector.process(&candidate_with_id(11));
        collector.reprocess(&Mutator);
        assert_eq!(collector.get(0).unwrap().trajectory_length(), 0.0);
    }

    #[test]
    fn reprocess_visits_every_entry() {
        struct Counter(AtomicUsize);
        impl Module for Counter {
            fn name(&self) -> &str {
                "counter"
            }
            fn process(&self, _candidate: &CandidateRef) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let collector = Collector::builder().build();
        for i in 0..7 {
            collector.process(&candidate_with_id(i));
        }
        let counter = Counter(AtomicUsize::new(0));
        collector.reprocess(&counter);
        assert_eq!(counter.0.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn dump_then_load_round_trips_in_memory() {
        let collector = Collector::builder().build();
        for &id in &[11, -11, 22, 2212] {
            let candidate = candidate_with_id(id);
            candidate.set_trajectory_length(1.5e22);
            collector.process(&candidate);
        }

        let mut buf = Vec::new();
        let written = collector.dump_to(&mut buf).unwrap();
        assert_eq!(written, 4);

        let reloaded = Collector::builder().build();
        let loaded = reloaded.load_from(buf.as_slice()).unwrap();
        assert_eq!(loaded, 4);
        assert_eq!(reloaded.len(), collector.len());

        for (original, restored) in collector.snapshot().iter().zip(reloaded.snapshot()) {
            assert_eq!(restored.current().id, original.current().id);
            let rel = (restored.trajectory_length() - original.trajectory_length()).abs()
                / original.trajectory_length();
            assert!(rel < 1e-8);
        }
    }

    #[test]
    fn dump_and_load_through_the_filesystem() {
        let collector = Collector::builder().build();
        collector.process(&candidate_with_id(22));

        let path = std::env::temp_dir().join(format!(
            "auriga-collector-dump-{}.txt",
            std::process::id()
        ));
        collector.dump(&path).unwrap();

        let reloaded = Collector::builder().build();
        assert_eq!(reloaded.load(&path).unwrap(), 1);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn load_of_missing_file_is_a_hard_error() {
        let collector = Collector::builder().build();
        let missing = std::env::temp_dir().join("auriga-no-such-dump.txt");
        assert!(matches!(
            collector.load(&missing),
            Err(PersistError::Io(_))
        ));
    }

    #[test]
    fn trajectory_index_out_of_bounds() {
        struct Nop;
        impl Module for Nop {
            fn name(&self) -> &str {
                "nop"
            }
            fn process(&self, _candidate: &CandidateRef) {}
        }

        let collector = Collector::builder().build();
        let mut chain = Chain::new();
        let err = collector
            .trajectory(&mut chain, 3, Arc::new(Nop))
            .unwrap_err();
        assert_eq!(err, TrajectoryError::IndexOutOfBounds { index: 3, len: 0 });
        assert!(chain.is_empty(), "chain untouched on the error path");
    }
}

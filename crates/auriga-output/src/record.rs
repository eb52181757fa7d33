//! The flat per-candidate record.

use auriga_core::{Candidate, CandidateRef, CandidateSerial, ParticleState};

/// Everything the text format records about one candidate.
///
/// A record is a value: building one from a live candidate copies the
/// three state snapshots and the trajectory length at that instant, and
/// restoring one builds a fresh, active candidate sharing nothing with
/// the original.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandidateRecord {
    /// The live state at record time.
    pub current: ParticleState,
    /// The created-state snapshot.
    pub created: ParticleState,
    /// The source-state snapshot.
    pub source: ParticleState,
    /// The parent candidate's serial, `None` for primaries.
    pub parent: Option<u64>,
    /// Accumulated trajectory length in meters.
    pub trajectory_length: f64,
}

impl CandidateRecord {
    /// Snapshot a live candidate into a record.
    pub fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            current: candidate.current(),
            created: candidate.created(),
            source: candidate.source(),
            parent: candidate.parent_serial().map(|s| s.value()),
            trajectory_length: candidate.trajectory_length(),
        }
    }

    /// Reconstitute a fresh, active candidate from this record.
    ///
    /// The recorded parent serial is carried verbatim; the candidate
    /// itself receives a newly allocated serial (process-local counters
    /// do not round-trip, the recorded column does).
    pub fn restore(&self) -> CandidateRef {
        Candidate::restore(
            self.current,
            self.created,
            self.source,
            self.parent.map(CandidateSerial::from_value),
            self.trajectory_length,
        )
    }
}

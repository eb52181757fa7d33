//! Strongly-typed identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A particle-type code in the PDG numbering scheme.
///
/// Examples: `ParticleId(22)` is a photon, `ParticleId(11)` /
/// `ParticleId(-11)` the electron/positron pair, `ParticleId(2212)` a
/// proton. The pipeline never interprets the code beyond equality and
/// set membership; physics modules own the semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub i32);

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ParticleId {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

/// Counter for unique [`CandidateSerial`] allocation.
static CANDIDATE_SERIAL_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance serial for a [`Candidate`](crate::Candidate).
///
/// Allocated from a monotonic atomic counter via [`CandidateSerial::next`].
/// Two distinct candidates always have different serials, even clones with
/// identical state. Secondaries record their parent's serial as a
/// non-owning back-reference for traversal and bookkeeping: a serial never
/// keeps anything alive and never participates in destruction, so the
/// candidate tree cannot form ownership cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateSerial(u64);

impl CandidateSerial {
    /// Allocate a fresh, unique serial.
    ///
    /// Each call returns a serial never returned before within this
    /// process. Thread-safe.
    pub fn next() -> Self {
        Self(CANDIDATE_SERIAL_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw serial value, for records and diagnostics.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Reconstitute a serial from a recorded raw value.
    ///
    /// Used by the persistence layer when reloading dumped candidates;
    /// recorded serials are carried verbatim and are not re-registered
    /// with the process-local counter.
    pub fn from_value(v: u64) -> Self {
        Self(v)
    }
}

impl fmt::Display for CandidateSerial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serials_are_unique_and_monotonic() {
        let a = CandidateSerial::next();
        let b = CandidateSerial::next();
        assert_ne!(a, b);
        assert!(b.value() > a.value());
    }

    #[test]
    fn particle_id_display_matches_code() {
        assert_eq!(ParticleId(-11).to_string(), "-11");
        assert_eq!(ParticleId::from(2212), ParticleId(2212));
    }

    #[test]
    fn serial_round_trips_through_raw_value() {
        let s = CandidateSerial::next();
        assert_eq!(CandidateSerial::from_value(s.value()), s);
    }
}

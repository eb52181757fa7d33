//! The lock-free reference counter.

use std::sync::atomic::{fence, AtomicUsize, Ordering};

/// A lock-free atomic reference counter.
///
/// The counter starts at 1 — the creating holder's reference. Ownership
/// transitions are single hardware atomics; there is no lock around the
/// counter, because candidate ownership legitimately crosses worker
/// threads (a secondary spawned on one worker may be buffered by a
/// collector invoked from another).
///
/// `RefCount` does not destroy anything itself. [`Self::decrement`]
/// reports the new count and the *caller* performs the one destruction
/// when it observes zero. [`Shared`](crate::Shared) wires this protocol into an
/// RAII handle; embedders with their own storage can drive the counter
/// directly.
///
/// # Ordering protocol
///
/// Increments are `Relaxed`: acquiring a new reference needs no
/// synchronization of its own, the handle it was cloned from already
/// keeps the object alive. Decrements are `Release`, and the zero
/// observer issues an `Acquire` fence before destruction, so every write
/// made through any handle is visible to the destroying thread.
#[derive(Debug)]
pub struct RefCount {
    strong: AtomicUsize,
}

impl RefCount {
    /// Create a counter holding the creating holder's single reference.
    pub const fn new() -> Self {
        Self {
            strong: AtomicUsize::new(1),
        }
    }

    /// Increment the count and return the new value.
    pub fn increment(&self) -> usize {
        self.strong.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Decrement the count and return the new value.
    ///
    /// A return of 0 transfers the destruction obligation to the caller:
    /// destroy the counted object now, exactly once. The `Acquire` fence
    /// has already been issued on that path.
    ///
    /// Decrementing a counter that is already zero is a programmer error.
    /// It is reported on stderr in debug builds, the counter stays at
    /// zero, and 0 is returned — this path must not fail, so it never
    /// panics.
    pub fn decrement(&self) -> usize {
        let previous = self.strong.fetch_sub(1, Ordering::Release);
        if previous == 0 {
            // Misuse: undo the wrap so repeated misuse stays observable.
            self.strong.store(0, Ordering::Relaxed);
            #[cfg(debug_assertions)]
            eprintln!("auriga-kernel: reference count decremented below zero");
            return 0;
        }
        if previous == 1 {
            fence(Ordering::Acquire);
        }
        previous - 1
    }

    /// Current count, for diagnostics.
    ///
    /// The value is immediately stale under concurrent mutation; it is
    /// exact only when the caller otherwise knows no other holder is
    /// active (e.g. a uniqueness check before in-place mutation).
    pub fn get(&self) -> usize {
        self.strong.load(Ordering::Acquire)
    }
}

impl Default for RefCount {
    fn default() -> Self {
        Self::new()
    }
}

//! # Lookup
//!
//! Result of a memory read that is allowed to degrade.
//!
//! Memory is an optimization for mission execution, not a correctness requirement:
//! a failing backend yields [`Lookup::Unavailable`] carrying the cause, and the caller
//! decides what "no memory" means for it (usually: continue without that section).

use crate::error::MemoryError;

/// Outcome of a memory read.
#[derive(Debug)]
pub enum Lookup<T> {
    /// The backend answered (possibly with an empty result).
    Available(T),
    /// The backend failed; the cause has already been logged at the store boundary.
    Unavailable(MemoryError),
}

impl<T> Lookup<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Lookup::Available(_))
    }

    /// The answered value, discarding the cause of an unavailable lookup.
    pub fn available(self) -> Option<T> {
        match self {
            Lookup::Available(value) => Some(value),
            Lookup::Unavailable(_) => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Lookup<U> {
        match self {
            Lookup::Available(value) => Lookup::Available(f(value)),
            Lookup::Unavailable(err) => Lookup::Unavailable(err),
        }
    }
}

impl<T> Lookup<Vec<T>> {
    /// `None` when unavailable or empty; the non-empty rows otherwise.
    pub fn non_empty(self) -> Option<Vec<T>> {
        self.available().filter(|rows| !rows.is_empty())
    }
}

//! Memory error types.
//!
//! Every fault inside the memory subsystem is a [`MemoryError`], so callers can tell
//! "memory broken" apart from invocation or configuration faults.

use std::fmt;
use thiserror::Error;

/// Boxed backend cause carried by [`MemoryError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which memory store an error or log event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryKind {
    ShortTerm,
    LongTerm,
    Entity,
    User,
}

impl MemoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryKind::ShortTerm => "short-term",
            MemoryKind::LongTerm => "long-term",
            MemoryKind::Entity => "entity",
            MemoryKind::User => "user",
        }
    }
}

impl fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by memory stores and their storage backends.
#[derive(Error, Debug)]
pub enum MemoryError {
    /// A save or search against the backing index/database failed.
    #[error("{kind} memory backend error: {source}")]
    Backend {
        kind: MemoryKind,
        #[source]
        source: BoxError,
    },

    /// A reset failed; storage is in an unknown state.
    #[error("An error occurred while resetting the {kind} memory: {source}")]
    Reset {
        kind: MemoryKind,
        #[source]
        source: BoxError,
    },

    /// Stored metadata could not be encoded or decoded as JSON.
    #[error("memory metadata encoding error: {0}")]
    Metadata(#[from] serde_json::Error),
}

impl MemoryError {
    pub fn backend(kind: MemoryKind, source: impl Into<BoxError>) -> Self {
        MemoryError::Backend {
            kind,
            source: source.into(),
        }
    }

    /// Wraps any failure as a reset fault for `kind`, keeping the original cause.
    pub fn reset(kind: MemoryKind, source: impl Into<BoxError>) -> Self {
        MemoryError::Reset {
            kind,
            source: source.into(),
        }
    }
}

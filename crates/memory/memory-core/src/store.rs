//! # Memory Storage
//!
//! Two contracts live here:
//!
//! - [`VectorIndex`]: the embedding/similarity backend consumed by short-term, entity
//!   and user memory. Implemented outside the memory crate (in-memory index, vector
//!   databases, hosted providers).
//! - [`MemoryStore`]: the uniform save/search/reset surface every memory variant
//!   exposes to the rest of the system.

use async_trait::async_trait;

use crate::error::{MemoryError, MemoryKind};
use crate::lookup::Lookup;
use crate::types::{Metadata, SearchHit};

/// Embedding/similarity backend.
///
/// # Score direction
///
/// Scores are similarities: higher means closer. `search` keeps hits whose score is
/// **at or above** `score_threshold`, sorted by descending score and truncated to
/// `limit`. Backends measuring distance must convert before returning.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Embeds and stores one value with its metadata.
    async fn save(&self, value: &str, metadata: &Metadata) -> Result<(), anyhow::Error>;

    /// Returns up to `limit` hits with `score >= score_threshold`, best first.
    async fn search(
        &self,
        query: &str,
        limit: usize,
        score_threshold: f32,
    ) -> Result<Vec<SearchHit>, anyhow::Error>;

    /// Removes every stored value.
    async fn reset(&self) -> Result<(), anyhow::Error>;
}

/// Uniform contract over every memory variant.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Which store this is; used in errors and log fields.
    fn kind(&self) -> MemoryKind;

    /// Writes one memory item. Failures are returned, never panicked; callers decide
    /// whether a failed save is fatal.
    async fn save(
        &self,
        value: &str,
        metadata: Metadata,
        agent: Option<&str>,
    ) -> Result<(), MemoryError>;

    /// Items ranked by similarity to `query`, at most `limit`, filtered by
    /// `score_threshold` (see [`VectorIndex`] for the direction).
    async fn search(&self, query: &str, limit: usize, score_threshold: f32)
        -> Lookup<Vec<SearchHit>>;

    /// Clears all data of this store; failures come back as [`MemoryError::Reset`].
    async fn reset(&self) -> Result<(), MemoryError>;
}

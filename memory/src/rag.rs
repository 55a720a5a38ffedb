//! Shared plumbing for the embedding-indexed stores (short-term, entity, user).
//!
//! Wraps a [`VectorIndex`] and turns its `anyhow` faults into typed outcomes:
//! saves return [`MemoryError::Backend`], searches return [`Lookup::Unavailable`],
//! resets return [`MemoryError::Reset`]. Every fault is logged here, once.

use std::sync::Arc;

use memory_core::{Lookup, MemoryError, MemoryKind, Metadata, SearchHit, VectorIndex};
use tracing::{debug, error};

#[derive(Clone)]
pub(crate) struct RagStorage {
    kind: MemoryKind,
    index: Arc<dyn VectorIndex>,
}

impl RagStorage {
    pub(crate) fn new(kind: MemoryKind, index: Arc<dyn VectorIndex>) -> Self {
        Self { kind, index }
    }

    pub(crate) async fn save(&self, value: &str, metadata: &Metadata) -> Result<(), MemoryError> {
        self.index.save(value, metadata).await.map_err(|e| {
            error!(
                store = %self.kind,
                operation = "save",
                error = %e,
                "MEMORY ERROR: Failed to save memory item"
            );
            MemoryError::backend(self.kind, e)
        })
    }

    pub(crate) async fn search(
        &self,
        query: &str,
        limit: usize,
        score_threshold: f32,
    ) -> Lookup<Vec<SearchHit>> {
        match self.index.search(query, limit, score_threshold).await {
            Ok(hits) => {
                debug!(store = %self.kind, limit, hits = hits.len(), "Memory search returned");
                Lookup::Available(hits)
            }
            Err(e) => {
                error!(
                    store = %self.kind,
                    operation = "search",
                    error = %e,
                    "MEMORY ERROR: Memory search failed"
                );
                Lookup::Unavailable(MemoryError::backend(self.kind, e))
            }
        }
    }

    pub(crate) async fn reset(&self) -> Result<(), MemoryError> {
        self.index.reset().await.map_err(|e| {
            error!(
                store = %self.kind,
                operation = "reset",
                error = %e,
                "MEMORY ERROR: Memory reset failed"
            );
            MemoryError::reset(self.kind, e)
        })
    }
}

/// Copies `metadata` and records `agent` under `"agent"` when given.
pub(crate) fn with_agent(mut metadata: Metadata, agent: Option<&str>) -> Metadata {
    if let Some(agent) = agent {
        metadata.insert("agent".to_string(), serde_json::Value::String(agent.to_string()));
    }
    metadata
}

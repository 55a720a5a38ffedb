//! Short-term memory: recent insights from agent runs, embedding-indexed and
//! searched by similarity to the current mission.

use std::sync::Arc;

use async_trait::async_trait;
use memory_core::{
    Lookup, MemoryError, MemoryItem, MemoryKind, MemoryProvider, MemoryStore, Metadata, SearchHit,
    VectorIndex,
};

use crate::rag::{with_agent, RagStorage};

/// Ephemeral, similarity-searched memory of recent mission outputs.
#[derive(Clone)]
pub struct ShortTermMemory {
    storage: RagStorage,
    provider: MemoryProvider,
}

impl ShortTermMemory {
    pub fn new(index: Arc<dyn VectorIndex>, provider: MemoryProvider) -> Self {
        Self {
            storage: RagStorage::new(MemoryKind::ShortTerm, index),
            provider,
        }
    }

    pub async fn save_item(&self, item: &MemoryItem) -> Result<(), MemoryError> {
        self.save(&item.data, item.metadata.clone(), item.agent.as_deref())
            .await
    }
}

#[async_trait]
impl MemoryStore for ShortTermMemory {
    fn kind(&self) -> MemoryKind {
        MemoryKind::ShortTerm
    }

    async fn save(
        &self,
        value: &str,
        metadata: Metadata,
        agent: Option<&str>,
    ) -> Result<(), MemoryError> {
        let value = self.provider.formatter().short_term(value);
        self.storage.save(&value, &with_agent(metadata, agent)).await
    }

    async fn search(
        &self,
        query: &str,
        limit: usize,
        score_threshold: f32,
    ) -> Lookup<Vec<SearchHit>> {
        self.storage.search(query, limit, score_threshold).await
    }

    async fn reset(&self) -> Result<(), MemoryError> {
        self.storage.reset().await
    }
}

//! User memory: preferences and facts about the person the squad works for.
//! Only configured when the provider supports it.

use std::sync::Arc;

use async_trait::async_trait;
use memory_core::{
    Lookup, MemoryError, MemoryKind, MemoryProvider, MemoryStore, Metadata, SearchHit, VectorIndex,
};

use crate::rag::{with_agent, RagStorage};

#[derive(Clone)]
pub struct UserMemory {
    storage: RagStorage,
    provider: MemoryProvider,
}

impl UserMemory {
    pub fn new(index: Arc<dyn VectorIndex>, provider: MemoryProvider) -> Self {
        Self {
            storage: RagStorage::new(MemoryKind::User, index),
            provider,
        }
    }
}

#[async_trait]
impl MemoryStore for UserMemory {
    fn kind(&self) -> MemoryKind {
        MemoryKind::User
    }

    async fn save(
        &self,
        value: &str,
        metadata: Metadata,
        agent: Option<&str>,
    ) -> Result<(), MemoryError> {
        let value = self.provider.formatter().user(value);
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

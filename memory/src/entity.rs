//! Entity memory: facts about people, organizations and concepts met during missions.
//!
//! Each [`EntityMemoryItem`] is flattened into one descriptive string by the
//! provider's formatter before it reaches the index; the structured fields are not
//! recoverable from storage.

use std::sync::Arc;

use async_trait::async_trait;
use memory_core::{
    EntityMemoryItem, Lookup, MemoryError, MemoryKind, MemoryProvider, MemoryStore, Metadata,
    SearchHit, VectorIndex,
};
use serde_json::Value;

use crate::rag::{with_agent, RagStorage};

#[derive(Clone)]
pub struct EntityMemory {
    storage: RagStorage,
    provider: MemoryProvider,
}

impl EntityMemory {
    pub fn new(index: Arc<dyn VectorIndex>, provider: MemoryProvider) -> Self {
        Self {
            storage: RagStorage::new(MemoryKind::Entity, index),
            provider,
        }
    }

    /// Formats and saves one entity. Name and type are kept in metadata as well.
    pub async fn save_entity(
        &self,
        item: &EntityMemoryItem,
        agent: Option<&str>,
    ) -> Result<(), MemoryError> {
        let value = self.provider.formatter().entity(item);
        let mut metadata = with_agent(item.metadata.clone(), agent);
        metadata.insert("entity_name".to_string(), Value::String(item.name.clone()));
        metadata.insert("entity_type".to_string(), Value::String(item.entity_type.clone()));
        self.storage.save(&value, &metadata).await
    }
}

#[async_trait]
impl MemoryStore for EntityMemory {
    fn kind(&self) -> MemoryKind {
        MemoryKind::Entity
    }

    /// Saves an already formatted entity description.
    async fn save(
        &self,
        value: &str,
        metadata: Metadata,
        agent: Option<&str>,
    ) -> Result<(), MemoryError> {
        self.storage.save(value, &with_agent(metadata, agent)).await
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

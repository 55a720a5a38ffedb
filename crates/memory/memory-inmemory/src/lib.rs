//! # In-Memory Vector Index
//!
//! An embedding-indexed [`VectorIndex`] kept entirely in process memory.
//!
//! **Advantages**:
//! - No I/O; fastest option for tests and single-process runs
//! - Works with any [`EmbeddingService`]
//!
//! **Limitations**:
//! - Data is lost on restart (fits short-term memory, which is ephemeral anyway)
//! - Linear scan on search
//!
//! ## Scoring
//!
//! Score is the cosine similarity between the query embedding and the stored
//! embedding, in `[-1, 1]`; higher is better. Hits below `score_threshold` are dropped.
//!
//! ## Thread Safety
//!
//! Entries sit behind `Arc<RwLock<_>>`; clones share the same index.

use async_trait::async_trait;
use embedding::EmbeddingService;
use memory_core::{Metadata, SearchHit, VectorIndex};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct IndexedEntry {
    id: Uuid,
    content: String,
    embedding: Vec<f32>,
    metadata: Metadata,
}

/// In-memory embedding index.
#[derive(Clone)]
pub struct InMemoryVectorIndex {
    name: String,
    entries: Arc<RwLock<Vec<IndexedEntry>>>,
    embedding_service: Arc<dyn EmbeddingService>,
}

impl InMemoryVectorIndex {
    /// Creates an empty index. `name` only labels log events (e.g. "short_term", "entities").
    pub fn new(name: impl Into<String>, embedding_service: Arc<dyn EmbeddingService>) -> Self {
        Self {
            name: name.into(),
            entries: Arc::new(RwLock::new(Vec::new())),
            embedding_service,
        }
    }

    /// Returns the number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if the index is empty.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Calculates cosine similarity between two vectors.
    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        if a.is_empty() || b.is_empty() || a.len() != b.len() {
            return 0.0;
        }

        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot_product / (norm_a * norm_b)
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn save(&self, value: &str, metadata: &Metadata) -> Result<(), anyhow::Error> {
        let embedding = self.embedding_service.embed(value).await?;
        let entry = IndexedEntry {
            id: Uuid::new_v4(),
            content: value.to_string(),
            embedding,
            metadata: metadata.clone(),
        };
        debug!(
            index = %self.name,
            id = %entry.id,
            dimension = entry.embedding.len(),
            "Writing entry to in-memory vector index"
        );
        self.entries.write().await.push(entry);
        Ok(())
    }

    async fn search(
        &self,
        query: &str,
        limit: usize,
        score_threshold: f32,
    ) -> Result<Vec<SearchHit>, anyhow::Error> {
        let query_embedding = self.embedding_service.embed(query).await?;
        let entries = self.entries.read().await;

        let mut scored: Vec<(f32, &IndexedEntry)> = entries
            .iter()
            .map(|entry| {
                (
                    Self::cosine_similarity(&query_embedding, &entry.embedding),
                    entry,
                )
            })
            .filter(|(score, _)| *score >= score_threshold)
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let hits: Vec<SearchHit> = scored
            .into_iter()
            .take(limit)
            .map(|(score, entry)| SearchHit {
                content: entry.content.clone(),
                score,
                metadata: entry.metadata.clone(),
            })
            .collect();

        info!(
            index = %self.name,
            limit,
            score_threshold,
            count = hits.len(),
            "In-memory vector index search returned"
        );
        Ok(hits)
    }

    async fn reset(&self) -> Result<(), anyhow::Error> {
        self.entries.write().await.clear();
        info!(index = %self.name, "In-memory vector index reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Embeds text as counts of a few marker words, so similarity is predictable.
    struct KeywordEmbedding;

    #[async_trait]
    impl EmbeddingService for KeywordEmbedding {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
            let text = text.to_lowercase();
            Ok(["rust", "python", "memory"]
                .iter()
                .map(|word| text.matches(word).count() as f32)
                .collect())
        }
    }

    /// Embedding backend that is always down.
    struct FailingEmbedding;

    #[async_trait]
    impl EmbeddingService for FailingEmbedding {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, anyhow::Error> {
            anyhow::bail!("embedding backend unreachable")
        }
    }

    fn index() -> InMemoryVectorIndex {
        InMemoryVectorIndex::new("test", Arc::new(KeywordEmbedding))
    }

    #[tokio::test]
    async fn test_search_ranks_by_similarity() {
        let index = index();
        index.save("rust rust memory", &Metadata::new()).await.unwrap();
        index.save("python only", &Metadata::new()).await.unwrap();
        index.save("rust", &Metadata::new()).await.unwrap();

        let hits = index.search("rust", 10, 0.1).await.unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].content, "rust");
        assert!(hits[0].score >= hits[1].score);
    }

    #[tokio::test]
    async fn test_search_respects_limit_and_threshold() {
        let index = index();
        for text in ["rust", "rust memory", "rust python", "python"] {
            index.save(text, &Metadata::new()).await.unwrap();
        }

        let limited = index.search("rust", 2, 0.0).await.unwrap();
        assert_eq!(limited.len(), 2);

        let strict = index.search("rust", 10, 0.99).await.unwrap();
        assert_eq!(strict.len(), 1);
        assert_eq!(strict[0].content, "rust");
    }

    #[tokio::test]
    async fn test_metadata_is_returned() {
        let index = index();
        let metadata = json!({"agent": "Researcher"}).as_object().cloned().unwrap();
        index.save("memory", &metadata).await.unwrap();

        let hits = index.search("memory", 1, 0.5).await.unwrap();
        assert_eq!(hits[0].metadata.get("agent"), Some(&json!("Researcher")));
    }

    #[tokio::test]
    async fn test_reset_clears_entries() {
        let index = index();
        index.save("rust", &Metadata::new()).await.unwrap();
        assert!(!index.is_empty().await);

        index.reset().await.unwrap();

        assert!(index.is_empty().await);
        assert!(index.search("rust", 3, 0.0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_embedding_failure_is_returned() {
        let index = InMemoryVectorIndex::new("broken", Arc::new(FailingEmbedding));
        assert!(index.save("rust", &Metadata::new()).await.is_err());
        assert!(index.search("rust", 3, 0.0).await.is_err());
    }

    #[test]
    fn test_cosine_similarity_mismatched_dimensions() {
        assert_eq!(InMemoryVectorIndex::cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
        assert_eq!(InMemoryVectorIndex::cosine_similarity(&[], &[]), 0.0);
    }
}

//! Shared test utilities for memory integration tests.
//!
//! Provides MockVectorIndex (VectorIndex with canned hits, delay and failure modes),
//! KeywordEmbedding (EmbeddingService over a tiny keyword vocabulary) and
//! MockRecall (LongTermRecall with canned records).

#![allow(dead_code)]

use async_trait::async_trait;
use embedding::EmbeddingService;
use memory::LongTermRecall;
use memory_core::{Lookup, LongTermRecord, Metadata, SearchHit, VectorIndex};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Vector index returning canned hits after an optional delay; records every save.
#[derive(Default)]
pub struct MockVectorIndex {
    pub hits: Vec<SearchHit>,
    pub delay: Duration,
    pub fail: bool,
    pub saved: Mutex<Vec<(String, Metadata)>>,
    pub queries: Mutex<Vec<String>>,
}

impl MockVectorIndex {
    pub fn with_hits(contents: &[&str]) -> Self {
        Self {
            hits: contents.iter().map(|c| hit(c, 0.9)).collect(),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn delayed(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }
}

#[async_trait]
impl VectorIndex for MockVectorIndex {
    async fn save(&self, value: &str, metadata: &Metadata) -> Result<(), anyhow::Error> {
        if self.fail {
            anyhow::bail!("index offline");
        }
        self.saved
            .lock()
            .await
            .push((value.to_string(), metadata.clone()));
        Ok(())
    }

    async fn search(
        &self,
        query: &str,
        limit: usize,
        score_threshold: f32,
    ) -> Result<Vec<SearchHit>, anyhow::Error> {
        self.queries.lock().await.push(query.to_string());
        tokio::time::sleep(self.delay).await;
        if self.fail {
            anyhow::bail!("index offline");
        }
        Ok(self
            .hits
            .iter()
            .filter(|h| h.score >= score_threshold)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn reset(&self) -> Result<(), anyhow::Error> {
        if self.fail {
            anyhow::bail!("index offline");
        }
        self.saved.lock().await.clear();
        Ok(())
    }
}

/// Long-term recall with canned records and an optional delay.
#[derive(Default)]
pub struct MockRecall {
    pub records: Vec<LongTermRecord>,
    pub delay: Duration,
}

impl MockRecall {
    pub fn with_suggestions(suggestions: &[&str]) -> Self {
        let mut metadata = Metadata::new();
        metadata.insert("suggestions".to_string(), json!(suggestions));
        Self {
            records: vec![LongTermRecord {
                metadata,
                datetime: "2026-01-01T00:00:00.000000Z".to_string(),
                score: 1.0,
            }],
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }
}

#[async_trait]
impl LongTermRecall for MockRecall {
    async fn recall(&self, _mission: &str, latest_n: usize) -> Lookup<Vec<LongTermRecord>> {
        tokio::time::sleep(self.delay).await;
        Lookup::Available(self.records.iter().take(latest_n).cloned().collect())
    }
}

/// Embeds text as counts over a fixed keyword vocabulary.
pub struct KeywordEmbedding;

const VOCABULARY: [&str; 4] = ["report", "acme", "travel", "budget"];

#[async_trait]
impl EmbeddingService for KeywordEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        let lower = text.to_lowercase();
        Ok(VOCABULARY
            .iter()
            .map(|word| lower.matches(word).count() as f32)
            .collect())
    }
}

pub fn hit(content: &str, score: f32) -> SearchHit {
    SearchHit {
        content: content.to_string(),
        score,
        metadata: Metadata::new(),
    }
}

pub fn keyword_index(name: &str) -> Arc<memory_inmemory::InMemoryVectorIndex> {
    Arc::new(memory_inmemory::InMemoryVectorIndex::new(
        name,
        Arc::new(KeywordEmbedding),
    ))
}

//! # Long-Term Memory
//!
//! Outcomes of completed missions, keyed by the exact mission description and
//! persisted in SQLite through [`LtmSqliteStorage`].
//!
//! ## Failure policy
//!
//! - loads degrade to [`Lookup::Unavailable`] (logged by the storage)
//! - saves return the backend error; callers log and continue
//! - resets are wrapped as [`MemoryError::Reset`] and must be handled

use std::path::Path;

use async_trait::async_trait;
use memory_core::{
    Lookup, LongTermMemoryItem, LongTermRecord, MemoryError, MemoryKind, MemoryStore, Metadata,
    SearchHit,
};
use memory_sqlite::LtmSqliteStorage;
use serde_json::Value;

use crate::rag::with_agent;

/// Exact-key recall of prior outcomes for a mission.
#[async_trait]
pub trait LongTermRecall: Send + Sync {
    async fn recall(&self, mission_description: &str, latest_n: usize) -> Lookup<Vec<LongTermRecord>>;
}

#[derive(Debug, Clone)]
pub struct LongTermMemory {
    storage: LtmSqliteStorage,
}

impl LongTermMemory {
    pub fn new(storage: LtmSqliteStorage) -> Self {
        Self { storage }
    }

    /// Opens (and initializes) the SQLite log at `db_path`.
    pub async fn open(db_path: impl AsRef<Path>) -> Self {
        Self::new(LtmSqliteStorage::open(db_path).await)
    }

    pub fn storage(&self) -> &LtmSqliteStorage {
        &self.storage
    }

    /// Appends one mission outcome. The stored metadata carries `agent`,
    /// `expected_output` and `quality`; the row score is the quality.
    pub async fn save_item(&self, item: &LongTermMemoryItem) -> Result<(), MemoryError> {
        let mut metadata = with_agent(item.metadata.clone(), Some(&item.agent));
        metadata.insert(
            "expected_output".to_string(),
            Value::String(item.expected_output.clone()),
        );
        metadata.insert("quality".to_string(), Value::from(item.quality));
        self.storage
            .save(&item.mission, &metadata, &item.datetime, item.quality)
            .await
    }

    /// Most recent `latest_n` records for exactly `mission_description`.
    pub async fn search_records(
        &self,
        mission_description: &str,
        latest_n: usize,
    ) -> Lookup<Vec<LongTermRecord>> {
        self.storage.load(mission_description, latest_n).await
    }
}

#[async_trait]
impl LongTermRecall for LongTermMemory {
    async fn recall(&self, mission_description: &str, latest_n: usize) -> Lookup<Vec<LongTermRecord>> {
        self.search_records(mission_description, latest_n).await
    }
}

#[async_trait]
impl MemoryStore for LongTermMemory {
    fn kind(&self) -> MemoryKind {
        MemoryKind::LongTerm
    }

    /// Appends a row keyed by `value` (the mission description), stamped now. The
    /// score is read from `metadata["quality"]`, 0 when absent.
    async fn save(
        &self,
        value: &str,
        metadata: Metadata,
        agent: Option<&str>,
    ) -> Result<(), MemoryError> {
        let score = metadata
            .get("quality")
            .and_then(Value::as_f64)
            .unwrap_or_default();
        let metadata = with_agent(metadata, agent);
        self.storage
            .save(value, &metadata, &memory_core::timestamp_now(), score)
            .await
    }

    /// Exact-match lookup: `query` is the mission description, `limit` is `latest_n`.
    /// Records are not similarity-ranked, so `score_threshold` does not apply. Each
    /// hit's content is the record's suggestions, one per line.
    async fn search(
        &self,
        query: &str,
        limit: usize,
        _score_threshold: f32,
    ) -> Lookup<Vec<SearchHit>> {
        self.search_records(query, limit).await.map(|records| {
            records
                .into_iter()
                .map(|record| SearchHit {
                    content: record.suggestions().join("\n"),
                    score: record.score as f32,
                    metadata: record.metadata,
                })
                .collect()
        })
    }

    async fn reset(&self) -> Result<(), MemoryError> {
        self.storage
            .reset()
            .await
            .map_err(|e| MemoryError::reset(MemoryKind::LongTerm, e))
    }
}

//! # Core Types
//!
//! Transient items handed to memory stores and the records they return.
//!
//! | Type | Produced by | Consumed by |
//! |------|-------------|-------------|
//! | `MemoryItem` | mission turn | ShortTermMemory / UserMemory `save` |
//! | `EntityMemoryItem` | mission evaluation | EntityMemory `save_entity` |
//! | `LongTermMemoryItem` | mission completion | LongTermMemory `save_item` |
//! | `LongTermRecord` | long-term storage `load` | contextual memory |
//! | `SearchHit` | vector index `search` | contextual memory |

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Free-form metadata attached to memory items, stored as a JSON object.
pub type Metadata = serde_json::Map<String, Value>;

/// A single piece of memory produced during a mission turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryItem {
    pub data: String,
    pub metadata: Metadata,
    pub agent: Option<String>,
}

impl MemoryItem {
    pub fn new(data: impl Into<String>, metadata: Metadata, agent: Option<String>) -> Self {
        Self {
            data: data.into(),
            metadata,
            agent,
        }
    }
}

/// A fact about an entity (person, organization, concept) seen during a mission.
///
/// Formatted into a single string before persistence; the structured fields are
/// not recoverable from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMemoryItem {
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub description: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl EntityMemoryItem {
    pub fn new(
        name: impl Into<String>,
        entity_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            entity_type: entity_type.into(),
            description: description.into(),
            metadata: Metadata::new(),
        }
    }
}

/// Outcome of a completed mission, written to long-term memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongTermMemoryItem {
    pub agent: String,
    /// Mission description; the exact-match retrieval key.
    pub mission: String,
    pub expected_output: String,
    pub datetime: String,
    pub quality: f64,
    pub metadata: Metadata,
}

impl LongTermMemoryItem {
    /// Creates an item stamped with the current time (see [`timestamp_now`]).
    pub fn new(
        agent: impl Into<String>,
        mission: impl Into<String>,
        expected_output: impl Into<String>,
        quality: f64,
        metadata: Metadata,
    ) -> Self {
        Self {
            agent: agent.into(),
            mission: mission.into(),
            expected_output: expected_output.into(),
            datetime: timestamp_now(),
            quality,
            metadata,
        }
    }
}

/// A long-term row as returned by a load: everything but the row id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongTermRecord {
    pub metadata: Metadata,
    pub datetime: String,
    pub score: f64,
}

impl LongTermRecord {
    /// The `suggestions` strings stored in this record's metadata, if any.
    pub fn suggestions(&self) -> Vec<&str> {
        self.metadata
            .get("suggestions")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// One ranked result of a similarity search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub content: String,
    /// Similarity score; higher is more similar (see [`crate::VectorIndex`]).
    pub score: f32,
    pub metadata: Metadata,
}

/// Current UTC time as RFC 3339 with microseconds.
///
/// Fixed width, so lexical order of stored values is chronological order.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_suggestions_reads_string_array() {
        let record = LongTermRecord {
            metadata: json!({"suggestions": ["a", 3, "b"]})
                .as_object()
                .cloned()
                .unwrap(),
            datetime: timestamp_now(),
            score: 0.5,
        };
        assert_eq!(record.suggestions(), vec!["a", "b"]);
    }

    #[test]
    fn timestamps_sort_chronologically() {
        let first = timestamp_now();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = timestamp_now();
        assert!(second > first);
        assert_eq!(first.len(), second.len());
    }
}

//! Shapes of the training files.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One round of human feedback for an agent. Fields other than `human_feedback`
/// (initial output, improved output, ...) are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub human_feedback: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TrainingRecord {
    pub fn new(human_feedback: impl Into<String>) -> Self {
        Self {
            human_feedback: human_feedback.into(),
            extra: Map::new(),
        }
    }
}

/// `agent_id -> iteration -> record`. Iterations are ordered numerically.
pub type TrainingData = HashMap<String, BTreeMap<u64, TrainingRecord>>;

/// Suggestions learned for one role.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrainedAgentRecord {
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `role -> suggestions`.
pub type TrainedData = HashMap<String, TrainedAgentRecord>;

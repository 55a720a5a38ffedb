use memory_core::EntityMemoryItem;
use serde::{Deserialize, Serialize};

/// Judgement of a finished mission, produced by an external evaluator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionEvaluation {
    pub quality: f64,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub entities: Vec<EntityMemoryItem>,
}

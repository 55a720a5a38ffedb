//! Core types: mission, tool, tool result, knowledge snippet, and the tool/knowledge traits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unit of work with a description and expected output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: Uuid,
    /// Natural-language description; also the exact-match key into long-term memory.
    pub description: String,
    pub expected_output: String,
    /// Whether the executor should ask a human to review the final answer.
    #[serde(default)]
    pub human_input: bool,
}

impl Mission {
    pub fn new(description: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            expected_output: expected_output.into(),
            human_input: false,
        }
    }

    pub fn with_human_input(mut self, human_input: bool) -> Self {
        self.human_input = human_input;
        self
    }

    /// Base prompt: description plus the expected-output criteria.
    pub fn prompt(&self) -> String {
        prompt::mission_prompt(&self.description, &self.expected_output)
    }
}

/// A capability the executor may call. Only its rendering is needed here; invocation
/// happens inside the executor.
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
}

/// Result of one tool call made by the executor during a mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_name: String,
    pub result: String,
    /// When true, this result replaces the model's final answer.
    #[serde(default)]
    pub result_as_answer: bool,
}

impl ToolResult {
    pub fn new(tool_name: impl Into<String>, result: impl Into<String>, result_as_answer: bool) -> Self {
        Self {
            tool_name: tool_name.into(),
            result: result.into(),
            result_as_answer,
        }
    }
}

/// One snippet returned by a knowledge base; snippets without context are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeSnippet {
    pub context: Option<String>,
}

impl KnowledgeSnippet {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: Some(context.into()),
        }
    }
}

/// External knowledge base queried with the raw mission text.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    async fn query(&self, queries: &[String]) -> anyhow::Result<Vec<KnowledgeSnippet>>;
}

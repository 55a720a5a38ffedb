//! Shared test utilities for agent integration tests.
//!
//! Provides ScriptedExecutor (MissionExecutor replaying canned outcomes and recording
//! every input), ModelError (a concrete invocation fault for downcasting), StaticTool,
//! StaticKnowledge (KnowledgeBase) and CannedIndex (VectorIndex).

#![allow(dead_code)]

use async_trait::async_trait;
use memory_core::{Metadata, SearchHit, VectorIndex};
use squad_core::{
    ExecutorInput, ExecutorOutput, KnowledgeBase, KnowledgeSnippet, MissionExecutor, Tool,
    ToolResult,
};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Invocation fault raised by the scripted executor.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("model backend unavailable (attempt {attempt})")]
pub struct ModelError {
    pub attempt: usize,
}

pub enum Step {
    Fail,
    Answer(ExecutorOutput),
}

/// Replays `steps` in order; once exhausted, answers "done".
pub struct ScriptedExecutor {
    steps: Mutex<VecDeque<Step>>,
    pub inputs: Mutex<Vec<ExecutorInput>>,
}

impl ScriptedExecutor {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            inputs: Mutex::new(Vec::new()),
        }
    }

    /// Fails `n` times, then answers `answer`.
    pub fn failing_then(n: usize, answer: &str) -> Self {
        let mut steps: Vec<Step> = (0..n).map(|_| Step::Fail).collect();
        steps.push(Step::Answer(ExecutorOutput::text(answer)));
        Self::new(steps)
    }

    pub fn answering(output: ExecutorOutput) -> Self {
        Self::new(vec![Step::Answer(output)])
    }

    pub fn calls(&self) -> usize {
        self.inputs.lock().unwrap().len()
    }

    pub fn last_input(&self) -> String {
        self.inputs
            .lock()
            .unwrap()
            .last()
            .map(|i| i.input.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MissionExecutor for ScriptedExecutor {
    async fn invoke(&self, input: ExecutorInput) -> anyhow::Result<ExecutorOutput> {
        if let Some(limiter) = &input.rpm_limiter {
            limiter.check_or_wait().await;
        }
        let attempt = {
            let mut inputs = self.inputs.lock().unwrap();
            inputs.push(input);
            inputs.len()
        };
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Fail) => Err(ModelError { attempt }.into()),
            Some(Step::Answer(output)) => Ok(output),
            None => Ok(ExecutorOutput::text("done")),
        }
    }
}

pub struct StaticTool {
    pub name: String,
    pub description: String,
}

impl StaticTool {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

impl Tool for StaticTool {
    fn name(&self) -> &str {
        &self.name
    }
    fn description(&self) -> &str {
        &self.description
    }
}

pub struct StaticKnowledge {
    pub snippets: Vec<KnowledgeSnippet>,
    pub queries: Mutex<Vec<Vec<String>>>,
}

impl StaticKnowledge {
    pub fn new(snippets: Vec<KnowledgeSnippet>) -> Self {
        Self {
            snippets,
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl KnowledgeBase for StaticKnowledge {
    async fn query(&self, queries: &[String]) -> anyhow::Result<Vec<KnowledgeSnippet>> {
        self.queries.lock().unwrap().push(queries.to_vec());
        Ok(self.snippets.clone())
    }
}

/// Vector index that always returns the same hits and records saves.
#[derive(Default)]
pub struct CannedIndex {
    pub hits: Vec<String>,
    pub saved: Mutex<Vec<(String, Metadata)>>,
}

impl CannedIndex {
    pub fn with_hits(hits: &[&str]) -> Self {
        Self {
            hits: hits.iter().map(|h| h.to_string()).collect(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl VectorIndex for CannedIndex {
    async fn save(&self, value: &str, metadata: &Metadata) -> anyhow::Result<()> {
        self.saved
            .lock()
            .unwrap()
            .push((value.to_string(), metadata.clone()));
        Ok(())
    }

    async fn search(&self, _query: &str, limit: usize, _threshold: f32) -> anyhow::Result<Vec<SearchHit>> {
        Ok(self
            .hits
            .iter()
            .take(limit)
            .map(|content| SearchHit {
                content: content.clone(),
                score: 1.0,
                metadata: Metadata::new(),
            })
            .collect())
    }

    async fn reset(&self) -> anyhow::Result<()> {
        self.saved.lock().unwrap().clear();
        Ok(())
    }
}

pub fn tool_result(result: &str, result_as_answer: bool) -> ToolResult {
    ToolResult::new("tool", result, result_as_answer)
}

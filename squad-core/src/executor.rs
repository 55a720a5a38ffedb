//! Mission executor contract: the language-model side of the execution loop.
//!
//! The executor receives the fully assembled prompt and tool rendering, runs the
//! model (possibly calling tools and retrying internally), and returns the textual
//! answer together with the tool results it produced.

use std::sync::Arc;

use async_trait::async_trait;

use crate::types::ToolResult;

/// Request-rate gate shared with the executor; `check_or_wait` is called before each
/// model request and may suspend until the rate window allows another one.
#[async_trait]
pub trait RequestLimiter: Send + Sync {
    async fn check_or_wait(&self);
}

/// Everything the executor needs for one invocation.
#[derive(Clone)]
pub struct ExecutorInput {
    pub input: String,
    /// Tool names joined with `", "`.
    pub tool_names: String,
    /// Tool descriptions joined with `"\n"`.
    pub tools: String,
    pub ask_for_human_input: bool,
    pub rpm_limiter: Option<Arc<dyn RequestLimiter>>,
}

impl std::fmt::Debug for ExecutorInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutorInput")
            .field("input_len", &self.input.len())
            .field("tool_names", &self.tool_names)
            .field("ask_for_human_input", &self.ask_for_human_input)
            .field("rpm_limited", &self.rpm_limiter.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutorOutput {
    pub output: String,
    pub tool_results: Vec<ToolResult>,
}

impl ExecutorOutput {
    pub fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            tool_results: Vec::new(),
        }
    }
}

/// Language-model executor. Any error is an invocation fault and is subject to the
/// caller's retry budget.
#[async_trait]
pub trait MissionExecutor: Send + Sync {
    async fn invoke(&self, input: ExecutorInput) -> anyhow::Result<ExecutorOutput>;
}

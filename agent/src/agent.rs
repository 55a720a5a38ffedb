//! # Agent
//!
//! An agent executes missions against a language-model executor.
//!
//! ## Mission execution
//!
//! Each attempt rebuilds the full prompt:
//!
//! 1. mission prompt, wrapped with `context` when given
//! 2. contextual memory (squad memory only; skipped when empty)
//! 3. knowledge snippets with a non-empty context (squad knowledge only)
//! 4. training feedback (training mode) or trained suggestions (normal mode)
//!
//! and invokes the executor. An invocation fault is retried until the
//! [`RetryScope`] budget is exhausted, then returned unchanged. Faults while building
//! the prompt (knowledge base, unparseable training files) are not retried.
//!
//! After a successful invocation, the last tool result flagged `result_as_answer`
//! replaces the model's answer. The RPM counter is stopped when the mission ends,
//! successful or not.
//!
//! ## External Interactions
//!
//! - **MissionExecutor**: one call per attempt
//! - **SquadMemory**: recall before each attempt, [`Agent::remember`] after a mission
//! - **KnowledgeBase**: queried with the mission prompt
//! - **Training files**: read in full on every attempt

use std::sync::Arc;

use memory_core::{LongTermMemoryItem, MemoryItem, Metadata};
use serde_json::{json, Value};
use squad_core::{
    ExecutorInput, Mission, MissionExecutor, RequestLimiter, SquadError, Tool, ToolResult,
};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::evaluation::MissionEvaluation;
use crate::retry::RetryScope;
use crate::rpm::RpmController;
use crate::settings::{SquadSettings, DEFAULT_MAX_RETRY_LIMIT};
use crate::squad::Squad;
use training::TrainingFeedbackInjector;

pub struct Agent {
    id: Uuid,
    role: String,
    goal: String,
    backstory: String,
    executor: Arc<dyn MissionExecutor>,
    tools: Vec<Arc<dyn Tool>>,
    squad: Option<Arc<Squad>>,
    training: TrainingFeedbackInjector,
    max_retry_limit: u32,
    retry_scope: RetryScope,
    rpm_controller: Option<Arc<RpmController>>,
    times_executed: u32,
    tools_results: Vec<ToolResult>,
}

impl Agent {
    pub fn builder(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> AgentBuilder {
        AgentBuilder::new(role, goal, backstory)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn backstory(&self) -> &str {
        &self.backstory
    }

    pub fn max_retry_limit(&self) -> u32 {
        self.max_retry_limit
    }

    pub fn retry_scope(&self) -> RetryScope {
        self.retry_scope
    }

    /// Invocation failures recorded over this agent's lifetime.
    pub fn times_executed(&self) -> u32 {
        self.times_executed
    }

    /// Tool results reported by the executor for the current (or last) mission.
    pub fn tools_results(&self) -> &[ToolResult] {
        &self.tools_results
    }

    pub fn rpm_controller(&self) -> Option<&Arc<RpmController>> {
        self.rpm_controller.as_ref()
    }

    // ---------- Mission execution ----------

    /// Executes `mission`, optionally with the output of earlier missions as
    /// `context` and a mission-specific tool set (empty or `None` → the agent's tools).
    ///
    /// Returns the final answer, or the executor's last error once the retry budget
    /// is exhausted.
    #[instrument(
        skip(self, mission, context, tools),
        fields(agent = %self.role, mission_id = %mission.id)
    )]
    pub async fn execute_mission(
        &mut self,
        mission: &Mission,
        context: Option<&str>,
        tools: Option<&[Arc<dyn Tool>]>,
    ) -> anyhow::Result<String> {
        info!("step: execute_mission start");
        self.tools_results.clear();

        let tools: Vec<Arc<dyn Tool>> = match tools {
            Some(tools) if !tools.is_empty() => tools.to_vec(),
            _ => self.tools.clone(),
        };

        let outcome = self.run_attempts(mission, context, &tools).await;

        if let Some(rpm) = &self.rpm_controller {
            rpm.stop_rpm_counter().await;
        }

        let answer = outcome?;
        let answer = self.apply_tool_override(answer);
        info!(answer_len = answer.len(), "step: execute_mission done");
        Ok(answer)
    }

    async fn run_attempts(
        &mut self,
        mission: &Mission,
        context: Option<&str>,
        tools: &[Arc<dyn Tool>],
    ) -> anyhow::Result<String> {
        let tool_names = render_tool_names(tools);
        let tool_descriptions = render_tool_descriptions(tools);
        let mut mission_failures: u32 = 0;

        loop {
            let input = self.build_prompt(mission, context).await?;
            let request = ExecutorInput {
                input,
                tool_names: tool_names.clone(),
                tools: tool_descriptions.clone(),
                ask_for_human_input: mission.human_input,
                rpm_limiter: self
                    .rpm_controller
                    .clone()
                    .map(|rpm| rpm as Arc<dyn RequestLimiter>),
            };

            match self.executor.invoke(request).await {
                Ok(output) => {
                    debug!(
                        tool_results = output.tool_results.len(),
                        "Executor returned"
                    );
                    self.tools_results.extend(output.tool_results);
                    return Ok(output.output);
                }
                Err(e) => {
                    self.times_executed += 1;
                    mission_failures += 1;
                    if self.retry_scope.exhausted(
                        self.max_retry_limit,
                        self.times_executed,
                        mission_failures,
                    ) {
                        error!(
                            error = %e,
                            times_executed = self.times_executed,
                            max_retry_limit = self.max_retry_limit,
                            "Mission failed, retry limit exceeded"
                        );
                        return Err(e);
                    }
                    warn!(
                        error = %e,
                        attempt = mission_failures,
                        times_executed = self.times_executed,
                        max_retry_limit = self.max_retry_limit,
                        retry_scope = %self.retry_scope,
                        "Mission attempt failed, retrying"
                    );
                }
            }
        }
    }

    /// Assembles the full prompt for one attempt.
    async fn build_prompt(&self, mission: &Mission, context: Option<&str>) -> anyhow::Result<String> {
        let mut mission_prompt = mission.prompt();
        if let Some(context) = context.filter(|c| !c.is_empty()) {
            mission_prompt = prompt::with_context(&mission_prompt, context);
        }

        if let Some(squad) = &self.squad {
            if let Some(memory) = &squad.memory {
                let block = memory
                    .contextual()
                    .build_context_for_mission(&mission.description, context)
                    .await;
                mission_prompt = prompt::with_memory(mission_prompt, &block);
            }

            if let Some(knowledge) = &squad.knowledge {
                let snippets = knowledge.query(&[mission.prompt()]).await?;
                let valid: Vec<String> = snippets
                    .into_iter()
                    .filter_map(|s| s.context)
                    .filter(|c| !c.is_empty())
                    .collect();
                debug!(snippets = valid.len(), "Knowledge snippets attached");
                mission_prompt = prompt::with_knowledge(mission_prompt, valid);
            }
        }

        let training = self
            .squad
            .as_ref()
            .map(|squad| &squad.training)
            .unwrap_or(&self.training);
        let mission_prompt = if self.in_training() {
            training
                .inject_training(mission_prompt, &self.id.to_string())
                .await?
        } else {
            training.inject_trained_data(mission_prompt, &self.role).await?
        };
        Ok(mission_prompt)
    }

    fn in_training(&self) -> bool {
        self.squad.as_ref().is_some_and(|squad| squad.train)
    }

    /// The last tool result flagged `result_as_answer` wins over the model's answer.
    fn apply_tool_override(&self, answer: String) -> String {
        match self.tools_results.iter().rev().find(|r| r.result_as_answer) {
            Some(result) => {
                info!(tool = %result.tool_name, "Tool result used as final answer");
                result.result.clone()
            }
            None => answer,
        }
    }

    // ---------- Memory ----------

    /// Stores a finished mission in squad memory: the output in short-term memory,
    /// the evaluation (if any) in long-term memory, and every evaluated entity.
    /// Memory faults are logged and never fail the caller.
    pub async fn remember(
        &self,
        mission: &Mission,
        output: &str,
        evaluation: Option<&MissionEvaluation>,
    ) {
        let Some(memory) = self.squad.as_ref().and_then(|squad| squad.memory.as_ref()) else {
            return;
        };

        let mut metadata = Metadata::new();
        metadata.insert(
            "observation".to_string(),
            Value::String(mission.description.clone()),
        );
        let item = MemoryItem::new(output, metadata, Some(self.role.clone()));
        if let Err(e) = memory.short_term.save_item(&item).await {
            warn!(error = %e, "Failed to add to short term memory");
        }

        let Some(evaluation) = evaluation else {
            return;
        };

        let mut metadata = Metadata::new();
        metadata.insert("suggestions".to_string(), json!(evaluation.suggestions));
        let item = LongTermMemoryItem::new(
            self.role.clone(),
            mission.description.clone(),
            mission.expected_output.clone(),
            evaluation.quality,
            metadata,
        );
        if let Err(e) = memory.long_term.save_item(&item).await {
            warn!(error = %e, "Failed to add to long term memory");
        }

        for entity in &evaluation.entities {
            if let Err(e) = memory.entity.save_entity(entity, Some(&self.role)).await {
                warn!(entity = %entity.name, error = %e, "Failed to add to entity memory");
            }
        }
    }
}

/// Tool names joined with `", "`.
pub fn render_tool_names(tools: &[Arc<dyn Tool>]) -> String {
    tools
        .iter()
        .map(|tool| tool.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One `Tool name / Tool description` block per tool, joined with `"\n"`.
pub fn render_tool_descriptions(tools: &[Arc<dyn Tool>]) -> String {
    tools
        .iter()
        .map(|tool| {
            format!(
                "Tool name: {}\nTool description:\n{}",
                tool.name(),
                tool.description()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builder for [`Agent`]. `max_retry_limit` defaults to 2 and the retry scope to the
/// agent's lifetime.
pub struct AgentBuilder {
    role: String,
    goal: String,
    backstory: String,
    executor: Option<Arc<dyn MissionExecutor>>,
    tools: Vec<Arc<dyn Tool>>,
    squad: Option<Arc<Squad>>,
    training: TrainingFeedbackInjector,
    max_retry_limit: u32,
    retry_scope: RetryScope,
    max_rpm: Option<u32>,
}

impl AgentBuilder {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
            executor: None,
            tools: Vec::new(),
            squad: None,
            training: TrainingFeedbackInjector::default(),
            max_retry_limit: DEFAULT_MAX_RETRY_LIMIT,
            retry_scope: RetryScope::default(),
            max_rpm: None,
        }
    }

    pub fn executor(mut self, executor: Arc<dyn MissionExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn tools(mut self, tools: Vec<Arc<dyn Tool>>) -> Self {
        self.tools = tools;
        self
    }

    pub fn squad(mut self, squad: Arc<Squad>) -> Self {
        self.squad = Some(squad);
        self
    }

    /// Training files used when the agent has no squad.
    pub fn training(mut self, training: TrainingFeedbackInjector) -> Self {
        self.training = training;
        self
    }

    pub fn max_retry_limit(mut self, max_retry_limit: u32) -> Self {
        self.max_retry_limit = max_retry_limit;
        self
    }

    pub fn retry_scope(mut self, retry_scope: RetryScope) -> Self {
        self.retry_scope = retry_scope;
        self
    }

    pub fn max_rpm(mut self, max_rpm: u32) -> Self {
        self.max_rpm = Some(max_rpm);
        self
    }

    /// Applies retry, RPM and training-file settings.
    pub fn settings(mut self, settings: &SquadSettings) -> Self {
        self.max_retry_limit = settings.max_retry_limit;
        self.retry_scope = settings.retry_scope;
        self.max_rpm = settings.max_rpm;
        self.training = TrainingFeedbackInjector::new(
            &settings.training_data_file,
            &settings.trained_agents_data_file,
        );
        self
    }

    pub fn build(self) -> squad_core::Result<Agent> {
        let executor = self
            .executor
            .ok_or_else(|| SquadError::Config(format!("agent '{}' has no executor", self.role)))?;
        let rpm_controller = self
            .max_rpm
            .filter(|rpm| *rpm > 0)
            .map(|rpm| Arc::new(RpmController::new(rpm)));

        Ok(Agent {
            id: Uuid::new_v4(),
            role: self.role,
            goal: self.goal,
            backstory: self.backstory,
            executor,
            tools: self.tools,
            squad: self.squad,
            training: self.training,
            max_retry_limit: self.max_retry_limit,
            retry_scope: self.retry_scope,
            rpm_controller,
            times_executed: 0,
            tools_results: Vec::new(),
        })
    }
}

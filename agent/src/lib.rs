//! # agent
//!
//! Agents and the mission execution loop: [`Agent`] / [`AgentBuilder`], the [`Squad`]
//! they belong to, the retry budget ([`RetryScope`]), the requests-per-minute
//! controller ([`RpmController`]), mission evaluations for [`Agent::remember`], and
//! settings from the environment.

pub mod agent;
pub mod evaluation;
pub mod retry;
pub mod rpm;
pub mod settings;
pub mod squad;

pub use agent::{render_tool_descriptions, render_tool_names, Agent, AgentBuilder};
pub use evaluation::MissionEvaluation;
pub use retry::RetryScope;
pub use rpm::RpmController;
pub use settings::{load_settings, SquadSettings, DEFAULT_MAX_RETRY_LIMIT};
pub use squad::Squad;

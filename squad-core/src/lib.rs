//! # squad-core
//!
//! Core types and collaborator contracts for mission execution: [`Mission`], [`Tool`],
//! [`ToolResult`], [`KnowledgeBase`], [`MissionExecutor`] and its input/output, the
//! [`RequestLimiter`] handed to executors, [`SquadError`], and tracing initialization.
//! Backend-agnostic; used by the memory, training and agent crates.

pub mod error;
pub mod executor;
pub mod logger;
pub mod types;

pub use error::{Result, SquadError};
pub use executor::{ExecutorInput, ExecutorOutput, MissionExecutor, RequestLimiter};
pub use logger::init_tracing;
pub use types::{KnowledgeBase, KnowledgeSnippet, Mission, Tool, ToolResult};

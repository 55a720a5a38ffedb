//! # Memory Crate
//!
//! Mission memory for a squad: the four stores and the assembler that turns them
//! into a prompt section.
//!
//! ## Modules
//!
//! - [`short_term`] - recent insights, similarity search
//! - [`entity`] - entity facts, similarity search
//! - [`user`] - user preferences (provider dependent)
//! - [`long_term`] - mission outcomes in SQLite, exact-key recall
//! - [`contextual`] - concurrent recall and section assembly
//! - [`squad_memory`] - the bundle of stores plus reset-all
//! - [`config`] - provider, storage path and recall policy from the environment
//!
//! ## External Interactions
//!
//! - **Embedding index**: short-term, entity and user memory delegate to a
//!   [`memory_core::VectorIndex`] supplied by the caller
//! - **SQLite**: long-term memory via `memory-sqlite`, one connection per operation
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use memory::{EnvMemoryConfig, SquadMemory};
//! use memory_core::VectorIndex;
//!
//! # async fn example(stm: Arc<dyn VectorIndex>, entities: Arc<dyn VectorIndex>) -> anyhow::Result<()> {
//! let config = EnvMemoryConfig::from_env()?;
//! let memory = SquadMemory::from_config(&config, stm, entities, None).await;
//! let block = memory
//!     .contextual()
//!     .build_context_for_mission("Summarize the quarterly report", None)
//!     .await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod contextual;
pub mod entity;
pub mod long_term;
pub mod short_term;
pub mod squad_memory;
pub mod user;

mod rag;

pub use config::{EnvMemoryConfig, MemoryConfig, RecallPolicy, DEFAULT_LTM_DB_PATH};
pub use contextual::ContextualMemory;
pub use entity::EntityMemory;
pub use long_term::{LongTermMemory, LongTermRecall};
pub use short_term::ShortTermMemory;
pub use squad_memory::SquadMemory;
pub use user::UserMemory;

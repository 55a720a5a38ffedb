//! Memory configuration: trait and env-based implementation.

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use memory_core::MemoryProvider;
use squad_core::{Result, SquadError};

pub const DEFAULT_LTM_DB_PATH: &str = "./data/long_term_memory_storage.db";

/// Per-source volume and relevance limits applied when assembling contextual memory.
#[derive(Debug, Clone, PartialEq)]
pub struct RecallPolicy {
    pub short_term_limit: usize,
    pub entity_limit: usize,
    pub user_limit: usize,
    /// Minimum similarity for short-term, entity and user hits.
    pub score_threshold: f32,
    /// How many long-term records to load for the exact mission.
    pub long_term_latest_n: usize,
}

impl Default for RecallPolicy {
    fn default() -> Self {
        Self {
            short_term_limit: 3,
            entity_limit: 3,
            user_limit: 3,
            score_threshold: 0.35,
            long_term_latest_n: 2,
        }
    }
}

/// Memory provider, storage location and recall configuration interface.
pub trait MemoryConfig: Send + Sync {
    fn provider(&self) -> MemoryProvider;
    fn ltm_db_path(&self) -> &Path;
    fn recall_policy(&self) -> RecallPolicy;
}

/// Memory config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvMemoryConfig {
    pub memory_provider: MemoryProvider,
    pub ltm_db_path: PathBuf,
    pub recall: RecallPolicy,
}

impl MemoryConfig for EnvMemoryConfig {
    fn provider(&self) -> MemoryProvider {
        self.memory_provider
    }
    fn ltm_db_path(&self) -> &Path {
        &self.ltm_db_path
    }
    fn recall_policy(&self) -> RecallPolicy {
        self.recall.clone()
    }
}

impl EnvMemoryConfig {
    /// Load from environment variables. Set-but-invalid values are config errors.
    pub fn from_env() -> Result<Self> {
        let memory_provider = match env::var("MEMORY_PROVIDER") {
            Ok(raw) => raw
                .parse::<MemoryProvider>()
                .map_err(|_| SquadError::invalid_env("MEMORY_PROVIDER", &raw, "local or mem0"))?,
            Err(_) => MemoryProvider::default(),
        };
        let ltm_db_path = env::var("LTM_DB_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LTM_DB_PATH.to_string())
            .into();

        let defaults = RecallPolicy::default();
        let recall = RecallPolicy {
            short_term_limit: env_or("MEMORY_SHORT_TERM_LIMIT", defaults.short_term_limit, "a non-negative integer")?,
            entity_limit: env_or("MEMORY_ENTITY_LIMIT", defaults.entity_limit, "a non-negative integer")?,
            user_limit: env_or("MEMORY_USER_LIMIT", defaults.user_limit, "a non-negative integer")?,
            score_threshold: env_or("MEMORY_SCORE_THRESHOLD", defaults.score_threshold, "a number")?,
            long_term_latest_n: env_or("MEMORY_LONG_TERM_LATEST_N", defaults.long_term_latest_n, "a non-negative integer")?,
        };

        Ok(Self {
            memory_provider,
            ltm_db_path,
            recall,
        })
    }
}

/// Parses `key` when set and non-blank; `default` otherwise.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T, expected: &str) -> Result<T> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| SquadError::invalid_env(key, &raw, expected)),
        _ => Ok(default),
    }
}

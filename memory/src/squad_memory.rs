//! The memory stores shared by one squad, and the maintenance operations over them.

use std::sync::Arc;

use memory_core::{MemoryError, MemoryStore, VectorIndex};
use tracing::info;

use crate::config::{MemoryConfig, RecallPolicy};
use crate::contextual::ContextualMemory;
use crate::entity::EntityMemory;
use crate::long_term::LongTermMemory;
use crate::short_term::ShortTermMemory;
use crate::user::UserMemory;

/// Short-term, long-term, entity and (optionally) user memory for a squad.
#[derive(Clone)]
pub struct SquadMemory {
    pub short_term: Arc<ShortTermMemory>,
    pub long_term: Arc<LongTermMemory>,
    pub entity: Arc<EntityMemory>,
    pub user: Option<Arc<UserMemory>>,
    policy: RecallPolicy,
}

impl SquadMemory {
    pub fn new(short_term: ShortTermMemory, long_term: LongTermMemory, entity: EntityMemory) -> Self {
        Self {
            short_term: Arc::new(short_term),
            long_term: Arc::new(long_term),
            entity: Arc::new(entity),
            user: None,
            policy: RecallPolicy::default(),
        }
    }

    pub fn with_user(mut self, user: UserMemory) -> Self {
        self.user = Some(Arc::new(user));
        self
    }

    pub fn with_policy(mut self, policy: RecallPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds all stores from configuration. The embedding indexes come from the
    /// caller; the long-term log is opened at the configured path. `user_index` is
    /// only used when the provider supports user memory.
    pub async fn from_config(
        config: &dyn MemoryConfig,
        short_term_index: Arc<dyn VectorIndex>,
        entity_index: Arc<dyn VectorIndex>,
        user_index: Option<Arc<dyn VectorIndex>>,
    ) -> Self {
        let provider = config.provider();
        let long_term = LongTermMemory::open(config.ltm_db_path()).await;
        let mut memory = Self::new(
            ShortTermMemory::new(short_term_index, provider),
            long_term,
            EntityMemory::new(entity_index, provider),
        )
        .with_policy(config.recall_policy());

        if provider.supports_user_memory() {
            if let Some(index) = user_index {
                memory = memory.with_user(UserMemory::new(index, provider));
            }
        }
        info!(
            provider = %provider,
            ltm_db_path = %config.ltm_db_path().display(),
            user_memory = memory.user.is_some(),
            "Squad memory configured"
        );
        memory
    }

    pub fn policy(&self) -> &RecallPolicy {
        &self.policy
    }

    /// Assembler over these stores, using this squad's recall policy.
    pub fn contextual(&self) -> ContextualMemory {
        let mut contextual = ContextualMemory::new(
            self.short_term.clone(),
            self.long_term.clone(),
            self.entity.clone(),
        )
        .with_policy(self.policy.clone());
        if let Some(user) = &self.user {
            contextual = contextual.with_user(user.clone());
        }
        contextual
    }

    /// Resets every store, stopping at the first failure.
    pub async fn reset_all(&self) -> Result<(), MemoryError> {
        self.short_term.reset().await?;
        self.long_term.reset().await?;
        self.entity.reset().await?;
        if let Some(user) = &self.user {
            user.reset().await?;
        }
        info!("All squad memories reset");
        Ok(())
    }
}

//! # Contextual Memory
//!
//! Assembles the memory block appended to a mission prompt.
//!
//! ## Sources
//!
//! | Order | Source | Query | Section |
//! |-------|--------|-------|---------|
//! | 1 | short-term | description + context | `Recent Insights:` |
//! | 2 | long-term | exact description | `Historical Data:` |
//! | 3 | entity | description | `Entities:` |
//! | 4 | user (optional) | description + context | `User memories/preferences:` |
//!
//! The four fetches run concurrently; sections are always concatenated in the order
//! above regardless of which finishes first. An unavailable source contributes no
//! section. When every source is empty the result is the empty string.

use std::sync::Arc;

use memory_core::{Lookup, LongTermRecord, MemoryStore, SearchHit};
use tracing::{debug, instrument};

use crate::config::RecallPolicy;
use crate::long_term::LongTermRecall;

#[derive(Clone)]
pub struct ContextualMemory {
    short_term: Arc<dyn MemoryStore>,
    long_term: Arc<dyn LongTermRecall>,
    entity: Arc<dyn MemoryStore>,
    user: Option<Arc<dyn MemoryStore>>,
    policy: RecallPolicy,
}

impl ContextualMemory {
    pub fn new(
        short_term: Arc<dyn MemoryStore>,
        long_term: Arc<dyn LongTermRecall>,
        entity: Arc<dyn MemoryStore>,
    ) -> Self {
        Self {
            short_term,
            long_term,
            entity,
            user: None,
            policy: RecallPolicy::default(),
        }
    }

    pub fn with_user(mut self, user: Arc<dyn MemoryStore>) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_policy(mut self, policy: RecallPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &RecallPolicy {
        &self.policy
    }

    /// Builds the memory block for a mission. Empty when nothing relevant is found.
    #[instrument(skip(self, context), fields(has_context = context.is_some()))]
    pub async fn build_context_for_mission(
        &self,
        mission_description: &str,
        context: Option<&str>,
    ) -> String {
        let query = format!("{} {}", mission_description, context.unwrap_or_default());
        let query = query.trim();
        if query.is_empty() {
            return String::new();
        }

        let (short_term, long_term, entity, user) = tokio::join!(
            self.fetch_short_term(query),
            self.fetch_long_term(mission_description),
            self.fetch_entity(mission_description),
            self.fetch_user(query),
        );

        let memory = prompt::join_sections([short_term, long_term, entity, user]);
        debug!(memory_len = memory.len(), "Contextual memory assembled");
        memory
    }

    async fn fetch_short_term(&self, query: &str) -> Option<String> {
        let hits = self
            .short_term
            .search(query, self.policy.short_term_limit, self.policy.score_threshold)
            .await;
        hit_section(prompt::SECTION_SHORT_TERM, hits)
    }

    async fn fetch_long_term(&self, mission_description: &str) -> Option<String> {
        if mission_description.trim().is_empty() {
            return None;
        }
        let records = self
            .long_term
            .recall(mission_description, self.policy.long_term_latest_n)
            .await
            .non_empty()?;
        prompt::format_section(prompt::SECTION_LONG_TERM, suggestion_lines(&records))
    }

    async fn fetch_entity(&self, mission_description: &str) -> Option<String> {
        if mission_description.trim().is_empty() {
            return None;
        }
        let hits = self
            .entity
            .search(mission_description, self.policy.entity_limit, self.policy.score_threshold)
            .await;
        hit_section(prompt::SECTION_ENTITY, hits)
    }

    async fn fetch_user(&self, query: &str) -> Option<String> {
        let user = self.user.as_ref()?;
        let hits = user
            .search(query, self.policy.user_limit, self.policy.score_threshold)
            .await;
        hit_section(prompt::SECTION_USER, hits)
    }
}

fn hit_section(title: &str, hits: Lookup<Vec<SearchHit>>) -> Option<String> {
    let hits = hits.non_empty()?;
    prompt::format_section(title, hits.iter().map(|hit| hit.content.as_str()))
}

/// Suggestions across records, de-duplicated, first occurrence wins.
fn suggestion_lines(records: &[LongTermRecord]) -> Vec<&str> {
    let mut lines: Vec<&str> = Vec::new();
    for suggestion in records.iter().flat_map(|r| r.suggestions()) {
        if !lines.contains(&suggestion) {
            lines.push(suggestion);
        }
    }
    lines
}

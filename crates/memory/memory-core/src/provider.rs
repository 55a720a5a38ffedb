//! # Memory Providers
//!
//! Some backing providers run their own semantic extraction and work better with
//! narrative text than with terse `name(type): description` lines. Each provider
//! selects a [`MemoryFormatter`]; stores format items through it and never branch on
//! the provider themselves.

use std::fmt;
use std::str::FromStr;

use crate::types::EntityMemoryItem;

/// Formats values before they are written to a memory store.
pub trait MemoryFormatter: Send + Sync {
    fn short_term(&self, value: &str) -> String;
    fn entity(&self, item: &EntityMemoryItem) -> String;
    fn user(&self, value: &str) -> String;
}

/// Terse formatting for the local embedding index.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl MemoryFormatter for PlainFormatter {
    fn short_term(&self, value: &str) -> String {
        value.to_string()
    }

    fn entity(&self, item: &EntityMemoryItem) -> String {
        format!("{}({}): {}", item.name, item.entity_type, item.description)
    }

    fn user(&self, value: &str) -> String {
        value.to_string()
    }
}

/// Natural-language instructions for extraction-based providers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NarrativeFormatter;

impl MemoryFormatter for NarrativeFormatter {
    fn short_term(&self, value: &str) -> String {
        format!("Remember the following insights from Agent run: {value}")
    }

    fn entity(&self, item: &EntityMemoryItem) -> String {
        format!(
            "Remember details about the following entity:\nName: {}\nType: {}\nEntity Description: {}",
            item.name, item.entity_type, item.description
        )
    }

    fn user(&self, value: &str) -> String {
        format!("Remember the details about the user: {value}")
    }
}

static PLAIN: PlainFormatter = PlainFormatter;
static NARRATIVE: NarrativeFormatter = NarrativeFormatter;

/// Backing provider configured for a squad's memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryProvider {
    /// Local embedding index (default).
    #[default]
    Local,
    /// mem0, which extracts facts from narrative text itself.
    Mem0,
}

impl MemoryProvider {
    pub fn formatter(&self) -> &'static dyn MemoryFormatter {
        match self {
            MemoryProvider::Local => &PLAIN,
            MemoryProvider::Mem0 => &NARRATIVE,
        }
    }

    /// Whether user memory is backed by this provider.
    pub fn supports_user_memory(&self) -> bool {
        matches!(self, MemoryProvider::Mem0)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryProvider::Local => "local",
            MemoryProvider::Mem0 => "mem0",
        }
    }
}

impl fmt::Display for MemoryProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown provider name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown memory provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for MemoryProvider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "local" | "rag" => Ok(MemoryProvider::Local),
            "mem0" => Ok(MemoryProvider::Mem0),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_entity_format() {
        let item = EntityMemoryItem::new("Acme", "Org", "A widget maker");
        assert_eq!(
            MemoryProvider::Local.formatter().entity(&item),
            "Acme(Org): A widget maker"
        );
    }

    #[test]
    fn narrative_entity_format() {
        let item = EntityMemoryItem::new("Acme", "Org", "A widget maker");
        let out = MemoryProvider::Mem0.formatter().entity(&item);
        assert!(out.starts_with("Remember details about the following entity:"));
        assert!(out.contains("Name: Acme"));
        assert!(out.contains("Type: Org"));
        assert!(out.contains("Entity Description: A widget maker"));
    }

    #[test]
    fn short_term_wrapping_only_for_mem0() {
        assert_eq!(MemoryProvider::Local.formatter().short_term("x"), "x");
        assert_eq!(
            MemoryProvider::Mem0.formatter().short_term("x"),
            "Remember the following insights from Agent run: x"
        );
    }

    #[test]
    fn parse_provider() {
        assert_eq!("mem0".parse::<MemoryProvider>(), Ok(MemoryProvider::Mem0));
        assert_eq!("".parse::<MemoryProvider>(), Ok(MemoryProvider::Local));
        assert_eq!(" Local ".parse::<MemoryProvider>(), Ok(MemoryProvider::Local));
        assert!("redis".parse::<MemoryProvider>().is_err());
    }
}

//! # Memory Core
//!
//! Core types and traits for mission memory.
//! Used by the `memory` crate and by every storage backend crate.
//!
//! ## Modules
//!
//! - [`types`] - MemoryItem, EntityMemoryItem, LongTermMemoryItem, LongTermRecord, SearchHit
//! - [`store`] - MemoryStore contract and the VectorIndex backend contract
//! - [`lookup`] - Lookup result type (Available / Unavailable)
//! - [`error`] - MemoryError, MemoryKind
//! - [`provider`] - MemoryProvider and its formatter strategies

pub mod error;
pub mod lookup;
pub mod provider;
pub mod store;
pub mod types;

pub use error::*;
pub use lookup::*;
pub use provider::*;
pub use store::*;
pub use types::*;

//! # Training
//!
//! Human feedback collected during training runs, and the suggestions distilled from
//! it, both kept in JSON files and injected into mission prompts.
//!
//! ## Files
//!
//! | File | Shape | Written by | Read by |
//! |------|-------|------------|---------|
//! | training data | `agent_id -> {iteration -> {human_feedback, ...}}` | training handler | [`TrainingFeedbackInjector::inject_training`] |
//! | trained data | `role -> {suggestions: [..], ...}` | training handler | [`TrainingFeedbackInjector::inject_trained_data`] |
//!
//! Both files are read in full on every access; nothing is cached.

pub mod error;
pub mod file;
pub mod injector;
pub mod types;

pub use error::TrainingError;
pub use file::TrainingFile;
pub use injector::TrainingFeedbackInjector;
pub use types::{TrainedAgentRecord, TrainedData, TrainingData, TrainingRecord};

pub const DEFAULT_TRAINING_DATA_FILE: &str = "training_data.json";
pub const DEFAULT_TRAINED_AGENTS_DATA_FILE: &str = "trained_agents_data.json";

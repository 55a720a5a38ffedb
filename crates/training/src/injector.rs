//! Injects training feedback or trained suggestions into a mission prompt.

use std::path::Path;

use tracing::debug;

use crate::error::TrainingError;
use crate::file::TrainingFile;
use crate::types::{TrainedData, TrainingData};
use crate::{DEFAULT_TRAINED_AGENTS_DATA_FILE, DEFAULT_TRAINING_DATA_FILE};

#[derive(Debug, Clone)]
pub struct TrainingFeedbackInjector {
    training_data: TrainingFile,
    trained_data: TrainingFile,
}

impl Default for TrainingFeedbackInjector {
    fn default() -> Self {
        Self::new(DEFAULT_TRAINING_DATA_FILE, DEFAULT_TRAINED_AGENTS_DATA_FILE)
    }
}

impl TrainingFeedbackInjector {
    pub fn new(training_data_file: impl AsRef<Path>, trained_data_file: impl AsRef<Path>) -> Self {
        Self {
            training_data: TrainingFile::new(training_data_file),
            trained_data: TrainingFile::new(trained_data_file),
        }
    }

    pub fn training_data_file(&self) -> &TrainingFile {
        &self.training_data
    }

    pub fn trained_data_file(&self) -> &TrainingFile {
        &self.trained_data
    }

    /// Training mode: appends every recorded human feedback for `agent_id`, in
    /// iteration order, as mandatory instructions.
    pub async fn inject_training(
        &self,
        mission_prompt: String,
        agent_id: &str,
    ) -> Result<String, TrainingError> {
        let Some(data) = self.training_data.load::<TrainingData>().await? else {
            return Ok(mission_prompt);
        };
        let Some(sessions) = data.get(agent_id).filter(|s| !s.is_empty()) else {
            return Ok(mission_prompt);
        };
        debug!(agent_id, feedback_count = sessions.len(), "Injecting training feedback");
        Ok(prompt::with_instructions(
            mission_prompt,
            sessions.values().map(|record| record.human_feedback.as_str()),
        ))
    }

    /// Normal mode: appends the suggestions learned for `role` as mandatory
    /// instructions.
    pub async fn inject_trained_data(
        &self,
        mission_prompt: String,
        role: &str,
    ) -> Result<String, TrainingError> {
        let Some(data) = self.trained_data.load::<TrainedData>().await? else {
            return Ok(mission_prompt);
        };
        let Some(record) = data.get(role) else {
            return Ok(mission_prompt);
        };
        debug!(role, suggestion_count = record.suggestions.len(), "Injecting trained suggestions");
        Ok(prompt::with_instructions(mission_prompt, &record.suggestions))
    }
}

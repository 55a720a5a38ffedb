//! JSON file handler shared by the training handler (writes) and the injector (reads).

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::TrainingError;
use crate::types::{TrainedAgentRecord, TrainedData, TrainingData, TrainingRecord};

#[derive(Debug, Clone)]
pub struct TrainingFile {
    path: PathBuf,
}

impl TrainingFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the whole file. Missing or blank file → `Ok(None)`.
    pub async fn load<T: DeserializeOwned>(&self) -> Result<Option<T>, TrainingError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Training file not found");
                return Ok(None);
            }
            Err(source) => {
                return Err(TrainingError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| TrainingError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    /// Overwrites the file with `data` as pretty JSON, creating parent directories.
    pub async fn save<T: Serialize>(&self, data: &T) -> Result<(), TrainingError> {
        let encoded = serde_json::to_string_pretty(data)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(source))?;
        }
        tokio::fs::write(&self.path, encoded)
            .await
            .map_err(|source| self.io_error(source))
    }

    /// Records feedback for `agent_id` at `iteration`, replacing any previous
    /// record for the same iteration.
    pub async fn append_feedback(
        &self,
        agent_id: &str,
        iteration: u64,
        record: TrainingRecord,
    ) -> Result<(), TrainingError> {
        let mut data: TrainingData = self.load().await?.unwrap_or_default();
        data.entry(agent_id.to_string())
            .or_default()
            .insert(iteration, record);
        self.save(&data).await
    }

    /// Stores the suggestions learned for `role`, replacing earlier ones.
    pub async fn save_trained_suggestions(
        &self,
        role: &str,
        suggestions: Vec<String>,
    ) -> Result<(), TrainingError> {
        let mut data: TrainedData = self.load().await?.unwrap_or_default();
        let entry = data.entry(role.to_string()).or_insert_with(TrainedAgentRecord::default);
        entry.suggestions = suggestions;
        self.save(&data).await
    }

    fn io_error(&self, source: std::io::Error) -> TrainingError {
        TrainingError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

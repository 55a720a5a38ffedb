//! The collective an agent belongs to: shared memory, knowledge base and training mode.

use std::sync::Arc;

use memory::SquadMemory;
use squad_core::KnowledgeBase;
use training::TrainingFeedbackInjector;

use crate::settings::SquadSettings;

#[derive(Clone, Default)]
pub struct Squad {
    pub memory: Option<Arc<SquadMemory>>,
    pub knowledge: Option<Arc<dyn KnowledgeBase>>,
    /// Training mode: inject recorded human feedback instead of trained suggestions.
    pub train: bool,
    pub training: TrainingFeedbackInjector,
}

impl Squad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Squad with training mode and training file locations from settings.
    pub fn from_settings(settings: &SquadSettings) -> Self {
        Self {
            train: settings.train,
            training: TrainingFeedbackInjector::new(
                &settings.training_data_file,
                &settings.trained_agents_data_file,
            ),
            ..Self::default()
        }
    }

    pub fn with_memory(mut self, memory: SquadMemory) -> Self {
        self.memory = Some(Arc::new(memory));
        self
    }

    pub fn with_knowledge(mut self, knowledge: Arc<dyn KnowledgeBase>) -> Self {
        self.knowledge = Some(knowledge);
        self
    }

    pub fn with_training(mut self, training: TrainingFeedbackInjector) -> Self {
        self.training = training;
        self
    }

    pub fn training_mode(mut self, train: bool) -> Self {
        self.train = train;
        self
    }
}

use crate::selection::QuestionFilter;
use crate::types::{PracticeAttempt, PracticeSession, QuestionContent, SampleAnswer, SessionConfig};
use async_trait::async_trait;
use uuid::Uuid;

mod memory;

pub use memory::InMemoryStorage;

/// Session and attempt persistence owned by the orchestrator
#[async_trait]
pub trait PracticeStorage: Send + Sync {
    async fn create_session(&self, session: &PracticeSession) -> Result<(), StorageError>;
    async fn get_session(&self, session_id: Uuid) -> Result<Option<PracticeSession>, StorageError>;
    /// Writes score, status, ended_at and config
    async fn update_session(&self, session: &PracticeSession) -> Result<(), StorageError>;

    async fn create_attempt(&self, attempt: &PracticeAttempt) -> Result<(), StorageError>;
    async fn get_attempts(&self, session_id: Uuid) -> Result<Vec<PracticeAttempt>, StorageError>;

    async fn get_sample_answer(
        &self,
        question_id: Uuid,
    ) -> Result<Option<SampleAnswer>, StorageError>;
    async fn upsert_sample_answer(
        &self,
        question_id: Uuid,
        sample: &SampleAnswer,
    ) -> Result<(), StorageError>;
}

/// Read-only view of the question bank
#[async_trait]
pub trait QuestionBank: Send + Sync {
    /// One random question matching the filter exactly, if any
    async fn random_question_matching(
        &self,
        filter: &QuestionFilter,
    ) -> Result<Option<Uuid>, StorageError>;

    async fn get_question_content(
        &self,
        question_id: Uuid,
    ) -> Result<Option<QuestionContent>, StorageError>;

    async fn get_topic_id_by_name(&self, name: &str) -> Result<Option<Uuid>, StorageError>;

    /// Random question for a session context.
    ///
    /// With a level, the widened level set is tried first and the level is
    /// dropped if nothing matches. `None` means nothing is eligible even
    /// without a level.
    async fn get_random_question_id(
        &self,
        topic_id: Option<Uuid>,
        level: Option<&str>,
        language: &str,
        config: &SessionConfig,
    ) -> Result<Option<Uuid>, StorageError> {
        let filter = QuestionFilter::for_session(topic_id, level, language, config);

        if filter.has_level_constraint() {
            if let Some(id) = self.random_question_matching(&filter).await? {
                return Ok(Some(id));
            }
            tracing::debug!(levels = ?filter.levels, "No question at requested level, ignoring level");
        }

        self.random_question_matching(&filter.without_level()).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage operation failed: {0}")]
    OperationFailed(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

use crate::storage::StorageError;
use crate::types::SessionStatus;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum PracticeError {
    #[error("Failed to create session: {source}")]
    SessionCreation { source: Box<PracticeError> },

    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Session {session_id} is not in progress (status: {status})")]
    SessionNotInProgress {
        session_id: Uuid,
        status: SessionStatus,
    },

    #[error("Question not found: {0}")]
    QuestionNotFound(Uuid),

    #[error("Topic not found: {0}")]
    TopicNotFound(String),

    #[error("No eligible question found")]
    NoEligibleQuestion,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl PracticeError {
    pub(crate) fn session_creation(source: PracticeError) -> Self {
        Self::SessionCreation {
            source: Box::new(source),
        }
    }
}

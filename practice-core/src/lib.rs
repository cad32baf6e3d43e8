pub mod error;
pub mod locks;
pub mod orchestrator;
pub mod outcome;
pub mod rounds;
pub mod selection;
pub mod storage;
pub mod types;

pub use error::PracticeError;
pub use orchestrator::{
    sample_answer_placeholder, AnswerOutcome, OrchestratorSettings, PracticeOrchestrator,
    SessionOptions, StartSession, SubmitAnswer, AI_DISABLED_FEEDBACK, AI_UNAVAILABLE_FEEDBACK,
};
pub use outcome::{BestEffort, SecondaryFailure, SecondaryWrite};
pub use rounds::{round_plan, DEFAULT_ROLE};
pub use selection::{QuestionFilter, TopicFilter};
pub use storage::{InMemoryStorage, PracticeStorage, QuestionBank, StorageError};
pub use types::{
    PracticeAttempt, PracticeSession, Question, QuestionContent, RoundAdvance, SampleAnswer,
    SampleSource, SessionConfig, SessionMode, SessionStatus, SuggestedAnswer,
};

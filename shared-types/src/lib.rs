use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod practice;
pub mod typescript_gen;

pub use typescript_gen::generate_typescript_definitions;

pub use practice::{
    AttemptResponse, PracticeConfig, PracticeSessionResponse, QuestionResponse,
    RandomQuestionQuery, RandomQuestionResponse, SessionConfigResponse, SkipRoundResponse,
    StartSessionRequest, StartSessionResponse, SubmitAnswerRequest, SubmitAnswerResponse,
    SuggestAnswerRequest, SuggestAnswerResponse,
};

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

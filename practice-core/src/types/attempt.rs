use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One scored answer inside a session. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeAttempt {
    pub id: Uuid,
    pub session_id: Uuid,
    pub question_id: Uuid,
    pub user_answer: String,
    pub score: i32,
    pub feedback: String,
    /// Response-only, not persisted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    /// Response-only, not persisted
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub improved_answer: String,
    pub created_at: DateTime<Utc>,
}

impl PracticeAttempt {
    pub fn new(session_id: Uuid, question_id: Uuid, user_answer: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            question_id,
            user_answer,
            score: 0,
            feedback: String::new(),
            suggestions: Vec::new(),
            improved_answer: String::new(),
            created_at: Utc::now(),
        }
    }
}

/// Best-effort answer suggestion for a question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedAnswer {
    pub score: i32,
    pub feedback: String,
    pub suggestions: Vec<String>,
    pub improved_answer: String,
}

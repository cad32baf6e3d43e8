use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Client-supplied session configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PracticeConfig {
    /// "interview" enables round progression
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_stacks: Option<Vec<String>>,
    /// Key used by older clients; ignored when `tech_stacks` is present
    #[serde(default, skip_serializing)]
    #[ts(skip)]
    pub stacks: Option<Vec<String>>,
    #[serde(default)]
    pub round_id: Option<String>,
}

impl PracticeConfig {
    pub fn stack_names(&mut self) -> Vec<String> {
        self.tech_stacks
            .take()
            .or_else(|| self.stacks.take())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StartSessionRequest {
    pub user_id: Uuid,
    /// Topic UUID or topic name
    #[serde(default)]
    pub topic_id: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub config: Option<PracticeConfig>,
}

/// Session configuration as stored on the session
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionConfigResponse {
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rounds: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_round_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tech_stacks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PracticeSessionResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub score: i64,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub status: String,
    pub topic_id: Option<Uuid>,
    pub level: Option<String>,
    pub language: String,
    pub config: SessionConfigResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StartSessionResponse {
    pub session: PracticeSessionResponse,
    pub first_question_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmitAnswerRequest {
    pub question_id: Uuid,
    pub content: String,
    #[serde(default)]
    pub language: Option<String>,
    /// Defaults to true when omitted
    #[serde(default)]
    pub ai_enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AttemptResponse {
    pub id: Uuid,
    pub session_id: Uuid,
    pub question_id: Uuid,
    pub user_answer: String,
    pub score: i32,
    pub feedback: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub improved_answer: String,
    pub created_at: DateTime<Utc>,
}

/// `next_question_id` is the nil UUID when the session has no further question
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmitAnswerResponse {
    pub attempt: AttemptResponse,
    pub next_question_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SkipRoundResponse {
    pub next_question_id: Uuid,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RandomQuestionQuery {
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RandomQuestionResponse {
    pub question_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionResponse {
    pub id: Uuid,
    pub content: String,
    pub topic: String,
    pub level: String,
    pub correct_answer: String,
    pub hint: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SuggestAnswerRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SuggestAnswerResponse {
    pub score: i32,
    pub feedback: String,
    pub suggestions: Vec<String>,
    pub improved_answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_practice_config_accepts_legacy_stacks_key() {
        let mut config: PracticeConfig =
            serde_json::from_str(r#"{"mode": "interview", "stacks": ["Go"]}"#).unwrap();
        assert_eq!(config.mode.as_deref(), Some("interview"));
        assert_eq!(config.stack_names(), vec!["Go"]);
    }

    #[test]
    fn test_tech_stacks_wins_over_legacy_key() {
        let mut config: PracticeConfig = serde_json::from_str(
            r#"{"tech_stacks": ["React"], "stacks": ["Go", "PostgreSQL"]}"#,
        )
        .unwrap();
        assert_eq!(config.stack_names(), vec!["React"]);

        let value = serde_json::to_value(&config).unwrap();
        assert!(value.get("stacks").is_none());
    }

    #[test]
    fn test_submit_request_optional_fields() {
        let request: SubmitAnswerRequest = serde_json::from_str(&format!(
            r#"{{"question_id": "{}", "content": "answer"}}"#,
            Uuid::nil()
        ))
        .unwrap();
        assert!(request.ai_enabled.is_none());
        assert!(request.language.is_none());
    }

    #[test]
    fn test_nil_next_question_is_serialized() {
        let response = SkipRoundResponse {
            next_question_id: Uuid::nil(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["next_question_id"], "00000000-0000-0000-0000-000000000000");
    }
}

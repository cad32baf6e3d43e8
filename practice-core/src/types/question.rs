use serde::{Deserialize, Serialize};

/// Question fields needed as scoring context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionContent {
    pub content: String,
    /// Topic name, "General" when the question has no topic
    pub topic: String,
    pub level: String,
    pub correct_answer: String,
    pub hint: String,
}

/// Cached sample answer stored alongside a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleAnswer {
    pub answer: String,
    pub feedback: String,
    pub suggestions: Vec<String>,
    pub source: SampleSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleSource {
    /// Generated by the evaluation service
    Ai,
    /// Entered by hand or imported with the question
    Manual,
}

impl SampleSource {
    pub fn as_str(&self) -> &str {
        match self {
            SampleSource::Ai => "ai",
            SampleSource::Manual => "manual",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "ai" => SampleSource::Ai,
            _ => SampleSource::Manual,
        }
    }
}

/// A question bank row as seen by selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: uuid::Uuid,
    pub topic_id: Option<uuid::Uuid>,
    pub content: String,
    pub level: String,
    pub correct_answer: String,
    pub hint: String,
    pub language: String,
    pub role: String,
    pub published: bool,
}

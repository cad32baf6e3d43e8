use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One candidate's practice or interview run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeSession {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Sum of all attempt scores
    pub score: i64,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub status: SessionStatus,
    pub topic_id: Option<Uuid>,
    pub level: Option<String>,
    pub language: String,
    pub config: SessionConfig,
}

impl PracticeSession {
    pub fn new(
        user_id: Uuid,
        topic_id: Option<Uuid>,
        level: Option<String>,
        language: String,
        config: SessionConfig,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            score: 0,
            started_at: Utc::now(),
            ended_at: None,
            status: SessionStatus::InProgress,
            topic_id,
            level: level.filter(|l| !l.is_empty()),
            language,
            config,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == SessionStatus::InProgress
    }

    pub fn complete(&mut self) {
        self.status = SessionStatus::Completed;
        self.ended_at = Some(Utc::now());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Completed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Completed => "completed",
        }
    }

    /// `None` for anything but the two stored values
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "in_progress" => Some(SessionStatus::InProgress),
            "completed" => Some(SessionStatus::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orchestration state frozen into the session at start.
///
/// Serializes as a flat object, e.g.
/// `{"mode": "interview", "role": "FrontEnd", "rounds": [...], "current_round_index": 0}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(flatten)]
    pub mode: SessionMode,
    /// Stack names used for topic-name filtering when no topic id is set
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tech_stacks: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SessionMode {
    FreePractice {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        role: Option<String>,
    },
    Interview {
        role: String,
        rounds: Vec<String>,
        current_round_index: usize,
    },
}

impl Default for SessionMode {
    fn default() -> Self {
        SessionMode::FreePractice { role: None }
    }
}

/// Result of moving an interview to its next round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundAdvance {
    /// Cursor moved; carries the new round's topic name
    Advanced(String),
    /// The cursor already points at the last round
    Exhausted,
    /// Free practice has no rounds
    NotInterview,
}

impl SessionConfig {
    pub fn role(&self) -> Option<&str> {
        let role = match &self.mode {
            SessionMode::FreePractice { role } => role.as_deref(),
            SessionMode::Interview { role, .. } => Some(role.as_str()),
        };
        role.filter(|r| !r.is_empty())
    }

    pub fn is_interview(&self) -> bool {
        matches!(self.mode, SessionMode::Interview { .. })
    }

    pub fn rounds(&self) -> &[String] {
        match &self.mode {
            SessionMode::Interview { rounds, .. } => rounds,
            SessionMode::FreePractice { .. } => &[],
        }
    }

    pub fn current_round_index(&self) -> Option<usize> {
        match &self.mode {
            SessionMode::Interview {
                current_round_index,
                ..
            } => Some(*current_round_index),
            SessionMode::FreePractice { .. } => None,
        }
    }

    pub fn current_round(&self) -> Option<&str> {
        match &self.mode {
            SessionMode::Interview {
                rounds,
                current_round_index,
                ..
            } => rounds.get(*current_round_index).map(String::as_str),
            SessionMode::FreePractice { .. } => None,
        }
    }

    /// Move the round cursor forward by one. Never moves past the last round.
    pub fn advance_round(&mut self) -> RoundAdvance {
        match &mut self.mode {
            SessionMode::Interview {
                rounds,
                current_round_index,
                ..
            } => {
                if *current_round_index + 1 < rounds.len() {
                    *current_round_index += 1;
                    RoundAdvance::Advanced(rounds[*current_round_index].clone())
                } else {
                    RoundAdvance::Exhausted
                }
            }
            SessionMode::FreePractice { .. } => RoundAdvance::NotInterview,
        }
    }
}

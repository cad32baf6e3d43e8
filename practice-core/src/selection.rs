//! Question selection policy shared by every question bank backend.

use crate::types::SessionConfig;
use uuid::Uuid;

/// Wildcard value for question `role` and `level` columns
pub const ANY: &str = "Any";
pub const DEFAULT_LANGUAGE: &str = "en";
/// Round identifier that also admits DevOps-tagged questions
pub const DEVOPS_ROUND_ID: &str = "devops_round";
const DEVOPS_ROLE: &str = "DevOps";

/// Map a client-side stack label to the topic name used by the bank.
pub fn normalize_stack(raw: &str) -> String {
    match raw {
        "Go" => "Golang",
        "Node.js" => "NodeJS",
        "PostgreSQL" | "MongoDB" | "Redis" => "Data Layer",
        "TypeScript" => "JavaScript",
        other => other,
    }
    .to_string()
}

/// Requested level plus the next level up, if any.
/// Fresher -> Junior -> Mid -> Senior.
pub fn widened_levels(level: &str) -> Vec<String> {
    let next = match level {
        "Fresher" => Some("Junior"),
        "Junior" => Some("Mid"),
        "Mid" => Some("Senior"),
        _ => None,
    };

    let mut levels = vec![level.to_string()];
    levels.extend(next.map(str::to_string));
    levels
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicFilter {
    Id(Uuid),
    /// Normalized topic names derived from the session's tech stacks
    Names(Vec<String>),
    Unrestricted,
}

/// Filter for one random-question lookup.
///
/// Only published questions are eligible. An empty `roles` or `levels`
/// list means no constraint on that column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionFilter {
    pub topic: TopicFilter,
    pub roles: Vec<String>,
    pub language: String,
    pub levels: Vec<String>,
}

impl QuestionFilter {
    pub fn for_session(
        topic_id: Option<Uuid>,
        level: Option<&str>,
        language: &str,
        config: &SessionConfig,
    ) -> Self {
        let topic = match topic_id {
            Some(id) => TopicFilter::Id(id),
            None if !config.tech_stacks.is_empty() => {
                let mut names: Vec<String> = Vec::new();
                for name in config.tech_stacks.iter().map(|s| normalize_stack(s)) {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                }
                TopicFilter::Names(names)
            }
            None => TopicFilter::Unrestricted,
        };

        let roles = match config.role() {
            Some(role) => {
                let mut roles = vec![role.to_string(), ANY.to_string()];
                if config.round_id.as_deref() == Some(DEVOPS_ROUND_ID) {
                    roles.push(DEVOPS_ROLE.to_string());
                }
                roles
            }
            None => Vec::new(),
        };

        let language = if language.is_empty() {
            DEFAULT_LANGUAGE.to_string()
        } else {
            language.to_string()
        };

        let levels = match level {
            Some(l) if !l.is_empty() => widened_levels(l),
            _ => Vec::new(),
        };

        Self {
            topic,
            roles,
            language,
            levels,
        }
    }

    pub fn has_level_constraint(&self) -> bool {
        !self.levels.is_empty()
    }

    /// Same filter with the level constraint dropped
    pub fn without_level(&self) -> Self {
        Self {
            levels: Vec::new(),
            ..self.clone()
        }
    }

    /// Evaluate the filter against a question in memory.
    /// `topic_name` is the name of the question's topic, when it has one.
    pub fn matches(&self, question: &crate::types::Question, topic_name: Option<&str>) -> bool {
        if !question.published {
            return false;
        }

        let topic_ok = match &self.topic {
            TopicFilter::Id(id) => question.topic_id == Some(*id),
            TopicFilter::Names(names) => {
                topic_name.is_some_and(|name| names.iter().any(|n| n == name))
            }
            TopicFilter::Unrestricted => true,
        };

        let role_ok = self.roles.is_empty() || self.roles.iter().any(|r| *r == question.role);

        let level_ok = self.levels.is_empty()
            || question.level == ANY
            || self.levels.iter().any(|l| *l == question.level);

        topic_ok && role_ok && level_ok && question.language == self.language
    }
}

use crate::DbConnection;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use practice_core::selection::{TopicFilter, ANY};
use practice_core::{
    PracticeAttempt, PracticeSession, PracticeStorage, Question, QuestionBank, QuestionContent,
    QuestionFilter, SampleAnswer, SampleSource, SessionConfig, SessionStatus, StorageError,
};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::sync::MutexGuard;
use uuid::Uuid;

/// SQLite backend for sessions, attempts and the question bank
pub struct SqlitePracticeStorage {
    connection: DbConnection,
}

/// Session row before its JSON config is decoded
struct SessionRow {
    id: String,
    user_id: String,
    score: i64,
    started_at: i64,
    ended_at: Option<i64>,
    status: String,
    topic_id: Option<String>,
    level: Option<String>,
    language: String,
    config: String,
}

impl SqlitePracticeStorage {
    pub fn new(connection: DbConnection) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.connection
            .lock()
            .map_err(|e| StorageError::OperationFailed(format!("Lock error: {}", e)))
    }

    pub fn insert_topic(&self, name: &str, description: Option<&str>) -> Result<Uuid, StorageError> {
        let conn = self.lock()?;
        let id = Uuid::new_v4();

        conn.execute(
            "INSERT INTO topics (id, name, description, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![id.to_string(), name, description, Utc::now().timestamp_millis()],
        )
        .map_err(|e| StorageError::OperationFailed(e.to_string()))?;

        Ok(id)
    }

    pub fn insert_question(&self, question: &Question) -> Result<(), StorageError> {
        let conn = self.lock()?;
        let status = if question.published { "published" } else { "draft" };

        conn.execute(
            r#"
            INSERT INTO questions
                (id, topic_id, content, level, correct_answer, hint, language, role, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                question.id.to_string(),
                question.topic_id.map(|id| id.to_string()),
                question.content,
                question.level,
                question.correct_answer,
                question.hint,
                question.language,
                question.role,
                status,
                Utc::now().timestamp_millis(),
            ],
        )
        .map_err(|e| StorageError::OperationFailed(e.to_string()))?;

        Ok(())
    }

    /// Newest questions whose cached sample was not produced by the evaluator
    pub fn questions_missing_ai_sample(&self, limit: usize) -> Result<Vec<Uuid>, StorageError> {
        let conn = self.lock()?;

        let mut stmt = conn
            .prepare(
                r#"
                SELECT id FROM questions
                WHERE COALESCE(sample_source, '') <> 'ai'
                ORDER BY created_at DESC
                LIMIT ?1
                "#,
            )
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?;

        let ids = stmt
            .query_map(params![limit as i64], |row| row.get::<_, String>(0))
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?;

        ids.iter().map(|id| parse_uuid(id)).collect()
    }
}

fn parse_uuid(value: &str) -> Result<Uuid, StorageError> {
    Uuid::parse_str(value)
        .map_err(|e| StorageError::OperationFailed(format!("Invalid UUID '{}': {}", value, e)))
}

fn from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Build the random-question query for a filter. All bound values are text.
fn random_question_query(filter: &QuestionFilter) -> (String, Vec<String>) {
    let mut sql = String::from(
        "SELECT q.id FROM questions q LEFT JOIN topics t ON q.topic_id = t.id \
         WHERE q.status = 'published'",
    );
    let mut args = Vec::new();

    match &filter.topic {
        TopicFilter::Id(id) => {
            sql.push_str(" AND q.topic_id = ?");
            args.push(id.to_string());
        }
        TopicFilter::Names(names) => {
            sql.push_str(&format!(" AND t.name IN ({})", placeholders(names.len())));
            args.extend(names.iter().cloned());
        }
        TopicFilter::Unrestricted => {}
    }

    if !filter.roles.is_empty() {
        sql.push_str(&format!(" AND q.role IN ({})", placeholders(filter.roles.len())));
        args.extend(filter.roles.iter().cloned());
    }

    sql.push_str(" AND q.language = ?");
    args.push(filter.language.clone());

    if filter.has_level_constraint() {
        sql.push_str(&format!(
            " AND (q.level IN ({}) OR q.level = '{}')",
            placeholders(filter.levels.len()),
            ANY
        ));
        args.extend(filter.levels.iter().cloned());
    }

    sql.push_str(" ORDER BY RANDOM() LIMIT 1");
    (sql, args)
}

#[async_trait]
impl PracticeStorage for SqlitePracticeStorage {
    async fn create_session(&self, session: &PracticeSession) -> Result<(), StorageError> {
        let conn = self.lock()?;
        let config_json =
            serde_json::to_string(&session.config).map_err(StorageError::SerializationError)?;

        conn.execute(
            r#"
            INSERT INTO practice_sessions
                (id, user_id, score, started_at, ended_at, status, topic_id, level, language, config)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                session.id.to_string(),
                session.user_id.to_string(),
                session.score,
                session.started_at.timestamp_millis(),
                session.ended_at.map(|t| t.timestamp_millis()),
                session.status.as_str(),
                session.topic_id.map(|id| id.to_string()),
                session.level,
                session.language,
                config_json,
            ],
        )
        .map_err(|e| StorageError::OperationFailed(e.to_string()))?;

        Ok(())
    }

    async fn get_session(&self, session_id: Uuid) -> Result<Option<PracticeSession>, StorageError> {
        let row = {
            let conn = self.lock()?;
            conn.query_row(
                r#"
                SELECT id, user_id, score, started_at, ended_at, status,
                       topic_id, level, language, config
                FROM practice_sessions
                WHERE id = ?1
                "#,
                params![session_id.to_string()],
                |row| {
                    Ok(SessionRow {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        score: row.get(2)?,
                        started_at: row.get(3)?,
                        ended_at: row.get(4)?,
                        status: row.get(5)?,
                        topic_id: row.get(6)?,
                        level: row.get(7)?,
                        language: row.get(8)?,
                        config: row.get(9)?,
                    })
                },
            )
            .optional()
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?
        };

        let Some(row) = row else {
            return Ok(None);
        };

        let config: SessionConfig = serde_json::from_str(&row.config)?;

        Ok(Some(PracticeSession {
            id: parse_uuid(&row.id)?,
            user_id: parse_uuid(&row.user_id)?,
            score: row.score,
            started_at: from_millis(row.started_at),
            ended_at: row.ended_at.map(from_millis),
            status: SessionStatus::parse(&row.status).ok_or_else(|| {
                StorageError::OperationFailed(format!(
                    "Unknown status '{}' for session {}",
                    row.status, row.id
                ))
            })?,
            topic_id: row.topic_id.as_deref().map(parse_uuid).transpose()?,
            level: row.level,
            language: row.language,
            config,
        }))
    }

    async fn update_session(&self, session: &PracticeSession) -> Result<(), StorageError> {
        let conn = self.lock()?;
        let config_json =
            serde_json::to_string(&session.config).map_err(StorageError::SerializationError)?;

        let updated = conn
            .execute(
                r#"
                UPDATE practice_sessions
                SET score = ?1, ended_at = ?2, status = ?3, config = ?4
                WHERE id = ?5
                "#,
                params![
                    session.score,
                    session.ended_at.map(|t| t.timestamp_millis()),
                    session.status.as_str(),
                    config_json,
                    session.id.to_string(),
                ],
            )
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?;

        if updated == 0 {
            return Err(StorageError::NotFound(format!("session {}", session.id)));
        }
        Ok(())
    }

    async fn create_attempt(&self, attempt: &PracticeAttempt) -> Result<(), StorageError> {
        let conn = self.lock()?;

        conn.execute(
            r#"
            INSERT INTO practice_attempts
                (id, session_id, question_id, user_answer, score, feedback, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                attempt.id.to_string(),
                attempt.session_id.to_string(),
                attempt.question_id.to_string(),
                attempt.user_answer,
                attempt.score,
                attempt.feedback,
                attempt.created_at.timestamp_millis(),
            ],
        )
        .map_err(|e| StorageError::OperationFailed(e.to_string()))?;

        Ok(())
    }

    async fn get_attempts(&self, session_id: Uuid) -> Result<Vec<PracticeAttempt>, StorageError> {
        let rows = {
            let conn = self.lock()?;
            let mut stmt = conn
                .prepare(
                    r#"
                    SELECT id, question_id, user_answer, score, feedback, created_at
                    FROM practice_attempts
                    WHERE session_id = ?1
                    ORDER BY created_at ASC
                    "#,
                )
                .map_err(|e| StorageError::OperationFailed(e.to_string()))?;

            let rows = stmt
                .query_map(params![session_id.to_string()], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i32>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, i64>(5)?,
                    ))
                })
                .map_err(|e| StorageError::OperationFailed(e.to_string()))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| StorageError::OperationFailed(e.to_string()))?;
            rows
        };

        rows.into_iter()
            .map(|(id, question_id, user_answer, score, feedback, created_at)| {
                Ok(PracticeAttempt {
                    id: parse_uuid(&id)?,
                    session_id,
                    question_id: parse_uuid(&question_id)?,
                    user_answer,
                    score,
                    feedback,
                    suggestions: Vec::new(),
                    improved_answer: String::new(),
                    created_at: from_millis(created_at),
                })
            })
            .collect()
    }

    async fn get_sample_answer(
        &self,
        question_id: Uuid,
    ) -> Result<Option<SampleAnswer>, StorageError> {
        let row = {
            let conn = self.lock()?;
            conn.query_row(
                r#"
                SELECT sample_answer, sample_feedback, sample_suggestions, sample_source
                FROM questions
                WHERE id = ?1
                "#,
                params![question_id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, Option<String>>(0)?,
                        row.get::<_, Option<String>>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, Option<String>>(3)?,
                    ))
                },
            )
            .optional()
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?
        };

        let Some((Some(answer), feedback, suggestions, source)) = row else {
            return Ok(None);
        };
        if answer.is_empty() {
            return Ok(None);
        }

        let suggestions = match suggestions.as_deref() {
            Some(json) if !json.is_empty() => serde_json::from_str(json)?,
            _ => Vec::new(),
        };

        Ok(Some(SampleAnswer {
            answer,
            feedback: feedback.unwrap_or_default(),
            suggestions,
            source: SampleSource::from_str(source.as_deref().unwrap_or_default()),
        }))
    }

    async fn upsert_sample_answer(
        &self,
        question_id: Uuid,
        sample: &SampleAnswer,
    ) -> Result<(), StorageError> {
        let conn = self.lock()?;
        let suggestions_json = serde_json::to_string(&sample.suggestions)?;

        let updated = conn
            .execute(
                r#"
                UPDATE questions
                SET sample_answer = ?1, sample_feedback = ?2,
                    sample_suggestions = ?3, sample_source = ?4
                WHERE id = ?5
                "#,
                params![
                    sample.answer,
                    sample.feedback,
                    suggestions_json,
                    sample.source.as_str(),
                    question_id.to_string(),
                ],
            )
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?;

        if updated == 0 {
            return Err(StorageError::NotFound(format!("question {}", question_id)));
        }
        Ok(())
    }
}

#[async_trait]
impl QuestionBank for SqlitePracticeStorage {
    async fn random_question_matching(
        &self,
        filter: &QuestionFilter,
    ) -> Result<Option<Uuid>, StorageError> {
        let (sql, args) = random_question_query(filter);

        let id: Option<String> = {
            let conn = self.lock()?;
            conn.query_row(&sql, params_from_iter(args.iter()), |row| row.get(0))
                .optional()
                .map_err(|e| StorageError::OperationFailed(e.to_string()))?
        };

        id.as_deref().map(parse_uuid).transpose()
    }

    async fn get_question_content(
        &self,
        question_id: Uuid,
    ) -> Result<Option<QuestionContent>, StorageError> {
        let conn = self.lock()?;

        conn.query_row(
            r#"
            SELECT q.content, COALESCE(t.name, 'General'), q.level,
                   COALESCE(q.correct_answer, ''), COALESCE(q.hint, '')
            FROM questions q
            LEFT JOIN topics t ON q.topic_id = t.id
            WHERE q.id = ?1
            "#,
            params![question_id.to_string()],
            |row| {
                Ok(QuestionContent {
                    content: row.get(0)?,
                    topic: row.get(1)?,
                    level: row.get(2)?,
                    correct_answer: row.get(3)?,
                    hint: row.get(4)?,
                })
            },
        )
        .optional()
        .map_err(|e| StorageError::OperationFailed(e.to_string()))
    }

    async fn get_topic_id_by_name(&self, name: &str) -> Result<Option<Uuid>, StorageError> {
        let id: Option<String> = {
            let conn = self.lock()?;
            conn.query_row(
                "SELECT id FROM topics WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StorageError::OperationFailed(e.to_string()))?
        };

        id.as_deref().map(parse_uuid).transpose()
    }
}

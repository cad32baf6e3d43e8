use crate::selection::QuestionFilter;
use crate::storage::{PracticeStorage, QuestionBank, StorageError};
use crate::types::{
    PracticeAttempt, PracticeSession, Question, QuestionContent, SampleAnswer,
};
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Storage and question bank kept in process memory
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    sessions: Arc<Mutex<HashMap<Uuid, PracticeSession>>>,
    attempts: Arc<Mutex<HashMap<Uuid, Vec<PracticeAttempt>>>>,
    topics: Arc<Mutex<HashMap<Uuid, String>>>,
    questions: Arc<Mutex<Vec<Question>>>,
    samples: Arc<Mutex<HashMap<Uuid, SampleAnswer>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StorageError> {
    mutex
        .lock()
        .map_err(|e| StorageError::OperationFailed(format!("Lock error: {}", e)))
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_topic(&self, name: &str) -> Result<Uuid, StorageError> {
        let id = Uuid::new_v4();
        lock(&self.topics)?.insert(id, name.to_string());
        Ok(id)
    }

    pub fn insert_question(&self, question: Question) -> Result<(), StorageError> {
        lock(&self.questions)?.push(question);
        Ok(())
    }
}

#[async_trait::async_trait]
impl PracticeStorage for InMemoryStorage {
    async fn create_session(&self, session: &PracticeSession) -> Result<(), StorageError> {
        lock(&self.sessions)?.insert(session.id, session.clone());
        Ok(())
    }

    async fn get_session(&self, session_id: Uuid) -> Result<Option<PracticeSession>, StorageError> {
        Ok(lock(&self.sessions)?.get(&session_id).cloned())
    }

    async fn update_session(&self, session: &PracticeSession) -> Result<(), StorageError> {
        let mut sessions = lock(&self.sessions)?;
        match sessions.get_mut(&session.id) {
            Some(existing) => {
                *existing = session.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound(format!("session {}", session.id))),
        }
    }

    async fn create_attempt(&self, attempt: &PracticeAttempt) -> Result<(), StorageError> {
        // Response-only fields are not kept
        let mut stored = attempt.clone();
        stored.suggestions.clear();
        stored.improved_answer.clear();

        lock(&self.attempts)?
            .entry(attempt.session_id)
            .or_default()
            .push(stored);
        Ok(())
    }

    async fn get_attempts(&self, session_id: Uuid) -> Result<Vec<PracticeAttempt>, StorageError> {
        Ok(lock(&self.attempts)?
            .get(&session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_sample_answer(
        &self,
        question_id: Uuid,
    ) -> Result<Option<SampleAnswer>, StorageError> {
        Ok(lock(&self.samples)?.get(&question_id).cloned())
    }

    async fn upsert_sample_answer(
        &self,
        question_id: Uuid,
        sample: &SampleAnswer,
    ) -> Result<(), StorageError> {
        lock(&self.samples)?.insert(question_id, sample.clone());
        Ok(())
    }
}

#[async_trait::async_trait]
impl QuestionBank for InMemoryStorage {
    async fn random_question_matching(
        &self,
        filter: &QuestionFilter,
    ) -> Result<Option<Uuid>, StorageError> {
        let topics = lock(&self.topics)?;
        let questions = lock(&self.questions)?;

        let candidates: Vec<Uuid> = questions
            .iter()
            .filter(|q| {
                let topic_name = q.topic_id.and_then(|id| topics.get(&id)).map(String::as_str);
                filter.matches(q, topic_name)
            })
            .map(|q| q.id)
            .collect();

        Ok(candidates.choose(&mut rand::thread_rng()).copied())
    }

    async fn get_question_content(
        &self,
        question_id: Uuid,
    ) -> Result<Option<QuestionContent>, StorageError> {
        let topics = lock(&self.topics)?;
        let questions = lock(&self.questions)?;

        Ok(questions.iter().find(|q| q.id == question_id).map(|q| {
            let topic = q
                .topic_id
                .and_then(|id| topics.get(&id).cloned())
                .unwrap_or_else(|| "General".to_string());
            QuestionContent {
                content: q.content.clone(),
                topic,
                level: q.level.clone(),
                correct_answer: q.correct_answer.clone(),
                hint: q.hint.clone(),
            }
        }))
    }

    async fn get_topic_id_by_name(&self, name: &str) -> Result<Option<Uuid>, StorageError> {
        Ok(lock(&self.topics)?
            .iter()
            .find(|(_, topic)| topic.as_str() == name)
            .map(|(id, _)| *id))
    }
}

use crate::error::PracticeError;
use crate::locks::SessionLocks;
use crate::outcome::{BestEffort, SecondaryWrite};
use crate::rounds::{round_plan, DEFAULT_ROLE};
use crate::selection::DEFAULT_LANGUAGE;
use crate::storage::{PracticeStorage, QuestionBank};
use crate::types::{
    PracticeAttempt, PracticeSession, QuestionContent, RoundAdvance, SampleAnswer, SampleSource,
    SessionConfig, SessionMode, SuggestedAnswer,
};
use practice_evaluator::{AnswerEvaluator, Evaluation, EvaluationRequest, EvaluatorError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Feedback stored when the evaluator failed or timed out
pub const AI_UNAVAILABLE_FEEDBACK: &str =
    "AI evaluation is currently unavailable. Compare your answer with the reference answer.";

/// Feedback stored when the caller turned AI scoring off
pub const AI_DISABLED_FEEDBACK: &str =
    "AI evaluation is disabled. Compare your answer with the reference answer.";

/// Sent to the evaluator in place of an empty answer to request a model answer.
pub fn sample_answer_placeholder(language: &str) -> &'static str {
    match language {
        "vi" => "N/A - Ứng viên chưa trả lời. Hãy viết một câu trả lời mẫu đầy đủ, chất lượng cao cho câu hỏi này.",
        _ => "N/A - The candidate has not answered. Write a complete, high-quality sample answer for this question.",
    }
}

#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    /// Upper bound on a single evaluator call
    pub evaluation_timeout: Duration,
    /// Serve and fill the per-question sample answer cache
    pub use_sample_cache: bool,
    /// Role for interview sessions that do not name one
    pub default_role: String,
    pub default_language: String,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            evaluation_timeout: Duration::from_secs(30),
            use_sample_cache: true,
            default_role: DEFAULT_ROLE.to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Loose session options as supplied by a client
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionOptions {
    /// "interview" enables round progression; anything else is free practice
    pub mode: Option<String>,
    pub role: Option<String>,
    pub tech_stacks: Vec<String>,
    pub round_id: Option<String>,
}

impl SessionOptions {
    pub const INTERVIEW_MODE: &'static str = "interview";

    /// Freeze the options into a typed config. The round plan is computed here and never again.
    pub fn into_config(self, default_role: &str) -> SessionConfig {
        let role = self.role.filter(|r| !r.trim().is_empty());

        let mode = if self.mode.as_deref() == Some(Self::INTERVIEW_MODE) {
            let role = role.unwrap_or_else(|| default_role.to_string());
            SessionMode::Interview {
                rounds: round_plan(&role),
                role,
                current_round_index: 0,
            }
        } else {
            SessionMode::FreePractice { role }
        };

        SessionConfig {
            mode,
            tech_stacks: self.tech_stacks,
            round_id: self.round_id.filter(|r| !r.is_empty()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StartSession {
    pub user_id: Uuid,
    pub topic_id: Option<Uuid>,
    pub level: Option<String>,
    pub language: String,
    pub options: SessionOptions,
}

#[derive(Debug, Clone)]
pub struct SubmitAnswer {
    pub session_id: Uuid,
    pub question_id: Uuid,
    pub answer: String,
    pub language: Option<String>,
    pub ai_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub attempt: PracticeAttempt,
    /// `Uuid::nil()` when no further question is available
    pub next_question_id: Uuid,
}

/// Drives practice sessions: start, answer, skip, suggest.
pub struct PracticeOrchestrator {
    storage: Arc<dyn PracticeStorage>,
    questions: Arc<dyn QuestionBank>,
    evaluator: Arc<dyn AnswerEvaluator>,
    settings: OrchestratorSettings,
    locks: SessionLocks,
}

impl PracticeOrchestrator {
    pub fn new(
        storage: Arc<dyn PracticeStorage>,
        questions: Arc<dyn QuestionBank>,
        evaluator: Arc<dyn AnswerEvaluator>,
    ) -> Self {
        Self {
            storage,
            questions,
            evaluator,
            settings: OrchestratorSettings::default(),
            locks: SessionLocks::new(),
        }
    }

    pub fn with_settings(mut self, settings: OrchestratorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    /// Create a session and pick its first question.
    ///
    /// The first question is selected before anything is written, so a
    /// failed start leaves no session behind.
    pub async fn start_session(
        &self,
        request: StartSession,
    ) -> Result<(PracticeSession, Uuid), PracticeError> {
        let config = request.options.into_config(&self.settings.default_role);
        let language = self.language_or_default(&request.language);

        let mut effective_topic = request.topic_id;
        if let Some(first_round) = config.current_round() {
            match self.resolve_topic(first_round).await {
                Some(id) => effective_topic = Some(id),
                None => debug!(round = first_round, "First round topic not resolved"),
            }
        }

        let session = PracticeSession::new(
            request.user_id,
            request.topic_id,
            request.level,
            language,
            config,
        );

        let first_question_id = self
            .pick_question(effective_topic, &session)
            .await
            .map_err(PracticeError::session_creation)?;

        self.storage
            .create_session(&session)
            .await
            .map_err(|e| PracticeError::session_creation(e.into()))?;

        info!(
            session_id = %session.id,
            user_id = %session.user_id,
            interview = session.config.is_interview(),
            rounds = session.config.rounds().len(),
            "Practice session started"
        );

        Ok((session, first_question_id))
    }

    /// Score an answer, record it and move the session forward.
    ///
    /// Evaluator failures never fail this call. A failed session update after
    /// the attempt is stored is reported in the returned `BestEffort`.
    pub async fn submit_answer(
        &self,
        request: SubmitAnswer,
    ) -> Result<BestEffort<AnswerOutcome>, PracticeError> {
        let _guard = self.locks.acquire(request.session_id).await;

        let mut session = self.load_active_session(request.session_id).await?;
        let question = self.load_question(request.question_id).await?;

        let language = if session.language.is_empty() {
            self.language_or_default(request.language.as_deref().unwrap_or_default())
        } else {
            session.language.clone()
        };

        let mut attempt =
            PracticeAttempt::new(session.id, request.question_id, request.answer.clone());

        if request.ai_enabled {
            let evaluation = self
                .evaluate(EvaluationRequest {
                    question_content: question.content.clone(),
                    user_answer: request.answer,
                    correct_answer: non_empty(&question.correct_answer),
                    topic: question.topic.clone(),
                    level: question.level.clone(),
                    language,
                })
                .await;

            match evaluation {
                Ok(evaluation) => {
                    attempt.score = evaluation.score;
                    attempt.feedback = evaluation.feedback;
                    attempt.suggestions = evaluation.suggestions;
                    attempt.improved_answer = evaluation.improved_answer;
                }
                Err(e) => {
                    warn!(
                        session_id = %session.id,
                        question_id = %request.question_id,
                        evaluator = self.evaluator.name(),
                        error = %e,
                        "Evaluation failed, using fallback"
                    );
                    attempt.feedback = AI_UNAVAILABLE_FEEDBACK.to_string();
                    attempt.improved_answer = question.correct_answer.clone();
                }
            }
        } else {
            attempt.feedback = AI_DISABLED_FEEDBACK.to_string();
            attempt.improved_answer = question.correct_answer.clone();
        }

        self.storage.create_attempt(&attempt).await?;

        session.score += i64::from(attempt.score);
        let next_question_id = self.advance(&mut session).await;

        let mut outcome = BestEffort::new(AnswerOutcome {
            attempt,
            next_question_id,
        });
        if let Err(e) = self.storage.update_session(&session).await {
            outcome.record(SecondaryWrite::SessionProgress, e);
        }

        info!(
            session_id = %session.id,
            score = outcome.value.attempt.score,
            total = session.score,
            next_question_id = %next_question_id,
            "Answer submitted"
        );

        Ok(outcome)
    }

    /// Move past the current round without answering.
    pub async fn skip_current_round(
        &self,
        session_id: Uuid,
    ) -> Result<BestEffort<Uuid>, PracticeError> {
        let _guard = self.locks.acquire(session_id).await;

        let mut session = self.load_active_session(session_id).await?;
        let next_question_id = self.advance(&mut session).await;

        let mut outcome = BestEffort::new(next_question_id);
        if let Err(e) = self.storage.update_session(&session).await {
            outcome.record(SecondaryWrite::SessionProgress, e);
        }

        info!(session_id = %session_id, next_question_id = %next_question_id, "Round skipped");
        Ok(outcome)
    }

    /// Best-effort model answer or critique for a question.
    ///
    /// Only a missing question is an error. An empty answer asks the evaluator
    /// for a sample answer, served from the cache when one was generated before.
    pub async fn suggest_answer(
        &self,
        question_id: Uuid,
        answer: Option<String>,
        language: &str,
    ) -> Result<BestEffort<SuggestedAnswer>, PracticeError> {
        let question = self.load_question(question_id).await?;
        let language = self.language_or_default(language);

        let answer = answer.unwrap_or_default();
        let wants_sample = answer.trim().is_empty();

        if wants_sample && self.settings.use_sample_cache {
            match self.storage.get_sample_answer(question_id).await {
                Ok(Some(sample)) if sample.source == SampleSource::Ai && !sample.answer.is_empty() => {
                    debug!(question_id = %question_id, "Serving cached sample answer");
                    return Ok(BestEffort::new(SuggestedAnswer {
                        score: 0,
                        feedback: sample.feedback,
                        suggestions: sample.suggestions,
                        improved_answer: sample.answer,
                    }));
                }
                Ok(_) => {}
                Err(e) => warn!(question_id = %question_id, error = %e, "Sample cache lookup failed"),
            }
        }

        let user_answer = if wants_sample {
            sample_answer_placeholder(&language).to_string()
        } else {
            answer
        };

        let evaluation = self
            .evaluate(EvaluationRequest {
                question_content: question.content.clone(),
                user_answer,
                correct_answer: non_empty(&question.correct_answer),
                topic: question.topic.clone(),
                level: question.level.clone(),
                language,
            })
            .await;

        let evaluation = match evaluation {
            Ok(evaluation) => evaluation,
            Err(e) => {
                warn!(question_id = %question_id, error = %e, "Suggestion failed, using reference answer");
                return Ok(BestEffort::new(SuggestedAnswer {
                    score: 0,
                    feedback: question.correct_answer.clone(),
                    suggestions: Vec::new(),
                    improved_answer: question.correct_answer,
                }));
            }
        };

        let mut outcome = BestEffort::new(SuggestedAnswer {
            score: evaluation.score,
            feedback: evaluation.feedback,
            suggestions: evaluation.suggestions,
            improved_answer: evaluation.improved_answer,
        });

        if wants_sample && self.settings.use_sample_cache && !outcome.value.improved_answer.is_empty() {
            let sample = SampleAnswer {
                answer: outcome.value.improved_answer.clone(),
                feedback: outcome.value.feedback.clone(),
                suggestions: outcome.value.suggestions.clone(),
                source: SampleSource::Ai,
            };
            if let Err(e) = self.storage.upsert_sample_answer(question_id, &sample).await {
                outcome.record(SecondaryWrite::SampleAnswerCache, e);
            }
        }

        Ok(outcome)
    }

    /// Random question for a session, optionally overriding the topic by name.
    pub async fn get_random_question(
        &self,
        session_id: Uuid,
        topic_name: Option<&str>,
    ) -> Result<Uuid, PracticeError> {
        let session = self.get_session(session_id).await?;

        let topic_id = match topic_name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => Some(self.get_topic_id_by_name(name).await?),
            None => session.topic_id,
        };

        self.pick_question(topic_id, &session).await
    }

    pub async fn get_session(&self, session_id: Uuid) -> Result<PracticeSession, PracticeError> {
        self.storage
            .get_session(session_id)
            .await?
            .ok_or(PracticeError::SessionNotFound(session_id))
    }

    pub async fn get_question(&self, question_id: Uuid) -> Result<QuestionContent, PracticeError> {
        self.load_question(question_id).await
    }

    pub async fn get_topic_id_by_name(&self, name: &str) -> Result<Uuid, PracticeError> {
        self.questions
            .get_topic_id_by_name(name)
            .await?
            .ok_or_else(|| PracticeError::TopicNotFound(name.to_string()))
    }

    async fn load_active_session(&self, session_id: Uuid) -> Result<PracticeSession, PracticeError> {
        let session = self.get_session(session_id).await?;
        if !session.is_in_progress() {
            return Err(PracticeError::SessionNotInProgress {
                session_id,
                status: session.status,
            });
        }
        Ok(session)
    }

    async fn load_question(&self, question_id: Uuid) -> Result<QuestionContent, PracticeError> {
        self.questions
            .get_question_content(question_id)
            .await?
            .ok_or(PracticeError::QuestionNotFound(question_id))
    }

    /// Advance the session to its next question. Never fails: anything that
    /// prevents finding a next question yields `Uuid::nil()`.
    ///
    /// An interview whose last round was just answered is marked completed.
    async fn advance(&self, session: &mut PracticeSession) -> Uuid {
        let next = match session.config.advance_round() {
            RoundAdvance::Advanced(topic) => {
                info!(
                    session_id = %session.id,
                    round = %topic,
                    index = session.config.current_round_index().unwrap_or_default(),
                    "Advancing to next round"
                );
                let topic_id = self.resolve_topic(&topic).await;
                self.pick_question(topic_id, session).await
            }
            RoundAdvance::Exhausted => {
                session.complete();
                info!(session_id = %session.id, score = session.score, "Interview completed");
                return Uuid::nil();
            }
            RoundAdvance::NotInterview => self.pick_question(session.topic_id, session).await,
        };

        next.unwrap_or_else(|e| {
            warn!(session_id = %session.id, error = %e, "No next question available");
            Uuid::nil()
        })
    }

    async fn pick_question(
        &self,
        topic_id: Option<Uuid>,
        session: &PracticeSession,
    ) -> Result<Uuid, PracticeError> {
        self.questions
            .get_random_question_id(
                topic_id,
                session.level.as_deref(),
                &session.language,
                &session.config,
            )
            .await?
            .ok_or(PracticeError::NoEligibleQuestion)
    }

    /// Topic id for a round name. Lookup errors and unknown names both yield `None`.
    async fn resolve_topic(&self, name: &str) -> Option<Uuid> {
        match self.questions.get_topic_id_by_name(name).await {
            Ok(id) => id,
            Err(e) => {
                warn!(topic = name, error = %e, "Topic lookup failed");
                None
            }
        }
    }

    async fn evaluate(&self, request: EvaluationRequest) -> Result<Evaluation, EvaluatorError> {
        let timeout = self.settings.evaluation_timeout;
        match tokio::time::timeout(timeout, self.evaluator.evaluate(request)).await {
            Ok(result) => result.map(Evaluation::normalized),
            Err(_) => Err(EvaluatorError::timeout(timeout.as_secs())),
        }
    }

    fn language_or_default(&self, language: &str) -> String {
        let language = language.trim();
        if language.is_empty() {
            self.settings.default_language.clone()
        } else {
            language.to_string()
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

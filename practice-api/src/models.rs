//! Conversions between orchestrator types and the wire DTOs in `shared_types`.

use practice_core::{
    PracticeAttempt, PracticeSession, QuestionContent, SessionConfig, SessionMode, SessionOptions,
    SuggestedAnswer,
};
use shared_types::{
    AttemptResponse, PracticeConfig, PracticeSessionResponse, QuestionResponse,
    SessionConfigResponse, SuggestAnswerResponse,
};
use uuid::Uuid;

pub use shared_types::ErrorResponse;

pub fn session_options(config: Option<PracticeConfig>) -> SessionOptions {
    let mut config = config.unwrap_or_default();
    SessionOptions {
        tech_stacks: config.stack_names(),
        mode: config.mode,
        role: config.role,
        round_id: config.round_id,
    }
}

pub fn config_response(config: &SessionConfig) -> SessionConfigResponse {
    let (mode, rounds, current_round_index) = match &config.mode {
        SessionMode::Interview {
            rounds,
            current_round_index,
            ..
        } => (
            "interview",
            rounds.clone(),
            Some(*current_round_index as u32),
        ),
        SessionMode::FreePractice { .. } => ("free_practice", Vec::new(), None),
    };

    SessionConfigResponse {
        mode: mode.to_string(),
        role: config.role().map(str::to_string),
        rounds,
        current_round_index,
        tech_stacks: config.tech_stacks.clone(),
        round_id: config.round_id.clone(),
    }
}

pub fn session_response(session: &PracticeSession) -> PracticeSessionResponse {
    PracticeSessionResponse {
        id: session.id,
        user_id: session.user_id,
        score: session.score,
        started_at: session.started_at,
        ended_at: session.ended_at,
        status: session.status.to_string(),
        topic_id: session.topic_id,
        level: session.level.clone(),
        language: session.language.clone(),
        config: config_response(&session.config),
    }
}

pub fn attempt_response(attempt: PracticeAttempt) -> AttemptResponse {
    AttemptResponse {
        id: attempt.id,
        session_id: attempt.session_id,
        question_id: attempt.question_id,
        user_answer: attempt.user_answer,
        score: attempt.score,
        feedback: attempt.feedback,
        suggestions: attempt.suggestions,
        improved_answer: attempt.improved_answer,
        created_at: attempt.created_at,
    }
}

pub fn question_response(id: Uuid, question: QuestionContent) -> QuestionResponse {
    QuestionResponse {
        id,
        content: question.content,
        topic: question.topic,
        level: question.level,
        correct_answer: question.correct_answer,
        hint: question.hint,
    }
}

pub fn suggest_response(suggestion: SuggestedAnswer) -> SuggestAnswerResponse {
    SuggestAnswerResponse {
        score: suggestion.score,
        feedback: suggestion.feedback,
        suggestions: suggestion.suggestions,
        improved_answer: suggestion.improved_answer,
    }
}

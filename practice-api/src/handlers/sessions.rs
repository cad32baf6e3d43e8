use super::{error_response, parse_uuid};
use crate::models::{attempt_response, session_options, session_response};
use actix_web::{get, post, web, HttpResponse, Responder};
use practice_core::{PracticeOrchestrator, StartSession, SubmitAnswer};
use shared_types::{
    RandomQuestionQuery, RandomQuestionResponse, SkipRoundResponse, StartSessionRequest,
    StartSessionResponse, SubmitAnswerRequest, SubmitAnswerResponse,
};
use tracing::{info, warn};
use uuid::Uuid;

#[post("/sessions")]
pub async fn start_session(
    req: web::Json<StartSessionRequest>,
    orchestrator: web::Data<PracticeOrchestrator>,
) -> impl Responder {
    let req = req.into_inner();
    info!(user_id = %req.user_id, topic = ?req.topic_id, "Starting practice session");

    // The topic may be given as an id or by name
    let topic_id = match req.topic_id.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        None => None,
        Some(topic) => match Uuid::parse_str(topic) {
            Ok(id) => Some(id),
            Err(_) => match orchestrator.get_topic_id_by_name(topic).await {
                Ok(id) => Some(id),
                Err(e) => return error_response(&e),
            },
        },
    };

    let request = StartSession {
        user_id: req.user_id,
        topic_id,
        level: req.level,
        language: req.language,
        options: session_options(req.config),
    };

    match orchestrator.start_session(request).await {
        Ok((session, first_question_id)) => HttpResponse::Created().json(StartSessionResponse {
            session: session_response(&session),
            first_question_id,
        }),
        Err(e) => error_response(&e),
    }
}

#[get("/sessions/{session_id}")]
pub async fn get_session(
    session_id: web::Path<String>,
    orchestrator: web::Data<PracticeOrchestrator>,
) -> impl Responder {
    let session_id = match parse_uuid(&session_id, "session id") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match orchestrator.get_session(session_id).await {
        Ok(session) => HttpResponse::Ok().json(session_response(&session)),
        Err(e) => error_response(&e),
    }
}

#[post("/sessions/{session_id}/answers")]
pub async fn submit_answer(
    session_id: web::Path<String>,
    req: web::Json<SubmitAnswerRequest>,
    orchestrator: web::Data<PracticeOrchestrator>,
) -> impl Responder {
    let session_id = match parse_uuid(&session_id, "session id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let req = req.into_inner();

    let request = SubmitAnswer {
        session_id,
        question_id: req.question_id,
        answer: req.content,
        language: req.language,
        ai_enabled: req.ai_enabled.unwrap_or(true),
    };

    match orchestrator.submit_answer(request).await {
        Ok(outcome) => {
            if !outcome.is_complete() {
                warn!(session_id = %session_id, "Answer stored but session progress was not saved");
            }
            let outcome = outcome.into_inner();
            HttpResponse::Ok().json(SubmitAnswerResponse {
                attempt: attempt_response(outcome.attempt),
                next_question_id: outcome.next_question_id,
            })
        }
        Err(e) => error_response(&e),
    }
}

#[post("/sessions/{session_id}/skip")]
pub async fn skip_round(
    session_id: web::Path<String>,
    orchestrator: web::Data<PracticeOrchestrator>,
) -> impl Responder {
    let session_id = match parse_uuid(&session_id, "session id") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match orchestrator.skip_current_round(session_id).await {
        Ok(outcome) => HttpResponse::Ok().json(SkipRoundResponse {
            next_question_id: outcome.into_inner(),
        }),
        Err(e) => error_response(&e),
    }
}

#[get("/sessions/{session_id}/questions/random")]
pub async fn random_question(
    session_id: web::Path<String>,
    query: web::Query<RandomQuestionQuery>,
    orchestrator: web::Data<PracticeOrchestrator>,
) -> impl Responder {
    let session_id = match parse_uuid(&session_id, "session id") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match orchestrator
        .get_random_question(session_id, query.topic.as_deref())
        .await
    {
        Ok(question_id) => HttpResponse::Ok().json(RandomQuestionResponse { question_id }),
        Err(e) => error_response(&e),
    }
}

use super::{error_response, parse_uuid};
use crate::models::{question_response, suggest_response};
use actix_web::{get, post, web, HttpResponse, Responder};
use practice_core::PracticeOrchestrator;
use shared_types::SuggestAnswerRequest;
use tracing::info;

#[get("/questions/{question_id}")]
pub async fn get_question(
    question_id: web::Path<String>,
    orchestrator: web::Data<PracticeOrchestrator>,
) -> impl Responder {
    let question_id = match parse_uuid(&question_id, "question id") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match orchestrator.get_question(question_id).await {
        Ok(question) => HttpResponse::Ok().json(question_response(question_id, question)),
        Err(e) => error_response(&e),
    }
}

/// Critique an answer, or generate a sample answer when the body has none.
/// Evaluator failures fall back to the reference answer.
#[post("/questions/{question_id}/suggest")]
pub async fn suggest_answer(
    question_id: web::Path<String>,
    req: Option<web::Json<SuggestAnswerRequest>>,
    orchestrator: web::Data<PracticeOrchestrator>,
) -> impl Responder {
    let question_id = match parse_uuid(&question_id, "question id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let req = req.map(web::Json::into_inner).unwrap_or_default();

    info!(question_id = %question_id, sample = req.content.is_none(), "Suggesting answer");

    match orchestrator
        .suggest_answer(question_id, req.content, req.language.as_deref().unwrap_or_default())
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(suggest_response(outcome.into_inner())),
        Err(e) => error_response(&e),
    }
}

pub mod health;
pub mod questions;
pub mod sessions;

use crate::models::ErrorResponse;
use actix_web::{error::InternalError, web, HttpResponse};
use practice_core::PracticeError;
use tracing::{error, warn};
use uuid::Uuid;

pub const API_SCOPE: &str = "/api/v1/practice";

/// Mount every route. Shared by the server and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse::new(format!(
            "Invalid request body: {}",
            err
        )));
        InternalError::from_response(err, response).into()
    });

    cfg.service(health::health_check).service(
        web::scope(API_SCOPE)
            .app_data(json_config)
            .service(sessions::start_session)
            .service(sessions::get_session)
            .service(sessions::submit_answer)
            .service(sessions::skip_round)
            .service(sessions::random_question)
            .service(questions::get_question)
            .service(questions::suggest_answer),
    );
}

/// Map an orchestrator error to its HTTP response
pub fn error_response(err: &PracticeError) -> HttpResponse {
    let body = ErrorResponse::new(err.to_string());

    match root_cause(err) {
        PracticeError::SessionNotFound(_) | PracticeError::QuestionNotFound(_) => {
            warn!(error = %err, "Resource not found");
            HttpResponse::NotFound().json(body)
        }
        PracticeError::TopicNotFound(_) => {
            warn!(error = %err, "Unknown topic");
            HttpResponse::BadRequest().json(body)
        }
        PracticeError::SessionNotInProgress { .. } => {
            warn!(error = %err, "Session is not in progress");
            HttpResponse::Conflict().json(body)
        }
        _ => {
            error!(error = %err, "Request failed");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

fn root_cause(err: &PracticeError) -> &PracticeError {
    match err {
        PracticeError::SessionCreation { source } => root_cause(source),
        other => other,
    }
}

pub fn parse_uuid(value: &str, what: &str) -> Result<Uuid, HttpResponse> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        HttpResponse::BadRequest().json(ErrorResponse::new(format!("Invalid {}: {}", what, value)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use practice_core::SessionStatus;

    #[test]
    fn test_error_status_mapping() {
        let id = Uuid::new_v4();
        let cases = [
            (PracticeError::SessionNotFound(id), StatusCode::NOT_FOUND),
            (PracticeError::QuestionNotFound(id), StatusCode::NOT_FOUND),
            (PracticeError::TopicNotFound("Rust".to_string()), StatusCode::BAD_REQUEST),
            (
                PracticeError::SessionNotInProgress {
                    session_id: id,
                    status: SessionStatus::Completed,
                },
                StatusCode::CONFLICT,
            ),
            (PracticeError::NoEligibleQuestion, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(error_response(&err).status(), status, "{}", err);
        }
    }

    #[test]
    fn test_parse_uuid_rejects_garbage() {
        let response = parse_uuid("not-a-uuid", "session id").unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(parse_uuid(&Uuid::nil().to_string(), "session id").is_ok());
    }
}

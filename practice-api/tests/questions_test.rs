mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use actix_web::test::TestRequest;
use common::{evaluation, setup_test_app, REFERENCE_ANSWER};
use practice_core::{sample_answer_placeholder, PracticeStorage, SampleSource};
use serde_json::json;
use uuid::Uuid;

#[actix_rt::test]
async fn test_get_question() -> anyhow::Result<()> {
    let test_app = setup_test_app().await?;
    let question_id = test_app.questions["React"];

    let req = TestRequest::get()
        .uri(&format!("/api/v1/practice/questions/{}", question_id))
        .to_request();
    let resp = test::call_service(&test_app.app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await)?;
    assert_eq!(body["id"], question_id.to_string());
    assert_eq!(body["content"], "A React question");
    assert_eq!(body["topic"], "React");
    assert_eq!(body["level"], "Mid");
    assert_eq!(body["correct_answer"], REFERENCE_ANSWER);
    assert_eq!(body["hint"], "Think about identity");

    Ok(())
}

#[actix_rt::test]
async fn test_get_unknown_question() -> anyhow::Result<()> {
    let test_app = setup_test_app().await?;

    let req = TestRequest::get()
        .uri(&format!("/api/v1/practice/questions/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&test_app.app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[actix_rt::test]
async fn test_suggest_sample_answer_is_cached() -> anyhow::Result<()> {
    let test_app = setup_test_app().await?;
    let question_id = test_app.questions["React"];
    let uri = format!("/api/v1/practice/questions/{}/suggest", question_id);

    let req = TestRequest::post()
        .uri(&uri)
        .set_json(json!({"language": "vi"}))
        .to_request();
    let resp = test::call_service(&test_app.app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await)?;
    assert_eq!(body["improved_answer"], evaluation(70).improved_answer);

    let request = test_app.mock_evaluator.last_request().unwrap();
    assert_eq!(request.user_answer, sample_answer_placeholder("vi"));
    assert_eq!(request.language, "vi");

    let cached = test_app.storage.get_sample_answer(question_id).await?.unwrap();
    assert_eq!(cached.source, SampleSource::Ai);

    // Second request is served without calling the evaluator
    let req = TestRequest::post().uri(&uri).to_request();
    let resp = test::call_service(&test_app.app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await)?;
    assert_eq!(body["improved_answer"], cached.answer);
    assert_eq!(body["score"], 0);
    assert_eq!(test_app.mock_evaluator.get_call_count(), 1);

    Ok(())
}

#[actix_rt::test]
async fn test_suggest_falls_back_to_reference_answer() -> anyhow::Result<()> {
    let test_app = setup_test_app().await?;
    test_app.mock_evaluator.push_failure();
    let question_id = test_app.questions["CSS"];

    let req = TestRequest::post()
        .uri(&format!("/api/v1/practice/questions/{}/suggest", question_id))
        .set_json(json!({"content": "Use floats", "language": "en"}))
        .to_request();
    let resp = test::call_service(&test_app.app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await)?;
    assert_eq!(body["score"], 0);
    assert_eq!(body["improved_answer"], REFERENCE_ANSWER);
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 0);

    let request = test_app.mock_evaluator.last_request().unwrap();
    assert_eq!(request.user_answer, "Use floats");
    assert!(test_app.storage.get_sample_answer(question_id).await?.is_none());

    Ok(())
}

#[actix_rt::test]
async fn test_questions_missing_ai_sample() -> anyhow::Result<()> {
    let test_app = setup_test_app().await?;
    let total = test_app.questions.len();

    assert_eq!(test_app.storage.questions_missing_ai_sample(100)?.len(), total);
    assert_eq!(test_app.storage.questions_missing_ai_sample(3)?.len(), 3);

    let req = TestRequest::post()
        .uri(&format!(
            "/api/v1/practice/questions/{}/suggest",
            test_app.questions["CSS"]
        ))
        .to_request();
    let resp = test::call_service(&test_app.app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let missing = test_app.storage.questions_missing_ai_sample(100)?;
    assert_eq!(missing.len(), total - 1);
    assert!(!missing.contains(&test_app.questions["CSS"]));

    Ok(())
}

#[actix_rt::test]
async fn test_health_check() -> anyhow::Result<()> {
    let test_app = setup_test_app().await?;

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&test_app.app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await)?;
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());

    Ok(())
}

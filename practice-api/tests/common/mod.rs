#![allow(dead_code)]

use actix_web::{test, web, App};
use practice_api::handlers::configure;
use practice_api::helpers::database::open_in_memory;
use practice_api::storage::SqlitePracticeStorage;
use practice_core::{PracticeOrchestrator, Question};
use practice_evaluator::{AnswerEvaluator, Evaluation, EvaluationRequest, EvaluatorError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const FRONTEND_TOPICS: [&str; 8] = [
    "CV Screening",
    "Behavioral",
    "Frontend Basic",
    "CSS",
    "JavaScript",
    "React",
    "System Design",
    "Algorithms",
];

pub const REFERENCE_ANSWER: &str = "Use a stable key for each list item.";

pub struct TestApp<S> {
    pub storage: Arc<SqlitePracticeStorage>,
    pub mock_evaluator: Arc<MockEvaluator>,
    /// Topic name to id
    pub topics: HashMap<String, Uuid>,
    /// Topic name to the single question seeded under it
    pub questions: HashMap<String, Uuid>,
    pub app: S,
}

/// Evaluator that replays queued results, then answers with a fixed score
pub struct MockEvaluator {
    pub responses: Arc<Mutex<Vec<Result<Evaluation, EvaluatorError>>>>,
    pub requests: Arc<Mutex<Vec<EvaluationRequest>>>,
    pub call_count: Arc<Mutex<usize>>,
}

impl MockEvaluator {
    pub fn new() -> Self {
        MockEvaluator {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn push_response(&self, response: Result<Evaluation, EvaluatorError>) {
        self.responses.lock().unwrap().push(response);
    }

    pub fn push_failure(&self) {
        self.push_response(Err(EvaluatorError::api_error(
            503,
            "evaluator overloaded".to_string(),
        )));
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn last_request(&self) -> Option<EvaluationRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Default for MockEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AnswerEvaluator for MockEvaluator {
    async fn evaluate(&self, request: EvaluationRequest) -> Result<Evaluation, EvaluatorError> {
        *self.call_count.lock().unwrap() += 1;
        self.requests.lock().unwrap().push(request);

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(evaluation(70))
        } else {
            responses.remove(0)
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

pub fn evaluation(score: i32) -> Evaluation {
    Evaluation {
        score,
        feedback: "Solid answer".to_string(),
        suggestions: vec!["Mention reconciliation".to_string()],
        improved_answer: "A stable key lets React match items between renders.".to_string(),
    }
}

/// Seed one published FrontEnd question per interview round topic
pub fn seed_question_bank(
    storage: &SqlitePracticeStorage,
) -> anyhow::Result<(HashMap<String, Uuid>, HashMap<String, Uuid>)> {
    let mut topics = HashMap::new();
    let mut questions = HashMap::new();

    for name in FRONTEND_TOPICS {
        let topic_id = storage.insert_topic(name, None)?;
        let question = Question {
            id: Uuid::new_v4(),
            topic_id: Some(topic_id),
            content: format!("A {} question", name),
            level: "Mid".to_string(),
            correct_answer: REFERENCE_ANSWER.to_string(),
            hint: "Think about identity".to_string(),
            language: "en".to_string(),
            role: "FrontEnd".to_string(),
            published: true,
        };
        storage.insert_question(&question)?;

        topics.insert(name.to_string(), topic_id);
        questions.insert(name.to_string(), question.id);
    }

    Ok((topics, questions))
}

pub async fn setup_test_app() -> anyhow::Result<TestApp<impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
>>> {
    let storage = Arc::new(SqlitePracticeStorage::new(open_in_memory()?));
    let (topics, questions) = seed_question_bank(&storage)?;

    let mock_evaluator = Arc::new(MockEvaluator::new());
    let evaluator = mock_evaluator.clone() as Arc<dyn AnswerEvaluator>;
    let orchestrator = PracticeOrchestrator::new(storage.clone(), storage.clone(), evaluator);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(orchestrator))
            .configure(configure),
    )
    .await;

    Ok(TestApp {
        storage,
        mock_evaluator,
        topics,
        questions,
        app,
    })
}

pub fn session_uri(session_id: &str, suffix: &str) -> String {
    format!("/api/v1/practice/sessions/{}{}", session_id, suffix)
}

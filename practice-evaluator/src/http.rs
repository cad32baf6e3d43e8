use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use std::time::Duration;

use crate::{
    client::AnswerEvaluator,
    error::EvaluatorError,
    types::{Evaluation, EvaluationRequest},
};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the AI service `POST /api/v1/evaluate` endpoint
pub struct HttpEvaluatorClient {
    base_url: String,
    timeout: Duration,
    http_client: reqwest::Client,
}

impl HttpEvaluatorClient {
    /// Create a client pointing at the default local AI service
    pub fn new() -> Result<Self, EvaluatorError> {
        Self::build(
            DEFAULT_BASE_URL.to_string(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    fn build(base_url: String, timeout: Duration) -> Result<Self, EvaluatorError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EvaluatorError::Network { source: e })?;

        Ok(Self {
            base_url,
            timeout,
            http_client,
        })
    }

    /// Set a custom base URL for the AI service
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the request timeout. Rebuilds the underlying HTTP client.
    pub fn with_timeout(self, timeout: Duration) -> Result<Self, EvaluatorError> {
        Self::build(self.base_url, timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_send_error(&self, e: reqwest::Error) -> EvaluatorError {
        if e.is_timeout() {
            EvaluatorError::timeout(self.timeout.as_secs())
        } else {
            EvaluatorError::Network { source: e }
        }
    }
}

#[async_trait]
impl AnswerEvaluator for HttpEvaluatorClient {
    async fn evaluate(&self, request: EvaluationRequest) -> Result<Evaluation, EvaluatorError> {
        let url = format!("{}/api/v1/evaluate", self.base_url);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        tracing::debug!(url = %url, topic = %request.topic, "Calling evaluation service");

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();

        if status.is_success() {
            let body = response.text().await.map_err(|e| self.map_send_error(e))?;
            let evaluation: Evaluation = serde_json::from_str(&body)
                .map_err(|e| EvaluatorError::parse(format!("Failed to parse response: {}", e)))?;
            Ok(evaluation.normalized())
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            match status {
                reqwest::StatusCode::BAD_REQUEST | reqwest::StatusCode::UNPROCESSABLE_ENTITY => {
                    Err(EvaluatorError::invalid_request(error_text))
                }
                _ => Err(EvaluatorError::api_error(status.as_u16(), error_text)),
            }
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}

use crate::{
    error::EvaluatorError,
    types::{Evaluation, EvaluationRequest},
};
use async_trait::async_trait;

/// Core trait for answer evaluators
#[async_trait]
pub trait AnswerEvaluator: Send + Sync {
    /// Score a candidate answer against a question and its reference answer
    async fn evaluate(&self, request: EvaluationRequest) -> Result<Evaluation, EvaluatorError>;

    /// Evaluator name used in logs (e.g., "http", "mock")
    fn name(&self) -> &str;
}

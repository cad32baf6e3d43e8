use crate::config::EvaluatorConfig;
use practice_evaluator::{AnswerEvaluator, HttpEvaluatorClient};
use std::sync::Arc;
use std::time::Duration;

pub fn create_evaluator_client(config: &EvaluatorConfig) -> anyhow::Result<Arc<dyn AnswerEvaluator>> {
    let client = HttpEvaluatorClient::new()?
        .with_base_url(&config.base_url)
        .with_timeout(Duration::from_secs(config.timeout_secs))?;

    Ok(Arc::new(client))
}

use crate::config::ApiConfig;
use crate::helpers::evaluator::create_evaluator_client;
use crate::storage::SqlitePracticeStorage;
use practice_core::{OrchestratorSettings, PracticeOrchestrator};
use std::sync::Arc;
use std::time::Duration;

pub fn orchestrator_settings(config: &ApiConfig) -> OrchestratorSettings {
    OrchestratorSettings {
        // The HTTP client enforces the same bound; this one also covers connect stalls.
        evaluation_timeout: Duration::from_secs(config.evaluator.timeout_secs),
        use_sample_cache: config.practice.sample_cache,
        default_role: config.practice.default_role.clone(),
        default_language: config.practice.default_language.clone(),
    }
}

/// Wire the SQLite store and the HTTP evaluator into an orchestrator
pub fn create_orchestrator(
    config: &ApiConfig,
    storage: Arc<SqlitePracticeStorage>,
) -> anyhow::Result<PracticeOrchestrator> {
    let evaluator = create_evaluator_client(&config.evaluator)?;

    Ok(
        PracticeOrchestrator::new(storage.clone(), storage, evaluator)
            .with_settings(orchestrator_settings(config)),
    )
}

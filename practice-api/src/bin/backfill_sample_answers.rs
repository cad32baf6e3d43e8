use clap::Parser;
use practice_api::config::ApiConfig;
use practice_api::helpers::database::initialize_database;
use practice_api::helpers::logging::init_logging;
use practice_api::helpers::orchestrator::{create_orchestrator, orchestrator_settings};
use practice_api::storage::SqlitePracticeStorage;
use practice_core::{PracticeStorage, SampleSource, SecondaryWrite};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "backfill-sample-answers")]
#[command(about = "Generate AI sample answers for questions that lack one", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Language the sample answers are written in
    #[arg(short, long, default_value = "vi")]
    language: String,

    /// Maximum number of questions to process
    #[arg(long, default_value = "50")]
    limit: usize,

    /// Pause between evaluator calls
    #[arg(long, default_value = "250")]
    sleep_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, _) = ApiConfig::load(cli.config.as_deref())?;
    let _log_guard = init_logging(&config.logging)?;

    let db = initialize_database(&config.database.path)?;
    let storage = Arc::new(SqlitePracticeStorage::new(db));

    let mut settings = orchestrator_settings(&config);
    settings.use_sample_cache = true;
    let orchestrator = create_orchestrator(&config, storage.clone())?.with_settings(settings);

    let question_ids = storage.questions_missing_ai_sample(cli.limit)?;
    info!(count = question_ids.len(), language = %cli.language, "Backfilling sample answers");

    let mut generated = 0usize;
    let mut failed = 0usize;

    for (index, question_id) in question_ids.iter().enumerate() {
        match orchestrator
            .suggest_answer(*question_id, None, &cli.language)
            .await
        {
            Ok(outcome) if outcome.failed(SecondaryWrite::SampleAnswerCache) => {
                failed += 1;
                warn!(question_id = %question_id, "Sample answer generated but not saved");
            }
            Ok(_) => {
                // A fallback to the reference answer leaves the cache untouched
                let cached = storage
                    .get_sample_answer(*question_id)
                    .await?
                    .is_some_and(|sample| sample.source == SampleSource::Ai);
                if cached {
                    generated += 1;
                    info!(
                        question_id = %question_id,
                        progress = index + 1,
                        total = question_ids.len(),
                        "Sample answer saved"
                    );
                } else {
                    failed += 1;
                    warn!(question_id = %question_id, "Evaluator did not produce a sample answer");
                }
            }
            Err(e) => {
                failed += 1;
                warn!(question_id = %question_id, error = %e, "Failed to backfill question");
            }
        }

        if index + 1 < question_ids.len() {
            tokio::time::sleep(Duration::from_millis(cli.sleep_ms)).await;
        }
    }

    info!(generated, failed, "Backfill finished");
    Ok(())
}

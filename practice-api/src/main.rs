use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::Parser;
use practice_api::config::ApiConfig;
use practice_api::handlers::configure;
use practice_api::helpers::database::initialize_database;
use practice_api::helpers::logging::init_logging;
use practice_api::helpers::orchestrator::create_orchestrator;
use practice_api::storage::SqlitePracticeStorage;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "practice-api")]
#[command(about = "Practice session API for mock interviews", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_path) = ApiConfig::load(cli.config.as_deref())?;
    let _log_guard = init_logging(&config.logging)?;
    info!(path = %config_path.display(), "Loaded configuration");

    let db = initialize_database(&config.database.path)?;
    let storage = Arc::new(SqlitePracticeStorage::new(db));
    let orchestrator = web::Data::new(create_orchestrator(&config, storage)?);
    info!(evaluator = %config.evaluator.base_url, "Evaluator configured");

    let allowed_origins = config
        .cors
        .as_ref()
        .map(|cors| cors.allowed_origins.clone())
        .unwrap_or_default();

    let bind_addr = config.bind_address();
    info!("Starting practice-api server at http://{}", bind_addr);

    HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(orchestrator.clone())
            .configure(configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}

use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use std::sync::Arc;
use supply_match::config::{LogFormat, LoggingSettings, Settings};
use supply_match::core::MatchingEngine;
use supply_match::models::ScoringWeights;
use supply_match::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use supply_match::services::PostgresCatalog;
use tracing::{info, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber; `RUST_LOG` overrides the configured level
fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer().with_target(false)).init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration; logging falls back to defaults so a bad file is still reported
    let settings = Settings::load();
    let logging = settings
        .as_ref()
        .map(|settings| settings.logging.clone())
        .unwrap_or_default();

    init_logging(&logging);

    info!("Starting Supply Match service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    info!("Configuration loaded successfully");

    // Initialize PostgreSQL catalog
    let db_max_conn = settings.database.max_connections.unwrap_or(10);

    let catalog = PostgresCatalog::from_settings(
        &settings.database.url,
        Some(db_max_conn),
        settings.database.min_connections,
        settings.database.acquire_timeout_secs,
        settings.database.idle_timeout_secs,
    )
    .await
    .map_err(|e| {
        error!("Failed to connect to PostgreSQL: {}", e);
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e)
    })?;

    info!("PostgreSQL catalog initialized (max: {} connections)", db_max_conn);

    // Initialize matching engine with configured limits and weights
    let matching_config = settings.matching.matching_config();
    let weights = ScoringWeights::from(&settings.scoring.weights);
    let engine = MatchingEngine::new(matching_config, weights);

    info!("Matching engine initialized: {:?}, weights: {:?}", matching_config, weights);

    // Build application state
    let app_state = AppState {
        catalog: Arc::new(catalog),
        engine,
        default_limit: settings.matching.default_limit,
        max_limit: settings.matching.max_limit,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use postwright::api::build_router;
use postwright::app_state::AppState;
use postwright::config::AppConfig;
use postwright::llm::GeminiClient;
use postwright::repository::PostgresRepository;
use postwright::search::{GoogleSearch, SearchConfig};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env().context("failed to read configuration")?;

    let repository = PostgresRepository::connect(&config.database_url, config.database_max_connections)
        .await
        .context("failed to connect to the database")?;
    repository
        .migrate()
        .await
        .context("failed to run database migrations")?;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()
        .context("failed to build HTTP client")?;
    let llm = GeminiClient::new(
        http.clone(),
        config.endpoints.gemini.clone(),
        config.google_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_max_output_tokens,
    );
    let search = GoogleSearch::new(
        http.clone(),
        config.endpoints.google_search.clone(),
        SearchConfig {
            max_results: config.search_max_results,
            ..SearchConfig::google(config.google_api_key.clone(), config.search_engine_id.clone())
        },
    );

    let state = AppState::new(
        &config,
        http,
        Arc::new(repository),
        Arc::new(llm),
        Arc::new(search),
    );
    let app = build_router(state).layer(TraceLayer::new_for_http());

    info!(address = %config.bind_address, "starting postwright");
    axum::Server::bind(&config.bind_address)
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}

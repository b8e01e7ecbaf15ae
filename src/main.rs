use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use venue_finder::{config::AppConfig, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("venue_finder=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env();
    let state = std::sync::Arc::new(AppState::from_config(&config));

    let app = routes::create_router(&config.assets).with_state(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;

    info!("venue finder running at http://{}:{}", config.host, config.port);
    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}

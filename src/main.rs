use axum::routing::{get, post, put};
use axum::Router;
use tracing_subscriber::EnvFilter;

use bitext_align::api;
use bitext_align::config::Config;
use bitext_align::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!(
        "Encoder provider: {} ({})",
        config.encoder.provider,
        config.encoder.base_url
    );
    tracing::info!(
        "Search: k={}, memory budget {} MiB, parallel={}",
        config.search.max_neighbors,
        config.search.memory_budget_bytes / (1024 * 1024),
        config.search.parallel
    );

    let state = AppState::new(config.clone())?;

    let app = Router::new()
        .route("/api/align", post(api::align::align_text))
        .route("/api/config", get(api::config::get_config))
        .route("/api/config", put(api::config::update_config))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

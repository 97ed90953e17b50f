use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use programme_api::config::Config;
use programme_api::llm_client::{self, LlmClient};
use programme_api::routes::build_router;
use programme_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("programme_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting programme API v{}", env!("CARGO_PKG_VERSION"));

    if config.claude_api_key.is_none() {
        // Boot anyway: generation requests answer 500 `Clé API manquante`.
        warn!("CLAUDE_API_KEY is not set, generation requests will fail");
    }

    let llm = LlmClient::new(config.claude_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        llm,
        config: config.clone(),
    };

    // Open CORS is part of the endpoint contract: every response carries
    // permissive headers and preflight is answered with 200.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

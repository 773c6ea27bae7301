mod completion_client;
mod config;
mod errors;
mod routes;
mod scholarships;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::completion_client::CompletionClient;
use crate::config::Config;
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so the log level is known
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Scholarship Finder API v{} ({})",
        env!("CARGO_PKG_VERSION"),
        config.app_env
    );

    // Initialize completion client
    let completion = CompletionClient::new(&config)?;
    info!(
        "Completion client initialized (model: {}, timeout: {}s)",
        completion.model(),
        config.completion_timeout_secs
    );
    if config.completion_api_key.is_none() {
        warn!("COMPLETION_API_KEY is not set; searches will fail until it is configured");
    }

    let state = AppState::new(Arc::new(completion), config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

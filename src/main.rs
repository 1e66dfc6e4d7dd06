//! Chat dispatch service
//!
//! Answers chat input from a keyword rule catalog when it can and forwards
//! everything else to a remote answer service, keeping the conversation and
//! its feedback state for the UI.

mod api;
mod config;
mod conversation;
mod remote;
mod rules;

use api::{create_router, AppState};
use config::AppConfig;
use conversation::ConversationController;
use remote::{HttpFeedbackService, HttpQueryService, LoggingQueryClient};
use rules::RuleSet;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_dispatch=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = AppConfig::from_env();

    // Rule catalog is read once; a broken catalog stops startup
    let ruleset = Arc::new(RuleSet::load(&config.rules_path)?);

    // Remote collaborators share one HTTP client
    let http = reqwest::Client::builder()
        .timeout(config.remote.timeout)
        .build()?;
    let query_client = Arc::new(LoggingQueryClient::new(Arc::new(HttpQueryService::new(
        http.clone(),
        config.remote.query_url.clone(),
    ))));
    let feedback_sink = Arc::new(HttpFeedbackService::new(
        http,
        config.remote.feedback_url.clone(),
    ));

    tracing::info!(
        query_url = %config.remote.query_url,
        feedback_url = %config.remote.feedback_url,
        timeout_secs = config.remote.timeout.as_secs(),
        "Remote collaborators configured"
    );

    let controller = Arc::new(ConversationController::new(
        ruleset,
        query_client,
        feedback_sink,
    ));
    let state = AppState::new(controller);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new().gzip(true).br(true);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(compression);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Chat dispatch listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

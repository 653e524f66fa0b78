//! MindHaven support API — student support REST server.
//!
//! Provides endpoints for message classification (two-tier: Bedrock model
//! with rule-based fallback), support tickets, appointments, resources,
//! notifications, and feedback.

use std::sync::Arc;

use aws_sdk_bedrockruntime::Client as BedrockClient;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use mh_support_api::classify::{BedrockClassifier, BedrockConfig};
use mh_support_api::config::ApiConfig;
use mh_support_api::state::AppState;
use mh_support_api::{db, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "mh-support-api starting");

    let config = ApiConfig::from_env();

    // Connect to PostgreSQL if DATABASE_URL is set, otherwise use in-memory state.
    let mut state = if let Ok(database_url) = std::env::var("DATABASE_URL") {
        tracing::info!("connecting to PostgreSQL");
        let pool = db::connect(&database_url).await?;
        AppState::with_pool(pool)
    } else {
        tracing::warn!("DATABASE_URL not set — using in-memory state");
        AppState::new()
    };

    state = state.with_jwt_secret(&config.jwt_secret);

    if config.bedrock_enabled {
        tracing::info!("Bedrock remote classifier enabled");
        let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        let client = BedrockClient::new(&aws_config);
        let remote = BedrockClassifier::new(client, BedrockConfig::from_env());
        state = state.with_remote(Arc::new(remote));
    }

    let app = routes::build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}

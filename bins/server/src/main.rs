//! Tripsplit API Server
//!
//! Main entry point for the Tripsplit settlement service.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tripsplit_api::{AppState, create_router};
use tripsplit_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tripsplit=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    info!(
        manual_split_tolerance = %config.settlement.manual_split_tolerance,
        settled_threshold = %config.settlement.settled_threshold,
        external_payer_policy = ?config.settlement.external_payer_policy,
        "Settlement configured"
    );

    // Create router
    let app = create_router(AppState::from_config(&config));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes over the settlement core
//! - Request and response DTOs
//! - Error-to-response mapping
//!
//! The API is stateless: callers post a trip snapshot and receive derived
//! balances or debts. Nothing is persisted.

pub mod error;
pub mod extractors;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::Uri;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tripsplit_core::settlement::SettlementSettings;
use tripsplit_shared::{AppConfig, AppError};

use crate::error::ApiError;

/// Default request body limit (2 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Settlement tolerances and policies, fixed at startup.
    pub settings: Arc<SettlementSettings>,
    /// Largest accepted request body in bytes.
    pub body_limit_bytes: usize,
}

impl AppState {
    /// Builds the state from loaded configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            settings: Arc::new(SettlementSettings::from(&config.settlement)),
            body_limit_bytes: config.server.body_limit_bytes,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            settings: Arc::new(SettlementSettings::default()),
            body_limit_bytes: DEFAULT_BODY_LIMIT,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.body_limit_bytes;

    Router::new()
        .nest("/api/v1", routes::api_routes())
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn not_found(uri: Uri) -> ApiError {
    AppError::NotFound(format!("No route for {}", uri.path())).into()
}

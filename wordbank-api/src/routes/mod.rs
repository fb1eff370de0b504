//! REST API Routes Module
//!
//! This module contains all REST API route handlers organized by entity type.
//!
//! Includes:
//! - User and vocabulary routes under /api/*
//! - Health check endpoints (Kubernetes-compatible)
//! - CORS support for browser-based clients

pub mod health;
pub mod user;
pub mod vocab;

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::db::DbClient;
use crate::telemetry::observability_middleware;

// Re-export route creation functions for convenience
pub use health::create_router as health_router;
pub use user::create_router as user_router;
pub use vocab::create_router as vocab_router;

// ============================================================================
// CORS
// ============================================================================

/// Build CORS layer from API configuration.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.allows_any_origin() {
        tracing::info!("CORS: Development mode - allowing all origins");
        cors.allow_origin(Any).allow_headers(Any)
    } else {
        tracing::info!(
            "CORS: allowing origins: {:?}",
            config.cors_origins
        );
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!(origin = %o, "Ignoring unparsable CORS origin");
                    None
                }
            })
            .collect();
        cors.allow_origin(origins)
    }
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the complete API router.
///
/// - User routes under /api/user
/// - Vocabulary routes under /api/vocab
/// - Health checks at /health/*
///
/// Every request passes through the observability middleware and the CORS
/// layer.
pub fn create_api_router(db: DbClient, api_config: &ApiConfig) -> Router {
    let api_routes = Router::new()
        .nest("/user", user::create_router(db.clone()))
        .nest("/vocab", vocab::create_router(db.clone()));

    let router = Router::new()
        .nest("/api", api_routes)
        .nest("/health", health::create_router(db));

    router
        .layer(from_fn(observability_middleware))
        .layer(build_cors_layer(api_config))
}

//! Wordbank API Server Entry Point
//!
//! Bootstraps configuration, builds the MySQL pool and starts the Axum
//! HTTP server.

use std::net::SocketAddr;

use axum::Router;
use wordbank_api::telemetry::{init_tracer, TelemetryConfig};
use wordbank_api::{create_api_router, ApiConfig, ApiError, ApiResult, DbClient, DbConfig};

#[tokio::main]
async fn main() -> ApiResult<()> {
    let telemetry_config = TelemetryConfig::from_env();
    init_tracer(&telemetry_config)?;

    let db_config = DbConfig::from_env();
    tracing::debug!(config = ?db_config, "Database configuration loaded");
    let db = DbClient::from_config(&db_config)?;

    let api_config = ApiConfig::from_env();
    let app: Router = create_api_router(db, &api_config);

    let addr = resolve_bind_addr()?;
    tracing::info!(%addr, "Starting Wordbank API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("Wordbank API server stopped");
    Ok(())
}

fn resolve_bind_addr() -> ApiResult<SocketAddr> {
    let host = std::env::var("WORDBANK_API_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port_str = std::env::var("PORT")
        .ok()
        .or_else(|| std::env::var("WORDBANK_API_PORT").ok())
        .unwrap_or_else(|| "3000".to_string());
    let port = port_str
        .parse::<u16>()
        .map_err(|_| ApiError::validation_failed(format!("Invalid port value: {}", port_str)))?;

    let addr = format!("{}:{}", host, port);
    addr.parse::<SocketAddr>()
        .map_err(|e| ApiError::validation_failed(format!("Invalid bind address {}: {}", addr, e)))
}

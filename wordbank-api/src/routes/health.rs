//! Liveness and readiness checks, mounted under /health.
//!
//! Readiness pings MySQL through the gateway. A failed ping answers with
//! the regular error body (`SERVICE_UNAVAILABLE`, 503) so load balancers
//! and humans read the same shape.

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::db::DbClient;
use crate::error::{ApiError, ApiResult};

/// Body of a successful health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    /// Round trip of the database ping; only set by readiness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_latency_ms: Option<u64>,
    pub version: String,
}

impl HealthReport {
    fn healthy(database_latency_ms: Option<u64>) -> Self {
        Self {
            status: "healthy".to_string(),
            database_latency_ms,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

async fn ping() -> &'static str {
    "pong"
}

async fn live() -> Json<HealthReport> {
    Json(HealthReport::healthy(None))
}

async fn ready(State(db): State<DbClient>) -> ApiResult<Json<HealthReport>> {
    let started = Instant::now();

    match db.health_check().await {
        Ok(()) => {
            let latency = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            Ok(Json(HealthReport::healthy(Some(latency))))
        }
        Err(err) => {
            tracing::warn!(error = %err.message, "Readiness check failed");
            Err(ApiError::service_unavailable("Database is not reachable")
                .with_details(serde_json::json!({ "database": err.message })))
        }
    }
}

/// Create the health router.
pub fn create_router(db: DbClient) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/live", get(live))
        .route("/ready", get(ready))
        .with_state(db)
}

use std::time::Instant;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use welfare_core::types::Timestamp;

use crate::state::AppState;

/// Root banner payload.
#[derive(Serialize)]
pub struct BannerResponse {
    pub message: &'static str,
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// Health check response payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `OK` when the database answers, `DEGRADED` otherwise.
    pub status: &'static str,
    pub timestamp: Timestamp,
    /// Seconds since the process started.
    pub uptime: f64,
    pub db_healthy: bool,
}

/// GET / -- identifies the API.
async fn banner() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "Welfare Organization API",
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = welfare_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Health check could not reach the database");
    }

    Json(HealthResponse {
        status: if db_healthy { "OK" } else { "DEGRADED" },
        timestamp: Utc::now(),
        uptime: uptime_secs(state.started_at),
        db_healthy,
    })
}

fn uptime_secs(started_at: Instant) -> f64 {
    started_at.elapsed().as_secs_f64()
}

/// Mount the banner and health check (root level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health_check))
}

//! Health check endpoint — for load balancers, monitoring, and container health checks.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    uptime_secs: Option<u64>,
}

/// Health check router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_check))
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    // Check database connectivity
    let db_ok = tourdb_db::postgres::health_check(&state.db.pg).await;

    Json(HealthResponse {
        status: if db_ok { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: Some(state.started_at.elapsed().as_secs()),
    })
}

/// Health probe for a server running without a connection string.
pub async fn unconfigured() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "unconfigured",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: None,
    })
}

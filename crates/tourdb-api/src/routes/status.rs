//! Database status probe.
//!
//! `GET /api/db-status` never fails at the HTTP level: an unreachable
//! database is reported as `{connected: false, error}` with status 200.

use axum::{Json, Router, extract::State, routing::get};
use std::sync::Arc;
use tourdb_common::models::DbStatus;
use tourdb_db::postgres;

use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/db-status", get(db_status))
}

/// GET /api/db-status — connectivity and the current public table list.
async fn db_status(State(state): State<Arc<AppState>>) -> Json<DbStatus> {
    match postgres::list_public_tables(&state.db.pg).await {
        Ok(mut tables) => {
            tables.sort();
            tracing::debug!(tables = tables.len(), "Database status: connected");
            Json(DbStatus::connected(tables))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Database status: unreachable");
            Json(DbStatus::disconnected(postgres::describe(&e)))
        }
    }
}

//! Schema application over HTTP.

use axum::{Json, Router, extract::State, routing::post};
use std::sync::Arc;
use tourdb_common::error::TourdbResult;
use tourdb_common::models::ApplySchemaResponse;
use tourdb_db::applier;

use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/apply-schema", post(apply_schema))
}

/// POST /api/apply-schema — run the server-side schema file and report.
///
/// Runs are serialized by `AppState::apply_guard`. Failures render as
/// HTTP 500 `{success: false, error}`.
async fn apply_schema(
    State(state): State<Arc<AppState>>,
) -> TourdbResult<Json<ApplySchemaResponse>> {
    let _guard = state.apply_guard.lock().await;

    let report = applier::apply_pooled(&state.db.pg, &state.schema_path).await?;
    Ok(Json(report.into()))
}

//! # tourdb-api
//!
//! HTTP layer for tourdb. Serves the status dashboard, the database status
//! probe, and the apply-schema command. When no connection string is
//! configured, [`build_unconfigured_router`] serves only a diagnostic page.

pub mod pages;
pub mod routes;

use axum::{Router, response::Html, routing::get};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tourdb_common::config::EnvVarStatus;
use tourdb_db::Database;

/// Shared application state available to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    /// Server-side schema file run by `POST /api/apply-schema`.
    pub schema_path: PathBuf,
    /// Connection target with the password masked, shown on the dashboard.
    pub database_label: String,
    /// Held for the whole of a schema run; concurrent runs queue behind it.
    pub apply_guard: Arc<Mutex<()>>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(db: Database, schema_path: PathBuf, database_label: String) -> Self {
        Self {
            db,
            schema_path,
            database_label,
            apply_guard: Arc::new(Mutex::new(())),
            started_at: Instant::now(),
        }
    }
}

/// Build the complete router for a configured server.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::dashboard::router())
        .merge(routes::status::router())
        .merge(routes::schema::router())
        .merge(routes::health::router())
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Router for a server started without a connection string: a diagnostic page
/// on `/` and the health probe. The `/api/*` routes are not registered.
pub fn build_unconfigured_router(diagnostics: &[EnvVarStatus]) -> Router {
    let page = pages::diagnostic_page(diagnostics);

    Router::new()
        .route(
            "/",
            get(move || {
                let page = page.clone();
                async move { Html(page) }
            }),
        )
        .route("/health", get(routes::health::unconfigured))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

//! `GET /` — the HTML status dashboard.

use axum::{Router, extract::State, response::Html, routing::get};
use std::sync::Arc;

use crate::{AppState, pages};

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(dashboard))
}

async fn dashboard(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(pages::dashboard_page(&state.database_label))
}

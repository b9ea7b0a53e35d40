//! Settings API

use std::sync::Arc;

use axum::{Json, Router, extract::State, extract::rejection::JsonRejection, routing::get};
use shared::AppResult;
use shared::models::Settings;

use super::json_body;
use crate::state::AppState;

pub(super) fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/settings", get(fetch).put(replace))
}

/// GET /api/settings
async fn fetch(State(state): State<Arc<AppState>>) -> Json<Settings> {
    Json(state.settings().await)
}

/// PUT /api/settings
///
/// Only settings that form a valid ordering policy are stored.
async fn replace(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Settings>, JsonRejection>,
) -> AppResult<Json<Settings>> {
    let settings = json_body(payload)?;
    let policy = settings.policy()?;

    let saved = state.replace_settings(settings).await;
    tracing::info!(mode = %policy.cutoff.mode(), "Settings updated");
    Ok(Json(saved))
}

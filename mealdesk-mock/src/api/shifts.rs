//! Shift API

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    routing::{get, put},
};
use serde::Deserialize;
use shared::AppResult;
use shared::models::{Shift, ShiftList, ShiftPayload};

use super::json_body;
use crate::state::AppState;

pub(super) fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/shifts", get(list).post(create))
        .route("/api/shifts/{id}", put(update))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    #[serde(default)]
    include_inactive: bool,
}

/// GET /api/shifts
async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Json<ShiftList> {
    let shifts = state.list_shifts(query.include_inactive).await;
    Json(ShiftList { shifts })
}

/// POST /api/shifts
async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ShiftPayload>, JsonRejection>,
) -> AppResult<Json<Shift>> {
    let payload = json_body(payload)?;
    payload.validate()?;

    let shift = state.create_shift(payload).await;
    tracing::info!(id = %shift.id, name = %shift.name, "Shift created");
    Ok(Json(shift))
}

/// PUT /api/shifts/{id}
async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<ShiftPayload>, JsonRejection>,
) -> AppResult<Json<Shift>> {
    let payload = json_body(payload)?;
    payload.validate()?;

    let shift = state.update_shift(&id, payload).await?;
    tracing::info!(id = %shift.id, active = shift.is_active, "Shift updated");
    Ok(Json(shift))
}

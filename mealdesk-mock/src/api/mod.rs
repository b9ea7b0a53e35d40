//! Admin REST API

mod settings;
mod shifts;

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::rejection::JsonRejection;
use shared::{AppError, AppResult};

use crate::state::AppState;

/// Router with every admin route and the state attached
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(shifts::router())
        .merge(settings::router())
        .with_state(state)
}

/// Turn a JSON extractor rejection into an `ApiResponse` error body
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|e| AppError::invalid_request(e.body_text()))
}

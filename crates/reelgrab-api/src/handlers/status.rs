use crate::state::AppState;
use axum::{extract::State, Json};
use reelgrab_core::StatusResponse;
use std::sync::Arc;

/// Liveness probe - process is running.
#[utoipa::path(
    get,
    path = "/api/status",
    tag = "status",
    responses(
        (status = 200, description = "Service is online", body = StatusResponse)
    )
)]
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse::online(state.config.service_name.clone()))
}

//! Download route group.

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub fn download_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/download", API_PREFIX),
            post(handlers::download::download_video),
        )
        .route(
            &format!("{}/video/{{download_id}}", API_PREFIX),
            get(handlers::video::get_video),
        )
        .route(
            &format!("{}/status", API_PREFIX),
            get(handlers::status::get_status),
        )
}

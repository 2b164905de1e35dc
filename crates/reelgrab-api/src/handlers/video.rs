use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Response, StatusCode},
    response::IntoResponse,
};
use futures::StreamExt;
use reelgrab_core::AppError;
use std::sync::Arc;

/// `attachment` disposition with a header-safe file name.
fn content_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c == ' ' || c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect();
    format!("attachment; filename=\"{}\"", safe)
}

#[utoipa::path(
    get,
    path = "/api/video/{download_id}",
    tag = "downloads",
    params(
        ("download_id" = String, Path, description = "Download ID returned by POST /api/download")
    ),
    responses(
        (status = 200, description = "Video file", content_type = "application/octet-stream"),
        (status = 404, description = "Download or video file not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_video"))]
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    Path(download_id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let video = state.downloads.retrieve(&download_id).await?;
    let stream = state.downloads.open(&video).await?;

    tracing::debug!(
        download_id = %video.download_id,
        file_name = %video.file_name,
        size_bytes = video.size_bytes,
        "Streaming video file"
    );

    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, video.content_type)
        .header(header::CONTENT_LENGTH, video.size_bytes)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(&video.file_name),
        )
        .header(header::CACHE_CONTROL, "no-store")
        .body(Body::from_stream(body_stream))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use reelgrab_core::constants::URL_REQUIRED;
use reelgrab_core::{AppError, DownloadRequest, DownloadResponse};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/download",
    tag = "downloads",
    request_body = DownloadRequest,
    responses(
        (status = 200, description = "Video downloaded", body = DownloadResponse),
        (status = 400, description = "Missing URL, invalid body, or the post could not be downloaded", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "download_video"))]
pub async fn download_video(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<DownloadRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let url = request
        .url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| AppError::InvalidInput(URL_REQUIRED.to_string()))?;

    let outcome = state.downloads.submit(url).await?;

    if !outcome.success {
        let code = outcome
            .error_kind
            .map(|kind| kind.code())
            .unwrap_or("EXTRACTION_FAILED");
        return Err(AppError::Extraction {
            code,
            message: outcome.message,
        }
        .into());
    }

    Ok((
        StatusCode::OK,
        Json(DownloadResponse {
            success: true,
            download_id: outcome.download_id,
            message: outcome.message,
        }),
    ))
}

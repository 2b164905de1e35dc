//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use reelgrab_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reelgrab API",
        version = "0.1.0",
        description = "Downloads the video of a public Instagram post, reel or tv URL and serves it back as a file. Downloads are temporary: a retention sweep removes every stored download on a fixed schedule."
    ),
    paths(
        handlers::download::download_video,
        handlers::video::get_video,
        handlers::status::get_status,
    ),
    components(schemas(
        models::DownloadRequest,
        models::DownloadResponse,
        models::StatusResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "downloads", description = "Submit downloads and fetch their video files"),
        (name = "status", description = "Service liveness")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

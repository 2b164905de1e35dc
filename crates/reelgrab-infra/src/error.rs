//! HTTP error response body
//!
//! Note: IntoResponse for AppError lives in reelgrab-api due to Rust's orphan rule:
//! external traits (axum::IntoResponse) for external types (reelgrab_core::AppError)
//! cannot be implemented here.

use reelgrab_core::{AppError, ErrorMetadata};
use serde::Serialize;
use utoipa::ToSchema;

/// Standard error response format for HTTP APIs
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

impl ErrorResponse {
    /// Build the body for `error`. Details and the error type are only included outside
    /// production and for errors that are not sensitive.
    pub fn from_app_error(error: &AppError, production: bool) -> Self {
        let expose = !production && !error.is_sensitive();
        Self {
            error: error.client_message(),
            details: expose.then(|| error.detailed_message()),
            error_type: expose.then(|| error.error_type().to_string()),
            code: error.error_code().to_string(),
            recoverable: error.is_recoverable(),
            suggested_action: error.suggested_action().map(String::from),
        }
    }
}

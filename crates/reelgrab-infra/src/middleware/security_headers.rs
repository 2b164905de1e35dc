use axum::extract::{Request, State};
use axum::http::{header, HeaderValue};
use axum::{middleware::Next, response::Response};

/// Settings for [`security_headers_middleware`], passed as middleware state.
#[derive(Clone, Copy, Debug, Default)]
pub struct SecurityHeaders {
    /// Send `Strict-Transport-Security`; only meaningful behind HTTPS in production.
    pub hsts: bool,
}

/// The API serves JSON and file attachments; the docs viewer loads its script from a CDN.
const API_CSP: &str = "default-src 'none'; frame-ancestors 'none'";
const DOCS_PATH_PREFIX: &str = "/docs";

/// Security headers middleware
/// Adds security headers to all HTTP responses
pub async fn security_headers_middleware(
    State(settings): State<SecurityHeaders>,
    request: Request,
    next: Next,
) -> Response {
    let is_docs = request.uri().path().starts_with(DOCS_PATH_PREFIX);
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(header::REFERRER_POLICY, HeaderValue::from_static("no-referrer"));

    if settings.hsts {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    if !is_docs {
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(API_CSP),
        );
    }

    response
}

//! API-level constants.

/// Prefix shared by every API route.
pub const API_PREFIX: &str = "/api";

/// Path of the served OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/api/openapi.json";

/// Path of the RapiDoc viewer.
pub const DOCS_PATH: &str = "/docs";

/// Download requests carry a single URL; anything larger is rejected before parsing.
pub const MAX_REQUEST_BODY_BYTES: usize = 16 * 1024;

//! Reelgrab Infrastructure Library
//!
//! Shared infrastructure components used by the API binary:
//! - Middleware (request ID, security headers)
//! - Telemetry initialization (stdout plus optional rolling log files)
//! - The JSON error body every failed request renders

pub mod error;
pub mod middleware;
pub mod telemetry;

pub use error::ErrorResponse;
pub use middleware::{
    get_request_id, request_id_middleware, security_headers_middleware, RequestId,
    SecurityHeaders,
};
pub use telemetry::{init_telemetry, TelemetryGuard};

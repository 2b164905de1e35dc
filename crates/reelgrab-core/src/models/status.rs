use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Liveness probe body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
    pub service: String,
}

impl StatusResponse {
    pub fn online(service: impl Into<String>) -> Self {
        Self {
            status: "online".to_string(),
            service: service.into(),
        }
    }
}

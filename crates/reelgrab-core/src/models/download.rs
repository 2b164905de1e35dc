use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Identifier of one download; also the name of its storage directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DownloadId(Uuid);

impl DownloadId {
    /// Generate a fresh random identifier. Uniqueness relies on UUID v4 entropy and
    /// is not checked against existing directories.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DownloadId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for DownloadId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for DownloadId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Body of `POST /api/download`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct DownloadRequest {
    /// Post URL, e.g. `https://www.instagram.com/reel/ABC123/`
    #[serde(default)]
    pub url: Option<String>,
}

/// Successful download response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DownloadResponse {
    pub success: bool,
    #[schema(value_type = String, format = Uuid)]
    pub download_id: DownloadId,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_id_round_trips_through_string() {
        let id = DownloadId::new();
        let parsed: DownloadId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_download_id_rejects_path_like_input() {
        assert!("../etc".parse::<DownloadId>().is_err());
        assert!("".parse::<DownloadId>().is_err());
    }

    #[test]
    fn test_download_response_shape() {
        let response = DownloadResponse {
            success: true,
            download_id: DownloadId::new(),
            message: "Video downloaded successfully".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert!(json["download_id"].is_string());
        assert_eq!(json["message"], "Video downloaded successfully");
    }

    #[test]
    fn test_download_request_missing_url_defaults_to_none() {
        let request: DownloadRequest = serde_json::from_str("{}").unwrap();
        assert!(request.url.is_none());
    }
}

//! Extraction error taxonomy

use thiserror::Error;

/// Why an extraction attempt produced no video.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The URL has no recognizable post reference. Raised before any process or
    /// network activity.
    #[error("Could not extract post shortcode from URL")]
    InvalidPostUrl,

    /// The post was resolved but holds no video media.
    #[error("The Instagram post does not contain a video")]
    NoVideo,

    /// The remote service or the extraction tool reported a failure (network, rate
    /// limit, private or removed post).
    #[error("Instagram download error: {0}")]
    Upstream(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Payload-free classification of an [`ExtractError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractErrorKind {
    InvalidPostUrl,
    NoVideo,
    Upstream,
    Unexpected,
}

impl ExtractErrorKind {
    /// Machine-readable code surfaced in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ExtractErrorKind::InvalidPostUrl => "INVALID_POST_URL",
            ExtractErrorKind::NoVideo => "NO_VIDEO",
            ExtractErrorKind::Upstream => "UPSTREAM_ERROR",
            ExtractErrorKind::Unexpected => "EXTRACTION_FAILED",
        }
    }
}

impl ExtractError {
    pub fn kind(&self) -> ExtractErrorKind {
        match self {
            ExtractError::InvalidPostUrl => ExtractErrorKind::InvalidPostUrl,
            ExtractError::NoVideo => ExtractErrorKind::NoVideo,
            ExtractError::Upstream(_) => ExtractErrorKind::Upstream,
            ExtractError::Unexpected(_) => ExtractErrorKind::Unexpected,
        }
    }
}

impl From<std::io::Error> for ExtractError {
    fn from(err: std::io::Error) -> Self {
        ExtractError::Unexpected(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_client_contract() {
        assert_eq!(
            ExtractError::InvalidPostUrl.to_string(),
            "Could not extract post shortcode from URL"
        );
        assert_eq!(
            ExtractError::NoVideo.to_string(),
            "The Instagram post does not contain a video"
        );
        assert_eq!(
            ExtractError::Upstream("HTTP Error 404".into()).to_string(),
            "Instagram download error: HTTP Error 404"
        );
    }

    #[test]
    fn test_kinds_are_distinct() {
        let codes = [
            ExtractError::InvalidPostUrl.kind().code(),
            ExtractError::NoVideo.kind().code(),
            ExtractError::Upstream(String::new()).kind().code(),
            ExtractError::Unexpected(String::new()).kind().code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in codes.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}

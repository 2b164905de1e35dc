//! Post reference recognition

use regex::Regex;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::LazyLock;

use crate::error::ExtractError;

static POST_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"instagram\.com/(p|reels?|tv)/([^/?#\s]+)").expect("post reference regex")
});

/// Kind of content a post reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind {
    Post,
    Reel,
    Tv,
}

impl PostKind {
    fn path_segment(&self) -> &'static str {
        match self {
            PostKind::Post => "p",
            PostKind::Reel => "reel",
            PostKind::Tv => "tv",
        }
    }
}

/// A recognized post reference: content kind plus content token (shortcode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostReference {
    pub kind: PostKind,
    pub shortcode: String,
}

impl PostReference {
    /// Find the first post reference in `url`.
    pub fn parse(url: &str) -> Result<Self, ExtractError> {
        let captures = POST_REFERENCE
            .captures(url)
            .ok_or(ExtractError::InvalidPostUrl)?;

        let kind = match &captures[1] {
            "p" => PostKind::Post,
            "tv" => PostKind::Tv,
            _ => PostKind::Reel,
        };

        Ok(Self {
            kind,
            shortcode: captures[2].to_string(),
        })
    }

    /// URL handed to the extraction tool. Rebuilt from the token so tracking
    /// parameters and odd hosts in the submitted URL never reach the tool.
    pub fn canonical_url(&self) -> String {
        format!(
            "https://www.instagram.com/{}/{}/",
            self.kind.path_segment(),
            self.shortcode
        )
    }
}

impl Display for PostReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{}", self.kind.path_segment(), self.shortcode)
    }
}

//! `yt-dlp` backed extractor
//!
//! Extraction runs in two tool invocations: a metadata probe (`--dump-single-json`)
//! that decides whether the post holds video at all, then the actual download into
//! the caller's directory with every side artifact (thumbnail, info JSON, comments,
//! subtitles, description) switched off.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Instant;
use tokio::process::Command;

use crate::error::ExtractError;
use crate::post::PostReference;
use crate::traits::{ExtractionReport, MediaExtractor};

/// Output template relative to the target directory; the tool names files after
/// the post's own media id.
const OUTPUT_TEMPLATE: &str = "%(id)s.%(ext)s";

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm", "mkv", "m4v"];

/// Container every download is merged or remuxed into, so the stored file always
/// carries an extension retrieval serves.
const OUTPUT_CONTAINER: &str = "mp4";

/// Message the tool's Instagram extractor emits for image-only posts.
const IMAGE_POST_MESSAGE: &str = "there is no video in this post";

#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Path or name of the `yt-dlp` binary
    pub binary: PathBuf,
    /// Arguments placed before every invocation's own arguments
    pub extra_args: Vec<String>,
    /// Netscape cookies file passed through `--cookies`, for posts behind a login wall
    pub cookies_file: Option<PathBuf>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("yt-dlp"),
            extra_args: Vec::new(),
            cookies_file: None,
        }
    }
}

/// Subset of the tool's JSON metadata that decides whether a post is downloadable.
#[derive(Debug, Deserialize)]
struct PostMetadata {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "_type", default)]
    kind: Option<String>,
    #[serde(default)]
    vcodec: Option<String>,
    #[serde(default)]
    ext: Option<String>,
    #[serde(default)]
    uploader: Option<String>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    entries: Vec<PostMetadata>,
}

impl PostMetadata {
    fn has_video(&self) -> bool {
        if self.kind.as_deref() == Some("playlist") {
            return self.entries.iter().any(PostMetadata::has_video);
        }
        match self.vcodec.as_deref() {
            Some("none") => false,
            Some(_) => true,
            None => self
                .ext
                .as_deref()
                .is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str())),
        }
    }

    fn owner(&self) -> Option<String> {
        self.uploader.clone().or_else(|| self.channel.clone())
    }
}

/// Production extractor driving the `yt-dlp` command line tool.
#[derive(Debug, Clone, Default)]
pub struct YtDlpExtractor {
    config: ExtractorConfig,
}

impl YtDlpExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.config.binary);
        command
            .args(&self.config.extra_args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(cookies) = &self.config.cookies_file {
            command.arg("--cookies").arg(cookies);
        }
        command
    }

    async fn run(&self, mut command: Command) -> Result<Output, ExtractError> {
        let output = command.output().await.map_err(|e| {
            ExtractError::Unexpected(format!(
                "failed to run {}: {}",
                self.config.binary.display(),
                e
            ))
        })?;

        if output.status.success() {
            Ok(output)
        } else {
            Err(classify_failure(
                &String::from_utf8_lossy(&output.stderr),
                output.status.code(),
            ))
        }
    }

    async fn probe(&self, post: &PostReference) -> Result<PostMetadata, ExtractError> {
        let mut command = self.command();
        command
            .arg("--dump-single-json")
            .arg("--skip-download")
            .arg("--no-warnings")
            .arg(post.canonical_url());

        let output = self.run(command).await?;
        serde_json::from_slice(&output.stdout)
            .map_err(|e| ExtractError::Unexpected(format!("unreadable post metadata: {}", e)))
    }

    async fn download(&self, post: &PostReference, target_dir: &Path) -> Result<(), ExtractError> {
        let mut command = self.command();
        command
            .arg("--no-warnings")
            .arg("--no-progress")
            .arg("--no-write-thumbnail")
            .arg("--no-write-info-json")
            .arg("--no-write-comments")
            .arg("--no-write-subs")
            .arg("--no-write-description")
            .arg("--merge-output-format")
            .arg(OUTPUT_CONTAINER)
            .arg("--remux-video")
            .arg(OUTPUT_CONTAINER)
            .arg("--output")
            .arg(target_dir.join(OUTPUT_TEMPLATE))
            .arg(post.canonical_url());

        self.run(command).await.map(drop)
    }
}

#[async_trait]
impl MediaExtractor for YtDlpExtractor {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    #[tracing::instrument(skip(self, target_dir), fields(extractor = "yt-dlp"))]
    async fn fetch(&self, url: &str, target_dir: &Path) -> Result<ExtractionReport, ExtractError> {
        let post = PostReference::parse(url).inspect_err(|_| {
            tracing::error!(url = %url, "Could not extract post shortcode from URL");
        })?;
        tracing::info!(shortcode = %post.shortcode, url = %url, "Extracted shortcode");

        let start = Instant::now();
        let metadata = self.probe(&post).await?;

        if !metadata.has_video() {
            tracing::warn!(url = %url, "The post does not contain a video");
            return Err(ExtractError::NoVideo);
        }

        let owner = metadata.owner();
        tracing::info!(
            shortcode = %post.shortcode,
            media_id = ?metadata.id,
            owner = ?owner,
            "Downloading video from post"
        );

        self.download(&post, target_dir).await?;
        let files_written = count_files(target_dir).await?;

        tracing::info!(
            shortcode = %post.shortcode,
            target_dir = %target_dir.display(),
            files_written,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Video downloaded successfully"
        );

        Ok(ExtractionReport {
            shortcode: post.shortcode,
            owner,
            files_written,
        })
    }
}

async fn count_files(dir: &Path) -> Result<usize, ExtractError> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut count = 0;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            count += 1;
        }
    }
    Ok(count)
}

/// Map a failed tool run to an error class. The tool reports image-only posts as an
/// error, so that exact message is recognized as [`ExtractError::NoVideo`]. Anything
/// else, including "No video formats found", is an upstream failure.
fn classify_failure(stderr: &str, exit_code: Option<i32>) -> ExtractError {
    let reason = stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| line.starts_with("ERROR:"))
        .map(|line| line.trim_start_matches("ERROR:").trim().to_string())
        .or_else(|| {
            stderr
                .lines()
                .rev()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(String::from)
        })
        .unwrap_or_else(|| match exit_code {
            Some(code) => format!("extractor exited with status {}", code),
            None => "extractor terminated by signal".to_string(),
        });

    if reason.to_lowercase().contains(IMAGE_POST_MESSAGE) {
        ExtractError::NoVideo
    } else {
        ExtractError::Upstream(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_video_detection() {
        let video: PostMetadata =
            serde_json::from_str(r#"{"id":"1","vcodec":"avc1.64001F","ext":"mp4"}"#).unwrap();
        assert!(video.has_video());

        let image: PostMetadata =
            serde_json::from_str(r#"{"id":"2","vcodec":"none","ext":"jpg"}"#).unwrap();
        assert!(!image.has_video());

        let ext_only: PostMetadata = serde_json::from_str(r#"{"id":"3","ext":"MP4"}"#).unwrap();
        assert!(ext_only.has_video());

        let carousel: PostMetadata = serde_json::from_str(
            r#"{"_type":"playlist","entries":[{"ext":"jpg","vcodec":"none"},{"ext":"mp4"}]}"#,
        )
        .unwrap();
        assert!(carousel.has_video());

        let empty_carousel: PostMetadata =
            serde_json::from_str(r#"{"_type":"playlist","entries":[]}"#).unwrap();
        assert!(!empty_carousel.has_video());
    }

    #[test]
    fn test_metadata_owner_falls_back_to_channel() {
        let meta: PostMetadata =
            serde_json::from_str(r#"{"ext":"mp4","channel":"someone"}"#).unwrap();
        assert_eq!(meta.owner().as_deref(), Some("someone"));
    }

    #[test]
    fn test_classify_failure_takes_last_error_line() {
        let stderr = "[Instagram] ABC: Setting up session\n\
                      ERROR: [Instagram] ABC: Requested content is not available, rate-limit reached\n";
        match classify_failure(stderr, Some(1)) {
            ExtractError::Upstream(msg) => {
                assert_eq!(
                    msg,
                    "[Instagram] ABC: Requested content is not available, rate-limit reached"
                )
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_failure_recognizes_image_posts() {
        let stderr = "ERROR: [Instagram] XYZ: There is no video in this post\n";
        assert!(matches!(
            classify_failure(stderr, Some(1)),
            ExtractError::NoVideo
        ));
    }

    #[test]
    fn test_classify_failure_keeps_missing_formats_upstream() {
        let stderr = "ERROR: [Instagram] ABC123: No video formats found!; please report this issue\n";
        match classify_failure(stderr, Some(1)) {
            ExtractError::Upstream(msg) => assert!(msg.contains("No video formats found")),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_failure_without_output() {
        match classify_failure("", Some(2)) {
            ExtractError::Upstream(msg) => assert!(msg.contains("status 2")),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_url_never_spawns_process() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = YtDlpExtractor::new(ExtractorConfig {
            binary: PathBuf::from("/nonexistent/yt-dlp"),
            ..ExtractorConfig::default()
        });

        let result = extractor
            .fetch("https://example.com/watch?v=1", dir.path())
            .await;
        assert!(matches!(result, Err(ExtractError::InvalidPostUrl)));
    }

    #[tokio::test]
    async fn test_missing_binary_is_unexpected_error() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = YtDlpExtractor::new(ExtractorConfig {
            binary: PathBuf::from("/nonexistent/yt-dlp"),
            ..ExtractorConfig::default()
        });

        let result = extractor
            .fetch("https://instagram.com/p/ABC123/", dir.path())
            .await;
        assert!(matches!(result, Err(ExtractError::Unexpected(_))));
    }

    /// Drives the extractor against a shell script standing in for the tool.
    #[cfg(unix)]
    mod scripted {
        use super::*;

        const FAKE_TOOL: &str = r#"
mode=download
out=""
container=mkv
while [ $# -gt 0 ]; do
  case "$1" in
    --dump-single-json) mode=probe ;;
    --output) shift; out="$1" ;;
    --remux-video) shift; container="$1" ;;
  esac
  shift
done
case "$FAKE_SCENARIO" in
  fail) echo "ERROR: [Instagram] ABC123: Login required" >&2; exit 1 ;;
esac
if [ "$mode" = probe ]; then
  if [ "$FAKE_SCENARIO" = image ]; then
    echo '{"id":"ABC123","vcodec":"none","ext":"jpg","uploader":"someone"}'
  else
    echo '{"id":"ABC123","vcodec":"h264","ext":"mp4","uploader":"someone"}'
  fi
  exit 0
fi
target=$(echo "$out" | sed 's/%(id)s/ABC123/; s/%(ext)s/'"$container"'/')
printf 'fake-video' > "$target"
"#;

        fn scripted_extractor(dir: &Path, scenario: &str) -> YtDlpExtractor {
            let script = dir.join("fake-yt-dlp.sh");
            std::fs::write(&script, format!("FAKE_SCENARIO={scenario}\n{FAKE_TOOL}")).unwrap();
            YtDlpExtractor::new(ExtractorConfig {
                binary: PathBuf::from("sh"),
                extra_args: vec![script.to_string_lossy().to_string()],
                cookies_file: None,
            })
        }

        /// The tool writes `.mkv` unless asked to remux, so the file name also
        /// checks the output container.
        #[tokio::test]
        async fn test_downloads_video_into_target_dir() {
            let tool_dir = tempfile::tempdir().unwrap();
            let target = tempfile::tempdir().unwrap();
            let extractor = scripted_extractor(tool_dir.path(), "video");

            let report = extractor
                .fetch("https://instagram.com/p/ABC123/", target.path())
                .await
                .unwrap();

            assert_eq!(report.shortcode, "ABC123");
            assert_eq!(report.owner.as_deref(), Some("someone"));
            assert_eq!(report.files_written, 1);
            let bytes = std::fs::read(target.path().join("ABC123.mp4")).unwrap();
            assert_eq!(bytes, b"fake-video");
        }

        #[tokio::test]
        async fn test_image_post_is_no_video() {
            let tool_dir = tempfile::tempdir().unwrap();
            let target = tempfile::tempdir().unwrap();
            let extractor = scripted_extractor(tool_dir.path(), "image");

            let result = extractor
                .fetch("https://instagram.com/p/ABC123/", target.path())
                .await;

            assert!(matches!(result, Err(ExtractError::NoVideo)));
            assert_eq!(std::fs::read_dir(target.path()).unwrap().count(), 0);
        }

        #[tokio::test]
        async fn test_tool_failure_is_upstream_error() {
            let tool_dir = tempfile::tempdir().unwrap();
            let target = tempfile::tempdir().unwrap();
            let extractor = scripted_extractor(tool_dir.path(), "fail");

            let result = extractor
                .fetch("https://instagram.com/reel/ABC123/", target.path())
                .await;

            match result {
                Err(ExtractError::Upstream(msg)) => assert!(msg.contains("Login required")),
                other => panic!("expected upstream error, got {other:?}"),
            }
        }
    }
}

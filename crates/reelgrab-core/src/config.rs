//! Configuration module
//!
//! Service configuration is read from the environment (after loading an optional
//! `.env` file). Every value has a default matching the behavior of the original
//! fixed-constant deployment, so an empty environment yields a working service.

use std::env;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_CLEANUP_HOURS, DEFAULT_DOWNLOADS_PATH, DEFAULT_PORT, DEFAULT_SERVICE_NAME,
    DEFAULT_VIDEO_EXTENSIONS, DEFAULT_YTDLP_PATH,
};

const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub http_concurrency_limit: usize,
    pub service_name: String,
    /// Root directory holding one subdirectory per download.
    pub downloads_path: PathBuf,
    /// Directory for rolling log files; stdout only when unset.
    pub log_dir: Option<PathBuf>,
    /// Lower-cased extensions (without dot) served by the video endpoint.
    pub video_extensions: Vec<String>,
    pub cleanup_enabled: bool,
    /// Hours of day (local time) at which the retention sweep fires.
    pub cleanup_hours: Vec<u32>,
    pub ytdlp_path: String,
    pub ytdlp_cookies_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_PORT,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            downloads_path: PathBuf::from(DEFAULT_DOWNLOADS_PATH),
            log_dir: None,
            video_extensions: DEFAULT_VIDEO_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            cleanup_enabled: true,
            cleanup_hours: DEFAULT_CLEANUP_HOURS.to_vec(),
            ytdlp_path: DEFAULT_YTDLP_PATH.to_string(),
            ytdlp_cookies_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or(defaults.environment);

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|s| split_list(&s))
            .unwrap_or(defaults.cors_origins);

        let server_port = match env::var("PORT") {
            Ok(port) => port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            Err(_) => defaults.server_port,
        };

        let video_extensions = env::var("VIDEO_EXTENSIONS")
            .map(|s| {
                split_list(&s)
                    .into_iter()
                    .map(|ext| ext.trim_start_matches('.').to_lowercase())
                    .collect()
            })
            .unwrap_or(defaults.video_extensions);

        let cleanup_hours = match env::var("CLEANUP_HOURS") {
            Ok(s) => parse_hours(&s)?,
            Err(_) => defaults.cleanup_hours,
        };

        Ok(Config {
            server_port,
            environment,
            cors_origins,
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(defaults.http_concurrency_limit)
                .max(1),
            service_name: env::var("SERVICE_NAME").unwrap_or(defaults.service_name),
            downloads_path: env::var("DOWNLOADS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.downloads_path),
            log_dir: env::var("LOG_DIR")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            video_extensions,
            cleanup_enabled: env::var("CLEANUP_ENABLED")
                .map(|s| parse_bool(&s))
                .unwrap_or(defaults.cleanup_enabled),
            cleanup_hours,
            ytdlp_path: env::var("YTDLP_PATH").unwrap_or(defaults.ytdlp_path),
            ytdlp_cookies_file: env::var("YTDLP_COOKIES_FILE")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("PORT cannot be 0"));
        }

        if self.video_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "VIDEO_EXTENSIONS must list at least one extension"
            ));
        }

        if self.cleanup_enabled {
            if self.cleanup_hours.is_empty() {
                return Err(anyhow::anyhow!(
                    "CLEANUP_HOURS must list at least one hour when cleanup is enabled"
                ));
            }
            if let Some(hour) = self.cleanup_hours.iter().find(|h| **h > 23) {
                return Err(anyhow::anyhow!(
                    "CLEANUP_HOURS contains {} which is outside 0-23",
                    hour
                ));
            }
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        Ok(())
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Parse a comma-separated list of hours, sorted and de-duplicated.
pub fn parse_hours(value: &str) -> Result<Vec<u32>, anyhow::Error> {
    let mut hours = split_list(value)
        .into_iter()
        .map(|s| {
            s.parse::<u32>()
                .map_err(|_| anyhow::anyhow!("CLEANUP_HOURS entry '{}' is not a number", s))
        })
        .collect::<Result<Vec<_>, _>>()?;
    hours.sort_unstable();
    hours.dedup();
    Ok(hours)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.server_port, 2500);
        assert_eq!(config.cleanup_hours, vec![3, 9, 15, 21]);
        assert_eq!(config.video_extensions, vec!["mp4", "mov"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_hours_sorts_and_dedups() {
        assert_eq!(parse_hours("21, 3,9,3").unwrap(), vec![3, 9, 21]);
        assert!(parse_hours("3,noon").is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_hour() {
        let config = Config {
            cleanup_hours: vec![3, 24],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_ignores_hours_when_cleanup_disabled() {
        let config = Config {
            cleanup_enabled: false,
            cleanup_hours: vec![],
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_wildcard_cors_rejected_in_production() {
        let config = Config {
            environment: "production".to_string(),
            ..Config::default()
        };
        assert!(config.is_production());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("1"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("nope"));
    }
}

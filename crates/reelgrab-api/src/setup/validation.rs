//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use reelgrab_core::Config;

/// Validate critical configuration values
///
/// Hard errors come from [`Config::validate`]; conditions that still allow the
/// service to run are logged as warnings.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if !config.is_production()
        && std::env::var("ENVIRONMENT")
            .or_else(|_| std::env::var("APP_ENV"))
            .is_err()
    {
        tracing::warn!("ENVIRONMENT/APP_ENV not set - running in development mode, error details are exposed");
    }

    if let Some(cookies) = &config.ytdlp_cookies_file {
        if !cookies.is_file() {
            tracing::warn!(
                path = %cookies.display(),
                "YTDLP_COOKIES_FILE does not exist - downloads of restricted posts will fail"
            );
        }
    }

    if !config.cleanup_enabled {
        tracing::warn!("Cleanup disabled - downloads accumulate until removed manually");
    }

    Ok(())
}

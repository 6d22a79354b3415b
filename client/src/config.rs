//! # Client Configuration
//!
//! Loaded from environment variables (after an optional `.env` file) and
//! validated once at startup.
//!
//! | Variable | Default |
//! |---|---|
//! | `CHECKFOOD_API_BASE_URL` | `http://127.0.0.1:8080/api/` |
//! | `CHECKFOOD_CONNECT_TIMEOUT_SECS` | `30` |
//! | `CHECKFOOD_REQUEST_TIMEOUT_SECS` | `30` |
//! | `CHECKFOOD_CACHE_DIR` | `<temp dir>/checkfood` |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::core::error::{AppError, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080/api/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration for the API gateway and the capture pipeline.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint path is joined onto. Always ends in `/`.
    pub api_base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Where captured images are written.
    pub cache_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            // Constant is a valid absolute URL
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).expect("default base URL parses"),
            connect_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_dir: env::temp_dir().join("checkfood"),
        }
    }
}

impl ClientConfig {
    /// Load configuration from `.env` and the process environment.
    pub fn from_env() -> Result<Self> {
        // A missing .env is normal
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let api_base_url = match env::var("CHECKFOOD_API_BASE_URL") {
            Ok(raw) => parse_base_url(&raw)?,
            Err(_) => defaults.api_base_url,
        };

        let connect_timeout = timeout_from_env("CHECKFOOD_CONNECT_TIMEOUT_SECS")?
            .unwrap_or(defaults.connect_timeout);
        let request_timeout = timeout_from_env("CHECKFOOD_REQUEST_TIMEOUT_SECS")?
            .unwrap_or(defaults.request_timeout);

        let cache_dir = env::var("CHECKFOOD_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.cache_dir);

        let config = Self {
            api_base_url,
            connect_timeout,
            request_timeout,
            cache_dir,
        };
        config.validate()?;
        Ok(config)
    }

    /// Point the client at a different server, keeping the other settings.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self> {
        self.api_base_url = parse_base_url(raw)?;
        Ok(self)
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.connect_timeout.is_zero() || self.request_timeout.is_zero() {
            return Err(AppError::Config("timeouts must be at least 1 second".to_string()));
        }
        Ok(())
    }
}

/// Parse and normalize a base URL: http(s) only, always a trailing `/` so
/// relative endpoint paths join under it instead of replacing its last segment.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };

    let url = Url::parse(&normalized)
        .map_err(|e| AppError::Config(format!("CHECKFOOD_API_BASE_URL is not a valid URL: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::Config(format!(
            "CHECKFOOD_API_BASE_URL must use http or https, got {other}"
        ))),
    }
}

fn timeout_from_env(name: &'static str) -> Result<Option<Duration>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|e| AppError::Config(format!("{name} must be a whole number of seconds: {e}"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let url = parse_base_url("http://10.0.2.2:8080/api").unwrap();
        assert_eq!(url.as_str(), "http://10.0.2.2:8080/api/");
        assert_eq!(
            url.join("auth/login").unwrap().as_str(),
            "http://10.0.2.2:8080/api/auth/login"
        );
    }

    #[test]
    fn test_base_url_rejects_other_schemes() {
        assert!(matches!(
            parse_base_url("ftp://example.com/api/"),
            Err(AppError::Config(_))
        ));
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let config = ClientConfig {
            connect_timeout: Duration::ZERO,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(ClientConfig::default().validate().is_ok());
    }
}

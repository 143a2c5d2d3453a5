//! Client configuration from the environment.
//!
//! Supported environment variables:
//! - STORYLOOM_API_URL: base URL of the story API (default `http://localhost:8000/api`)
//! - STORYLOOM_REQUEST_TIMEOUT_SECS: per-request HTTP timeout (default 30)
//! - STORYLOOM_JOB_POLL_MS: generation job polling interval (default 2000)

use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_JOB_POLL_MS: u64 = 2000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid API base URL '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: Url,
    pub request_timeout: Duration,
    pub job_poll_interval: Duration,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Malformed numbers fall back to their defaults; a malformed URL is an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base_url = parse_api_url(
            &lookup("STORYLOOM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        )?;
        let request_timeout = Duration::from_secs(positive_or(
            "STORYLOOM_REQUEST_TIMEOUT_SECS",
            lookup("STORYLOOM_REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        ));
        let job_poll_interval = Duration::from_millis(positive_or(
            "STORYLOOM_JOB_POLL_MS",
            lookup("STORYLOOM_JOB_POLL_MS"),
            DEFAULT_JOB_POLL_MS,
        ));

        Ok(Self {
            api_base_url,
            request_timeout,
            job_poll_interval,
        })
    }

    /// Overrides the base URL, e.g. from a command line flag.
    pub fn with_api_base_url(mut self, value: &str) -> Result<Self, ConfigError> {
        self.api_base_url = parse_api_url(value)?;
        Ok(self)
    }
}

fn parse_api_url(value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        value: value.to_string(),
        reason,
    };
    let url = Url::parse(value.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

fn positive_or(name: &str, raw: Option<String>, default: u64) -> u64 {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => value,
        _ => {
            tracing::warn!(val = %raw, default, "{name} is not a positive integer, ignoring");
            default
        }
    }
}

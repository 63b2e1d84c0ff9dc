//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Environment variable overriding `api.base_url`.
pub const ENV_API_URL: &str = "SPACENEWS_API_URL";

/// Environment variable overriding `api.access_token`.
pub const ENV_ACCESS_TOKEN: &str = "SPACENEWS_ACCESS_TOKEN";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream API connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Fallback page and page size for list views
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Query cache and retry behavior
    #[serde(default)]
    pub query: QueryConfig,

    /// Text rendering settings
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(ENV_API_URL).ok(),
            std::env::var(ENV_ACCESS_TOKEN).ok(),
        )
    }

    fn with_overrides(mut self, api_url: Option<String>, token: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.api.access_token = Some(token);
        }
        self
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let base = self.api.base_url.trim();
        if base.is_empty() {
            return Err(AppError::validation("API URL is not set"));
        }
        let parsed = url::Url::parse(base)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::validation(format!(
                "api.base_url must be http(s), got {}",
                parsed.scheme()
            )));
        }
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.pagination.default_page == 0 {
            return Err(AppError::validation("pagination.default_page must be > 0"));
        }
        if self.pagination.default_limit == 0 {
            return Err(AppError::validation(
                "pagination.default_limit must be > 0",
            ));
        }
        if self.query.capacity == 0 {
            return Err(AppError::validation("query.capacity must be > 0"));
        }
        Ok(())
    }
}

/// Upstream API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every resource path is joined onto
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Bearer token sent with every request when present
    #[serde(default)]
    pub access_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            access_token: None,
        }
    }
}

/// Defaults applied when the route carries no usable `page`/`limit`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationConfig {
    #[serde(default = "defaults::page")]
    pub default_page: u32,

    #[serde(default = "defaults::limit")]
    pub default_limit: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: defaults::page(),
            default_limit: defaults::limit(),
        }
    }
}

/// Query cache and retry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// How long a fetched result is served without refetching
    #[serde(default = "defaults::stale_time")]
    pub stale_time_secs: u64,

    /// How long an entry is kept at all
    #[serde(default = "defaults::gc_time")]
    pub gc_time_secs: u64,

    /// Maximum number of cached query results
    #[serde(default = "defaults::capacity")]
    pub capacity: usize,

    /// Retries after the first failed attempt
    #[serde(default = "defaults::retry")]
    pub retry: u32,

    #[serde(default = "defaults::retry_base_delay")]
    pub retry_base_delay_ms: u64,

    #[serde(default = "defaults::retry_max_delay")]
    pub retry_max_delay_ms: u64,
}

impl QueryConfig {
    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_time_secs)
    }

    pub fn gc_time(&self) -> Duration {
        Duration::from_secs(self.gc_time_secs)
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            stale_time_secs: defaults::stale_time(),
            gc_time_secs: defaults::gc_time(),
            capacity: defaults::capacity(),
            retry: defaults::retry(),
            retry_base_delay_ms: defaults::retry_base_delay(),
            retry_max_delay_ms: defaults::retry_max_delay(),
        }
    }
}

/// Text rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// chrono format for dates on cards
    #[serde(default = "defaults::date_format")]
    pub date_format: String,

    /// chrono format for timestamps on the detail view
    #[serde(default = "defaults::datetime_format")]
    pub datetime_format: String,

    /// Card summaries are clamped to this many characters
    #[serde(default = "defaults::summary_max_chars")]
    pub summary_max_chars: usize,

    /// Card titles are clamped to this many characters
    #[serde(default = "defaults::title_max_chars")]
    pub title_max_chars: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: defaults::date_format(),
            datetime_format: defaults::datetime_format(),
            summary_max_chars: defaults::summary_max_chars(),
            title_max_chars: defaults::title_max_chars(),
        }
    }
}

mod defaults {
    // API defaults
    pub fn base_url() -> String {
        "https://api.spaceflightnewsapi.net/v4".into()
    }
    pub fn user_agent() -> String {
        concat!("spacenews/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Pagination defaults
    pub fn page() -> u32 {
        1
    }
    pub fn limit() -> u32 {
        3
    }

    // Query defaults
    pub fn stale_time() -> u64 {
        300
    }
    pub fn gc_time() -> u64 {
        300
    }
    pub fn capacity() -> usize {
        64
    }
    pub fn retry() -> u32 {
        3
    }
    pub fn retry_base_delay() -> u64 {
        1000
    }
    pub fn retry_max_delay() -> u64 {
        30_000
    }

    // Display defaults
    pub fn date_format() -> String {
        "%Y-%m-%d".into()
    }
    pub fn datetime_format() -> String {
        "%Y-%m-%d %H:%M".into()
    }
    pub fn summary_max_chars() -> usize {
        280
    }
    pub fn title_max_chars() -> usize {
        120
    }
}

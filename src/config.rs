//! Client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_CACHE_STALE_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
    #[error("no user config directory available; set BLAZING_SESSION_FILE")]
    NoConfigDir,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Timeouts {
    #[must_use]
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API origin without a trailing slash.
    pub base_url: String,
    pub timeouts: Timeouts,
    /// Quiet period before filter and search edits reach the query key.
    pub debounce: Duration,
    /// How long a cached query result is served without refetching.
    pub cache_stale: Duration,
    /// Where the session tokens and cached user are persisted.
    pub session_file: Option<PathBuf>,
    /// Optional JSON file with email category and type labels.
    pub lookup_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
            timeouts: Timeouts::default(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            cache_stale: Duration::from_secs(DEFAULT_CACHE_STALE_SECS),
            session_file: None,
            lookup_file: None,
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// All optional:
    /// - `BLAZING_API_URL`: default `http://127.0.0.1:8000`
    /// - `BLAZING_REQUEST_TIMEOUT_SECS`: default 30
    /// - `BLAZING_CONNECT_TIMEOUT_SECS`: default 10
    /// - `BLAZING_DEBOUNCE_MS`: default 500
    /// - `BLAZING_CACHE_STALE_SECS`: default 30
    /// - `BLAZING_SESSION_FILE`: default `<config dir>/session.json`
    /// - `BLAZING_LOOKUP_FILE`: no default
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(
            &std::env::var("BLAZING_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned()),
        );
        let timeouts = Timeouts {
            request_secs: env_parse_u64("BLAZING_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse_u64("BLAZING_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };
        let debounce = Duration::from_millis(env_parse_u64("BLAZING_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS)?);
        let cache_stale = Duration::from_secs(env_parse_u64("BLAZING_CACHE_STALE_SECS", DEFAULT_CACHE_STALE_SECS)?);
        let session_file = std::env::var_os("BLAZING_SESSION_FILE").map(PathBuf::from);
        let lookup_file = std::env::var_os("BLAZING_LOOKUP_FILE").map(PathBuf::from);

        Ok(Self { base_url, timeouts, debounce, cache_stale, session_file, lookup_file })
    }

    /// Return the configured session file, falling back to the platform
    /// config directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no session file is configured and the platform
    /// has no user config directory.
    pub fn session_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.session_file {
            return Ok(path.clone());
        }
        let dirs = directories::ProjectDirs::from("", "", "blazing").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("session.json"))
    }
}

#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn env_parse_u64(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidValue { var, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

//! Client configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! The backend base URL is resolved once at startup and injected into the
//! API client and the dashboard. Nothing below this module reads the
//! environment.

use std::time::Duration;

pub const DEV_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_MARKET_REFRESH_SECS: u64 = 30;
pub const DEFAULT_NOTICE_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Neither a base URL nor the development flag was provided.
    #[error("missing base URL: set NFT_INTEL_BASE_URL or NFT_INTEL_DEV=1")]
    MissingBaseUrl,

    /// The base URL is not an absolute http(s) URL.
    #[error("invalid base URL '{0}': expected http:// or https://")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Origin of the backend, without a trailing slash.
    pub base_url: String,
    pub timeouts: Timeouts,
    pub market_refresh_secs: u64,
    pub notice_capacity: usize,
}

impl ApiConfig {
    /// Config for an explicit origin with default timeouts and intervals.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] unless `base_url` starts with
    /// `http://` or `https://`.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            timeouts: Timeouts::default(),
            market_refresh_secs: DEFAULT_MARKET_REFRESH_SECS,
            notice_capacity: DEFAULT_NOTICE_CAPACITY,
        })
    }

    /// Config pointing at the local development backend.
    #[must_use]
    pub fn development() -> Self {
        Self {
            base_url: DEV_BASE_URL.to_owned(),
            timeouts: Timeouts::default(),
            market_refresh_secs: DEFAULT_MARKET_REFRESH_SECS,
            notice_capacity: DEFAULT_NOTICE_CAPACITY,
        }
    }

    /// Build config from process environment variables.
    ///
    /// - `NFT_INTEL_DEV`: `1`/`true`/`yes`/`on` selects [`DEV_BASE_URL`]
    /// - `NFT_INTEL_BASE_URL`: backend origin, required unless dev mode
    /// - `NFT_INTEL_REQUEST_TIMEOUT_SECS`: default 10
    /// - `NFT_INTEL_CONNECT_TIMEOUT_SECS`: default 5
    /// - `NFT_INTEL_MARKET_REFRESH_SECS`: default 30
    /// - `NFT_INTEL_NOTICE_CAPACITY`: default 64
    ///
    /// # Errors
    ///
    /// Returns an error if no usable base URL is configured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] but reading through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if no usable base URL is configured.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let dev = lookup("NFT_INTEL_DEV").is_some_and(|raw| parse_flag(&raw));
        let base_url = if dev {
            DEV_BASE_URL.to_owned()
        } else {
            let raw = lookup("NFT_INTEL_BASE_URL")
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingBaseUrl)?;
            normalize_base_url(&raw)?
        };

        let timeouts = Timeouts {
            request_secs: parse_or(&lookup, "NFT_INTEL_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_or(&lookup, "NFT_INTEL_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        // Zero would make the interval and channel constructors panic.
        let market_refresh_secs =
            parse_or(&lookup, "NFT_INTEL_MARKET_REFRESH_SECS", DEFAULT_MARKET_REFRESH_SECS).max(1);
        let notice_capacity = parse_or(&lookup, "NFT_INTEL_NOTICE_CAPACITY", DEFAULT_NOTICE_CAPACITY).max(1);

        Ok(Self { base_url, timeouts, market_refresh_secs, notice_capacity })
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.request_secs)
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.connect_secs)
    }

    #[must_use]
    pub fn market_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.market_refresh_secs)
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

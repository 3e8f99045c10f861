//! Client configuration.
//!
//! Values come from the environment (and a `.env` file if present), with
//! defaults pointing at a backend on `localhost:8000`.

use std::env;
use std::fmt;

use crate::error::{ClubError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_ASSET_ORIGIN: &str = "http://localhost:8000";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Connection settings for [`ClubClient`](crate::ClubClient).
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the REST API, including the `/api` prefix.
    pub api_url: String,
    /// Origin that relative asset paths (images, files) are resolved against.
    pub asset_origin: String,
    /// Shared secret sent as `X-API-Key` on admin calls.
    pub api_key: Option<String>,
    /// Log filter used by the binary when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            asset_origin: DEFAULT_ASSET_ORIGIN.to_string(),
            api_key: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

// The API key never ends up in logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url)
            .field("asset_origin", &self.asset_origin)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let api_url = lookup("CLUBSITE_API_URL").unwrap_or(defaults.api_url);
        let asset_origin = lookup("CLUBSITE_ASSET_ORIGIN").unwrap_or(defaults.asset_origin);
        let api_key = lookup("CLUBSITE_API_KEY").filter(|key| !key.trim().is_empty());
        let log_level = lookup("CLUBSITE_LOG_LEVEL").unwrap_or(defaults.log_level);

        Self {
            api_url,
            asset_origin,
            api_key,
            log_level,
        }
        .validated()
    }

    /// Replace the API key. Intended for development overrides such as a
    /// command-line flag.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = (!api_key.trim().is_empty()).then_some(api_key);
        self
    }

    /// Check that both URLs are absolute http(s) URLs and strip trailing slashes.
    pub fn validated(mut self) -> Result<Self> {
        self.api_url = check_url("api url", &self.api_url)?;
        self.asset_origin = check_url("asset origin", &self.asset_origin)?;
        Ok(self)
    }
}

fn check_url(what: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ClubError::Config(format!(
            "{what} must start with http:// or https://, got `{value}`"
        )));
    }
    Ok(value.trim_end_matches('/').to_string())
}

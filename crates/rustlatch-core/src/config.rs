//! Configuration management for RustLatch clients.
//!
//! All configuration is driven by environment variables and loaded once at
//! process start.

use std::env;

use crate::error::{RustLatchError, RustLatchResult};
use crate::protocol::{DEFAULT_API_URL, DEFAULT_API_VERSION};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default log level filter.
const DEFAULT_LOG_LEVEL: &str = "info";

/// Global configuration for RustLatch.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatchConfig {
    /// Application ID for the Application API.
    pub app_id: Option<String>,
    /// Application secret key.
    #[serde(skip_serializing)]
    pub secret_key: Option<String>,
    /// User ID for the User API.
    pub user_id: Option<String>,
    /// User secret key.
    #[serde(skip_serializing)]
    pub user_secret: Option<String>,
    /// Service base URL, without the `/api` path.
    pub api_url: String,
    /// API version segment.
    pub api_version: String,
    /// Optional proxy URL for all requests.
    pub proxy: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Log level.
    pub log_level: String,
}

impl std::fmt::Debug for LatchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LatchConfig")
            .field("app_id", &self.app_id)
            .field("user_id", &self.user_id)
            .field("api_url", &self.api_url)
            .field("api_version", &self.api_version)
            .field("proxy", &self.proxy)
            .field("timeout_secs", &self.timeout_secs)
            .field("log_level", &self.log_level)
            .finish_non_exhaustive()
    }
}

impl Default for LatchConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            secret_key: None,
            user_id: None,
            user_secret: None,
            api_url: DEFAULT_API_URL.to_owned(),
            api_version: DEFAULT_API_VERSION.to_owned(),
            proxy: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl LatchConfig {
    /// Log level filter from `LOG_LEVEL`, without loading anything else.
    ///
    /// Lets the caller install a subscriber before [`Self::from_env`] logs.
    #[must_use]
    pub fn log_level_from_env() -> String {
        non_empty_var("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned())
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Returns [`RustLatchError::Config`] if `LATCH_TIMEOUT_SECS` is not an integer.
    pub fn from_env() -> RustLatchResult<Self> {
        let mut config = Self::default();

        config.app_id = non_empty_var("LATCH_APP_ID");
        config.secret_key = non_empty_var("LATCH_SECRET_KEY");
        config.user_id = non_empty_var("LATCH_USER_ID");
        config.user_secret = non_empty_var("LATCH_USER_SECRET");
        config.proxy = non_empty_var("LATCH_PROXY");

        if let Some(v) = non_empty_var("LATCH_API_URL") {
            config.api_url = v;
        }
        if let Some(v) = non_empty_var("LATCH_API_VERSION") {
            config.api_version = v;
        }
        if let Some(v) = non_empty_var("LATCH_TIMEOUT_SECS") {
            config.timeout_secs = v.parse().map_err(|_| {
                RustLatchError::Config(format!("LATCH_TIMEOUT_SECS must be an integer, got {v}"))
            })?;
        }
        config.log_level = Self::log_level_from_env();

        tracing::debug!(config = ?config, "loaded configuration from environment");
        Ok(config)
    }

    /// Application API credentials as `(app_id, secret_key)`.
    ///
    /// # Errors
    /// Returns [`RustLatchError::MissingCredential`] if either value is unset.
    pub fn app_credentials(&self) -> RustLatchResult<(&str, &str)> {
        match (&self.app_id, &self.secret_key) {
            (Some(id), Some(secret)) => Ok((id, secret)),
            (None, _) => Err(RustLatchError::MissingCredential("LATCH_APP_ID")),
            (_, None) => Err(RustLatchError::MissingCredential("LATCH_SECRET_KEY")),
        }
    }

    /// User API credentials as `(user_id, user_secret)`.
    ///
    /// # Errors
    /// Returns [`RustLatchError::MissingCredential`] if either value is unset.
    pub fn user_credentials(&self) -> RustLatchResult<(&str, &str)> {
        match (&self.user_id, &self.user_secret) {
            (Some(id), Some(secret)) => Ok((id, secret)),
            (None, _) => Err(RustLatchError::MissingCredential("LATCH_USER_ID")),
            (_, None) => Err(RustLatchError::MissingCredential("LATCH_USER_SECRET")),
        }
    }

    /// Full URL for an API action, e.g. `https://host/api/1.0/pair/token`.
    ///
    /// A trailing `/` on `api_url` is ignored.
    #[must_use]
    pub fn endpoint(&self, action_path: &str) -> String {
        format!(
            "{}{}/{}/{}",
            self.api_url.trim_end_matches('/'),
            crate::protocol::API_PATH,
            self.api_version,
            action_path.trim_start_matches('/')
        )
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

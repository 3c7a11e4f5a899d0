//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::error::{ApiError, ApiResult};

/// Default REST API base URL.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5500/api";

/// Default origin serving uploaded files.
pub const DEFAULT_FILE_SERVER_URL: &str = "http://localhost:5500";

/// Configuration for [`crate::ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to
    pub api_base_url: String,
    /// Origin prefixed to root-relative asset paths
    pub file_server_url: String,
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            file_server_url: DEFAULT_FILE_SERVER_URL.to_string(),
            timeout: None,
            user_agent: concat!("servicelink-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_base_url: non_empty_var("SERVICELINK_API_BASE_URL").unwrap_or(defaults.api_base_url),
            file_server_url: non_empty_var("SERVICELINK_FILE_SERVER_URL")
                .unwrap_or(defaults.file_server_url),
            timeout: std::env::var("SERVICELINK_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            user_agent: defaults.user_agent,
        }
    }

    /// Point both the API and the file server at `origin`.
    pub fn with_origin(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self {
            api_base_url: format!("{}/api", origin),
            file_server_url: origin.to_string(),
            ..Self::default()
        }
    }

    /// Check that both URLs parse as absolute http(s) URLs.
    pub fn validate(&self) -> ApiResult<()> {
        for (name, value) in [
            ("api_base_url", &self.api_base_url),
            ("file_server_url", &self.file_server_url),
        ] {
            let url = Url::parse(value)?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ApiError::config(format!(
                    "{} must use http or https, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

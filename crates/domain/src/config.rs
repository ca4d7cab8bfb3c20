//! Client configuration types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::endpoints::Endpoints;

/// Default service host.
pub const DEFAULT_HOST: &str = "https://www.geni.com";

/// Default time to wait for the authorization redirect.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(300);

/// Default per-request API timeout.
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration errors surfaced at client construction.
///
/// Unlike handshake and transport failures, these are raised as `Err`
/// immediately; a misconfigured client is never handed out.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No application identifier was provided.
    #[error("an application id is required")]
    MissingAppId,

    /// The host is not an absolute http(s) URL.
    #[error("invalid host URL: {0}")]
    InvalidHost(String),

    /// A timeout was set to zero.
    #[error("{0} timeout must be non-zero")]
    ZeroTimeout(&'static str),

    /// The HTTP transport could not be constructed.
    #[error("failed to build HTTP transport: {0}")]
    Transport(String),

    /// The token store could not be constructed.
    #[error("failed to set up token store: {0}")]
    TokenStore(String),
}

/// Validated application identifier issued by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    /// Creates an app id, rejecting empty or whitespace-only input.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingAppId`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ConfigError::MissingAppId);
        }
        Ok(Self(value))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validates and normalizes a host base URL.
///
/// Accepts absolute `http`/`https` URLs and strips trailing slashes so
/// endpoint paths can be appended directly.
///
/// # Errors
/// Returns [`ConfigError::InvalidHost`] for relative, schemeless, or
/// non-http(s) input.
pub fn normalize_host(host: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(host).map_err(|_| ConfigError::InvalidHost(host.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ConfigError::InvalidHost(host.to_string()));
    }
    Ok(host.trim_end_matches('/').to_string())
}

/// Assembled client configuration.
///
/// Produced by the client builder; all fields are validated before a config
/// is created.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Application identifier presented to the authorization endpoint.
    pub app_id: AppId,
    /// Service base URL without a trailing slash.
    pub host: String,
    /// Endpoint path table.
    pub endpoints: Endpoints,
    /// Whether the token persistence hook is active.
    pub cookies: bool,
    /// How long the connect flow waits for the authorization redirect.
    pub connect_timeout: Duration,
    /// Per-request API timeout.
    pub api_timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration with default host, endpoints, and timeouts.
    #[must_use]
    pub fn new(app_id: AppId) -> Self {
        Self {
            app_id,
            host: DEFAULT_HOST.to_string(),
            endpoints: Endpoints::default(),
            cookies: false,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            api_timeout: DEFAULT_API_TIMEOUT,
        }
    }
}

//! Service endpoint path table

use serde::{Deserialize, Serialize};

/// Paths of the service endpoints the client talks to.
///
/// Defaults match the provider's published paths; every field can be
/// overridden for tests or nonstandard deployments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Root path for REST API calls.
    pub api: String,
    /// Authorization page the browser is sent to.
    pub authorize: String,
    /// Documented token revocation endpoint.
    pub deauthorize: String,
    /// Path targeted by logout. The provider documents `deauthorize` for
    /// revocation; this path is kept separate so deployments can point
    /// logout at either one.
    pub logout: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api: "/api".to_string(),
            authorize: "/oauth/authorize".to_string(),
            deauthorize: "/oauth/deauthorize".to_string(),
            logout: "/oauth/logout".to_string(),
        }
    }
}

impl Endpoints {
    /// Joins `host`, the API root, and an endpoint path.
    ///
    /// A leading slash on `path` is tolerated.
    #[must_use]
    pub fn api_url(&self, host: &str, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{host}{}/{path}", self.api)
    }

    /// Full URL of the authorization page.
    #[must_use]
    pub fn authorize_url(&self, host: &str) -> String {
        format!("{host}{}", self.authorize)
    }

    /// Full URL of the revocation endpoint.
    #[must_use]
    pub fn deauthorize_url(&self, host: &str) -> String {
        format!("{host}{}", self.deauthorize)
    }

    /// Full URL of the logout endpoint.
    #[must_use]
    pub fn logout_url(&self, host: &str) -> String {
        format!("{host}{}", self.logout)
    }
}

//! API request types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// Parameter name the access token rides under.
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Parameter name the application identifier rides under.
pub const CLIENT_ID_PARAM: &str = "client_id";

/// Supported HTTP methods for API calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET method
    #[default]
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP PATCH method
    Patch,
    /// HTTP DELETE method
    Delete,
}

impl HttpMethod {
    /// Returns the method as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Returns whether parameters ride in the query string for this method.
    ///
    /// Only GET uses the query string; every other verb carries parameters
    /// as a JSON body.
    #[must_use]
    pub const fn sends_query(self) -> bool {
        matches!(self, Self::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            other => Err(DomainError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// A generic API call: an explicit verb plus a flat parameter map.
///
/// Parameters ride in the query string for GET and in the JSON body for
/// every other verb. The access token is injected at dispatch time and must
/// not be set here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ApiRequest {
    /// HTTP verb for the call.
    pub method: HttpMethod,
    /// Query or body parameters, sorted for deterministic encoding.
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl ApiRequest {
    /// Creates a request with the given verb and no parameters.
    #[must_use]
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            params: BTreeMap::new(),
        }
    }

    /// Creates a parameterless GET request.
    #[must_use]
    pub fn get() -> Self {
        Self::new(HttpMethod::Get)
    }

    /// Creates a parameterless POST request.
    #[must_use]
    pub fn post() -> Self {
        Self::new(HttpMethod::Post)
    }

    /// Adds a parameter, replacing any previous value for the same name.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

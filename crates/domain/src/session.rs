//! Session and authorization state types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::{DomainError, DomainResult};

/// Failure message reported when the redirect carried no access token.
pub const AUTHORIZATION_DENIED: &str = "Authorization failed or was cancelled";

/// Authorization state of a session against the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    /// No determination has been made, or the last flow did not complete.
    #[default]
    Unknown,
    /// A token was presented and the service rejected it.
    Unauthorized,
    /// A token is held and accepted by the service.
    Authorized,
}

impl AuthStatus {
    /// Returns the status as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Unauthorized => "unauthorized",
            Self::Authorized => "authorized",
        }
    }

    /// Returns true for [`AuthStatus::Authorized`].
    #[must_use]
    pub const fn is_authorized(self) -> bool {
        matches!(self, Self::Authorized)
    }
}

impl fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuthStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "unknown" => Ok(Self::Unknown),
            "unauthorized" => Ok(Self::Unauthorized),
            "authorized" => Ok(Self::Authorized),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

/// Per-client session record: the current status and the held token.
///
/// A fresh session always starts at `(Unknown, None)`; a previously persisted
/// token is never applied automatically. `access_token` is `Some` only while
/// the status is [`AuthStatus::Authorized`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Session {
    /// Current authorization status.
    pub status: AuthStatus,
    /// Access token obtained from the authorization flow, if any.
    pub access_token: Option<String>,
}

impl Session {
    /// Creates a fresh session with no token and unknown status.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: AuthStatus::Unknown,
            access_token: None,
        }
    }

    /// Creates an authorized session holding `token`.
    #[must_use]
    pub fn authorized(token: impl Into<String>) -> Self {
        Self {
            status: AuthStatus::Authorized,
            access_token: Some(token.into()),
        }
    }

    /// Returns true when a token is held.
    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Outcome of a single authorization attempt.
///
/// Produced once per connect call and discarded after the session is
/// updated. Failures are carried here as values; the handshake never
/// surfaces them as errors to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectOutcome {
    /// Status the session moves to.
    pub status: AuthStatus,
    /// Token extracted from the redirect, when authorization succeeded.
    pub access_token: Option<String>,
    /// Description of the failure, when it did not.
    pub error: Option<String>,
}

impl ConnectOutcome {
    /// Successful handshake carrying `token`.
    #[must_use]
    pub fn authorized(token: impl Into<String>) -> Self {
        Self {
            status: AuthStatus::Authorized,
            access_token: Some(token.into()),
            error: None,
        }
    }

    /// Redirect arrived without a token: the user denied or cancelled.
    #[must_use]
    pub fn denied() -> Self {
        Self {
            status: AuthStatus::Unknown,
            access_token: None,
            error: Some(AUTHORIZATION_DENIED.to_string()),
        }
    }

    /// Handshake machinery failed before a redirect was resolved.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: AuthStatus::Unknown,
            access_token: None,
            error: Some(error.into()),
        }
    }

    /// Returns true when the handshake produced a token.
    #[must_use]
    pub const fn is_authorized(&self) -> bool {
        self.status.is_authorized()
    }

    /// The token, present only on an authorized outcome.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        if self.status.is_authorized() {
            self.access_token.as_deref()
        } else {
            None
        }
    }
}

/// Snapshot returned by a status check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Status after the liveness probe, if one ran.
    pub status: AuthStatus,
    /// Token still held after the probe, if any.
    pub access_token: Option<String>,
}

/// Failures inside the local authorization handshake.
///
/// These never cross the public API as errors; the connect flow folds them
/// into a [`ConnectOutcome`] with [`AuthStatus::Unknown`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The loopback listener could not be bound.
    #[error("failed to bind callback listener: {0}")]
    Bind(String),

    /// The authorization URL could not be assembled.
    #[error("failed to build authorization URL: {0}")]
    InvalidAuthorizeUrl(String),

    /// The system browser could not be launched.
    #[error("failed to open browser: {0}")]
    BrowserLaunch(String),

    /// No redirect arrived before the deadline.
    #[error("timed out waiting for authorization redirect after {0}s")]
    Timeout(u64),

    /// The redirect request could not be accepted or read.
    #[error("callback error: {0}")]
    Callback(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_round_trip() {
        for status in [
            AuthStatus::Unknown,
            AuthStatus::Unauthorized,
            AuthStatus::Authorized,
        ] {
            let parsed: AuthStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_status_rejects_unknown_string() {
        let result = "logged_in".parse::<AuthStatus>();
        assert_eq!(
            result,
            Err(DomainError::UnknownStatus("logged_in".to_string()))
        );
    }

    #[test]
    fn test_fresh_session_is_blank() {
        let session = Session::new();
        assert_eq!(session.status, AuthStatus::Unknown);
        assert!(!session.has_token());
    }

    #[test]
    fn test_authorized_session_holds_token() {
        let session = Session::authorized("tok-1");
        assert!(session.status.is_authorized());
        assert_eq!(session.access_token.as_deref(), Some("tok-1"));
    }

    #[test]
    fn test_authorized_outcome() {
        let outcome = ConnectOutcome::authorized("tok-2");
        assert!(outcome.is_authorized());
        assert_eq!(outcome.token(), Some("tok-2"));
        assert_eq!(outcome.error, None);
    }

    #[test]
    fn test_denied_outcome_carries_message() {
        let outcome = ConnectOutcome::denied();
        assert!(!outcome.is_authorized());
        assert_eq!(outcome.token(), None);
        assert_eq!(outcome.error.as_deref(), Some(AUTHORIZATION_DENIED));
    }

    #[test]
    fn test_failed_outcome_is_unknown() {
        let outcome = ConnectOutcome::failed("listener bind refused");
        assert_eq!(outcome.status, AuthStatus::Unknown);
        assert_eq!(outcome.error.as_deref(), Some("listener bind refused"));
    }
}

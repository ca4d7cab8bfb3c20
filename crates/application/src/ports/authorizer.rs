//! Authorization handshake port

use async_trait::async_trait;

use geni_domain::{AuthStatus, ConnectOutcome};

/// Progress of an authorization handshake.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectPhase {
    /// No handshake running.
    #[default]
    Idle,
    /// Listener bound and browser opened; waiting for the redirect.
    AwaitingCallback {
        /// URL the browser was sent to.
        authorize_url: String,
    },
    /// Handshake finished.
    Resolved {
        /// Status the handshake produced.
        status: AuthStatus,
    },
}

impl ConnectPhase {
    /// Returns true while a handshake is waiting on the redirect.
    #[must_use]
    pub const fn is_in_progress(&self) -> bool {
        matches!(self, Self::AwaitingCallback { .. })
    }

    /// Returns true once a handshake has resolved.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// Port for running one authorization handshake.
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Runs a single handshake to completion and resolves its outcome.
    ///
    /// Failures are folded into the returned [`ConnectOutcome`]; this never
    /// errors and never panics the flow.
    async fn authorize(&self) -> ConnectOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_phase_progression_flags() {
        let idle = ConnectPhase::Idle;
        assert!(!idle.is_in_progress());
        assert!(!idle.is_finished());

        let waiting = ConnectPhase::AwaitingCallback {
            authorize_url: "https://www.geni.com/oauth/authorize?x=1".to_string(),
        };
        assert!(waiting.is_in_progress());
        assert!(!waiting.is_finished());

        let resolved = ConnectPhase::Resolved {
            status: AuthStatus::Authorized,
        };
        assert!(!resolved.is_in_progress());
        assert!(resolved.is_finished());
    }

    #[test]
    fn test_phase_default_is_idle() {
        assert_eq!(ConnectPhase::default(), ConnectPhase::Idle);
    }
}

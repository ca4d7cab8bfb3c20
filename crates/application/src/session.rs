//! Session state coordination

use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

use geni_domain::{AuthStatus, Session};

use crate::events::{AUTH_STATUS_CHANGE, EventBus};

/// Owns the session record and announces status transitions.
///
/// Every status change funnels through this manager, which publishes
/// [`AUTH_STATUS_CHANGE`] only when the status actually changed; re-setting
/// the current status is silent. The lock is released before the
/// announcement so subscribers never observe it held.
pub struct SessionManager {
    session: RwLock<Session>,
    events: Arc<EventBus>,
}

impl SessionManager {
    /// Creates a manager with a blank session.
    #[must_use]
    pub fn new(events: Arc<EventBus>) -> Self {
        Self {
            session: RwLock::new(Session::new()),
            events,
        }
    }

    /// Current session snapshot.
    pub async fn snapshot(&self) -> Session {
        self.session.read().await.clone()
    }

    /// The held access token, if any.
    pub async fn access_token(&self) -> Option<String> {
        self.session.read().await.access_token.clone()
    }

    /// Moves the session to `status`, announcing on transition.
    pub async fn set_status(&self, status: AuthStatus) {
        let changed = {
            let mut session = self.session.write().await;
            let changed = session.status != status;
            session.status = status;
            changed
        };
        if changed {
            self.announce(status);
        }
    }

    /// Stores `token` and marks the session authorized.
    pub async fn authorize(&self, token: impl Into<String>) {
        let changed = {
            let mut session = self.session.write().await;
            let changed = session.status != AuthStatus::Authorized;
            session.access_token = Some(token.into());
            session.status = AuthStatus::Authorized;
            changed
        };
        if changed {
            self.announce(AuthStatus::Authorized);
        }
    }

    /// Drops the token and moves to `status`.
    ///
    /// `status` must be [`AuthStatus::Unknown`] or
    /// [`AuthStatus::Unauthorized`]; passing `Authorized` would break the
    /// token-implies-authorized invariant.
    pub async fn invalidate(&self, status: AuthStatus) {
        let changed = {
            let mut session = self.session.write().await;
            let changed = session.status != status;
            session.access_token = None;
            session.status = status;
            changed
        };
        if changed {
            self.announce(status);
        }
    }

    fn announce(&self, status: AuthStatus) {
        self.events
            .publish(AUTH_STATUS_CHANGE, &Value::String(status.as_str().to_owned()));
    }
}

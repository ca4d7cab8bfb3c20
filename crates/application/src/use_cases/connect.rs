//! Connect use case: run the authorization flow

use std::sync::Arc;
use tracing::{debug, warn};

use geni_domain::ConnectOutcome;

use crate::ports::{Authorizer, TokenStore};
use crate::session::SessionManager;

/// Runs the authorization flow and applies its outcome to the session.
#[derive(Clone)]
pub struct Connect {
    authorizer: Arc<dyn Authorizer>,
    token_store: Option<Arc<dyn TokenStore>>,
    session: Arc<SessionManager>,
}

impl Connect {
    /// Creates the use case from its ports.
    #[must_use]
    pub fn new(
        authorizer: Arc<dyn Authorizer>,
        token_store: Option<Arc<dyn TokenStore>>,
        session: Arc<SessionManager>,
    ) -> Self {
        Self {
            authorizer,
            token_store,
            session,
        }
    }

    /// Connects the session.
    ///
    /// Holding a token short-circuits without touching the listener or the
    /// browser; otherwise exactly one handshake runs. On success the token
    /// is persisted through the store hook (best-effort) before the session
    /// moves to authorized; failures come back inside the outcome, never as
    /// an error.
    pub async fn execute(&self) -> ConnectOutcome {
        if let Some(token) = self.session.access_token().await {
            debug!("token already held, skipping authorization");
            return ConnectOutcome::authorized(token);
        }

        let outcome = self.authorizer.authorize().await;
        match outcome.token() {
            Some(token) => {
                if let Some(store) = &self.token_store {
                    if let Err(error) = store.save(token).await {
                        warn!(%error, "failed to persist access token");
                    }
                }
                self.session.authorize(token).await;
            }
            None => {
                debug!(error = ?outcome.error, "authorization did not produce a token");
                self.session.set_status(outcome.status).await;
            }
        }
        outcome
    }
}

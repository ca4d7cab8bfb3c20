//! Implicit-grant authorizer backed by a loopback listener.
//!
//! One handshake: bind an ephemeral port, send the browser to the
//! authorization page with the loopback address as `redirect_uri`, and
//! resolve the redirect into a [`ConnectOutcome`]. Handshake failures are
//! folded into the outcome; [`Authorizer::authorize`] never errors.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;

use geni_application::{Authorizer, Browser, ConnectPhase};
use geni_domain::{AuthError, CLIENT_ID_PARAM, ClientConfig, ConnectOutcome};

use crate::callback::CallbackListener;

/// Runs the implicit-grant flow through the system browser.
pub struct LoopbackAuthorizer {
    config: Arc<ClientConfig>,
    browser: Arc<dyn Browser>,
    phase: RwLock<ConnectPhase>,
}

impl LoopbackAuthorizer {
    /// Creates an authorizer for `config` that opens pages via `browser`.
    #[must_use]
    pub fn new(config: Arc<ClientConfig>, browser: Arc<dyn Browser>) -> Self {
        Self {
            config,
            browser,
            phase: RwLock::new(ConnectPhase::Idle),
        }
    }

    /// Current phase of the handshake.
    #[must_use]
    pub fn phase(&self) -> ConnectPhase {
        self.phase
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_phase(&self, phase: ConnectPhase) {
        *self.phase.write().unwrap_or_else(PoisonError::into_inner) = phase;
    }

    /// Builds the authorization page URL for `redirect_uri`.
    fn authorize_url(&self, redirect_uri: &str) -> Result<String, AuthError> {
        let params = vec![
            ("response_type", "token"),
            (CLIENT_ID_PARAM, self.config.app_id.as_str()),
            ("redirect_uri", redirect_uri),
            ("display", "popup"),
        ];
        let query = serde_urlencoded::to_string(&params)
            .map_err(|e| AuthError::InvalidAuthorizeUrl(e.to_string()))?;
        Ok(format!(
            "{}?{query}",
            self.config.endpoints.authorize_url(&self.config.host)
        ))
    }

    async fn run_handshake(&self) -> Result<ConnectOutcome, AuthError> {
        let listener = CallbackListener::bind().await?;
        let redirect_uri = format!("http://127.0.0.1:{}", listener.local_port());
        let authorize_url = self.authorize_url(&redirect_uri)?;
        self.set_phase(ConnectPhase::AwaitingCallback {
            authorize_url: authorize_url.clone(),
        });
        tracing::info!(%authorize_url, "opening browser for authorization");
        self.browser.open(&authorize_url)?;
        match listener.wait_for_token(self.config.connect_timeout).await? {
            Some(token) => Ok(ConnectOutcome::authorized(token)),
            None => Ok(ConnectOutcome::denied()),
        }
    }
}

#[async_trait]
impl Authorizer for LoopbackAuthorizer {
    async fn authorize(&self) -> ConnectOutcome {
        let outcome = match self.run_handshake().await {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::warn!(%error, "authorization handshake failed");
                ConnectOutcome::failed(error.to_string())
            }
        };
        self.set_phase(ConnectPhase::Resolved {
            status: outcome.status,
        });
        outcome
    }
}

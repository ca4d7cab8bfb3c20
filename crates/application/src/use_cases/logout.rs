//! Logout use case

use std::sync::Arc;
use tracing::{debug, warn};

use geni_domain::{ACCESS_TOKEN_PARAM, ApiRequest, AuthStatus, CLIENT_ID_PARAM, ClientConfig};

use crate::ports::{ApiTransport, TokenStore};
use crate::session::SessionManager;

/// Ends the session, revoking the token on a best-effort basis.
#[derive(Clone)]
pub struct Logout {
    transport: Arc<dyn ApiTransport>,
    token_store: Option<Arc<dyn TokenStore>>,
    session: Arc<SessionManager>,
    config: Arc<ClientConfig>,
}

impl Logout {
    /// Creates the use case from its ports.
    #[must_use]
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        token_store: Option<Arc<dyn TokenStore>>,
        session: Arc<SessionManager>,
        config: Arc<ClientConfig>,
    ) -> Self {
        Self {
            transport,
            token_store,
            session,
            config,
        }
    }

    /// Logs out.
    ///
    /// The revocation request may fail silently; the persisted token and
    /// the local session are cleared and the status reset to
    /// [`AuthStatus::Unknown`] regardless.
    pub async fn execute(&self) {
        let url = self.config.endpoints.logout_url(&self.config.host);
        let mut request = ApiRequest::get().param(CLIENT_ID_PARAM, self.config.app_id.as_str());
        if let Some(token) = self.session.access_token().await {
            request = request.param(ACCESS_TOKEN_PARAM, token);
        }
        debug!(%url, "sending logout request");
        if let Err(error) = self.transport.execute(&url, &request).await {
            debug!(%error, "logout request failed, clearing session anyway");
        }

        if let Some(store) = &self.token_store {
            if let Err(error) = store.clear().await {
                warn!(%error, "failed to clear persisted token");
            }
        }
        self.session.invalidate(AuthStatus::Unknown).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use geni_domain::AppId;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    use crate::events::{AUTH_STATUS_CHANGE, EventBus};
    use crate::ports::{StoreError, TransportError, TransportResponse};

    struct MockTransport {
        fail: bool,
        calls: Mutex<Vec<(String, ApiRequest)>>,
    }

    impl MockTransport {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                fail,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ApiTransport for MockTransport {
        async fn execute(
            &self,
            url: &str,
            request: &ApiRequest,
        ) -> Result<TransportResponse, TransportError> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), request.clone()));
            if self.fail {
                return Err(TransportError::Network("unreachable".to_string()));
            }
            Ok(TransportResponse::new(200, b"{}".to_vec()))
        }
    }

    struct MockStore {
        saved: Mutex<Option<String>>,
    }

    #[async_trait]
    impl TokenStore for MockStore {
        async fn save(&self, token: &str) -> Result<(), StoreError> {
            *self.saved.lock().unwrap() = Some(token.to_string());
            Ok(())
        }

        async fn load(&self) -> Result<Option<String>, StoreError> {
            Ok(self.saved.lock().unwrap().clone())
        }

        async fn clear(&self) -> Result<(), StoreError> {
            *self.saved.lock().unwrap() = None;
            Ok(())
        }
    }

    fn fixture(
        transport: Arc<MockTransport>,
        store: Option<Arc<MockStore>>,
    ) -> (Logout, Arc<SessionManager>, Arc<Mutex<Vec<String>>>) {
        let events = Arc::new(EventBus::new());
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        events.subscribe(AUTH_STATUS_CHANGE, move |payload: &serde_json::Value| {
            sink.lock()
                .unwrap()
                .push(payload.as_str().unwrap_or("?").to_owned());
        });
        let session = Arc::new(SessionManager::new(events));
        let config = Arc::new(ClientConfig::new(AppId::new("app-1").unwrap()));
        let logout = Logout::new(
            transport,
            store.map(|s| s as Arc<dyn TokenStore>),
            Arc::clone(&session),
            config,
        );
        (logout, session, log)
    }

    #[tokio::test]
    async fn test_logout_revokes_and_clears() {
        let transport = MockTransport::new(false);
        let store = Arc::new(MockStore {
            saved: Mutex::new(Some("tok".to_string())),
        });
        let (logout, session, log) = fixture(Arc::clone(&transport), Some(Arc::clone(&store)));
        session.authorize("tok").await;

        logout.execute().await;

        let calls = transport.calls.lock().unwrap();
        let (url, request) = &calls[0];
        assert_eq!(url, "https://www.geni.com/oauth/logout");
        assert_eq!(
            request.params.get(CLIENT_ID_PARAM).map(String::as_str),
            Some("app-1")
        );
        assert_eq!(
            request.params.get(ACCESS_TOKEN_PARAM).map(String::as_str),
            Some("tok")
        );

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.status, AuthStatus::Unknown);
        assert_eq!(snapshot.access_token, None);
        assert_eq!(store.saved.lock().unwrap().clone(), None);
        assert_eq!(log.lock().unwrap().as_slice(), ["authorized", "unknown"]);
    }

    #[tokio::test]
    async fn test_network_failure_still_clears_session() {
        let transport = MockTransport::new(true);
        let (logout, session, _log) = fixture(transport, None);
        session.authorize("tok").await;

        logout.execute().await;

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.status, AuthStatus::Unknown);
        assert_eq!(snapshot.access_token, None);
    }

    #[tokio::test]
    async fn test_logout_without_token_omits_it() {
        let transport = MockTransport::new(false);
        let (logout, _session, log) = fixture(Arc::clone(&transport), None);

        logout.execute().await;

        let calls = transport.calls.lock().unwrap();
        assert!(!calls[0].1.params.contains_key(ACCESS_TOKEN_PARAM));
        assert!(log.lock().unwrap().is_empty());
    }
}

//! Generic API call use case

use std::sync::Arc;
use tracing::{debug, warn};

use geni_domain::{ACCESS_TOKEN_PARAM, ApiRequest, ApiResponse, AuthStatus, ClientConfig};

use crate::ports::ApiTransport;
use crate::session::SessionManager;

/// Dispatches authenticated calls to arbitrary API endpoints.
///
/// Transport and decode failures never escape as errors; they come back as
/// an [`ApiResponse`] whose payload is `{"error": "<description>"}`, so
/// callers inspect the response either way.
#[derive(Clone)]
pub struct CallApi {
    transport: Arc<dyn ApiTransport>,
    session: Arc<SessionManager>,
    config: Arc<ClientConfig>,
}

impl CallApi {
    /// Creates the use case from its ports.
    #[must_use]
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        session: Arc<SessionManager>,
        config: Arc<ClientConfig>,
    ) -> Self {
        Self {
            transport,
            session,
            config,
        }
    }

    /// Calls `path` under the API root.
    ///
    /// The held token is injected as `access_token` before dispatch. A reply
    /// whose error marker declares a rejected token clears the session token
    /// and demotes the status to [`AuthStatus::Unauthorized`] before the
    /// response is returned.
    pub async fn execute(&self, path: &str, request: ApiRequest) -> ApiResponse {
        let url = self.config.endpoints.api_url(&self.config.host, path);
        let mut request = request;
        if let Some(token) = self.session.access_token().await {
            request.params.insert(ACCESS_TOKEN_PARAM.to_string(), token);
        }
        debug!(%url, method = %request.method, "dispatching API call");

        let raw = match self.transport.execute(&url, &request).await {
            Ok(raw) => raw,
            Err(error) => {
                debug!(%error, "transport failure");
                return ApiResponse::from_failure(error);
            }
        };
        let data = match serde_json::from_slice(&raw.body) {
            Ok(data) => data,
            Err(error) => {
                debug!(status = raw.status, %error, "response body was not valid JSON");
                return ApiResponse::from_failure(error);
            }
        };

        let response = ApiResponse::new(data);
        if response.is_authorization_exception() {
            warn!("access token rejected by the service");
            self.session.invalidate(AuthStatus::Unauthorized).await;
        }
        response
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use geni_domain::{AppId, HttpMethod};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Mutex;

    use crate::events::EventBus;
    use crate::ports::{TransportError, TransportResponse};

    struct MockTransport {
        reply: Result<TransportResponse, TransportError>,
        calls: Mutex<Vec<(String, ApiRequest)>>,
    }

    impl MockTransport {
        fn replying(body: serde_json::Value) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(TransportResponse::new(200, body.to_string().into_bytes())),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing(error: TransportError) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(error),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn raw(status: u16, body: &[u8]) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(TransportResponse::new(status, body.to_vec())),
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
            self.reply.clone()
        }
    }

    fn fixture(transport: Arc<MockTransport>) -> (CallApi, Arc<SessionManager>) {
        let config = Arc::new(ClientConfig::new(AppId::new("app-1").unwrap()));
        let session = Arc::new(SessionManager::new(Arc::new(EventBus::new())));
        let call_api = CallApi::new(transport, Arc::clone(&session), config);
        (call_api, session)
    }

    #[tokio::test]
    async fn test_url_join_and_token_injection() {
        let transport = MockTransport::replying(json!({"id": "profile-1"}));
        let (call_api, session) = fixture(Arc::clone(&transport));
        session.authorize("tok-9").await;

        let response = call_api.execute("profile-1", ApiRequest::get()).await;

        assert!(response.error().is_none());
        let calls = transport.calls.lock().unwrap();
        let (url, sent) = &calls[0];
        assert_eq!(url, "https://www.geni.com/api/profile-1");
        assert_eq!(sent.method, HttpMethod::Get);
        assert_eq!(
            sent.params.get(ACCESS_TOKEN_PARAM).map(String::as_str),
            Some("tok-9")
        );
    }

    #[tokio::test]
    async fn test_no_token_means_no_injection() {
        let transport = MockTransport::replying(json!({"ok": true}));
        let (call_api, _session) = fixture(Arc::clone(&transport));

        call_api.execute("/stats", ApiRequest::get()).await;

        let calls = transport.calls.lock().unwrap();
        assert!(!calls[0].1.params.contains_key(ACCESS_TOKEN_PARAM));
    }

    #[tokio::test]
    async fn test_rejected_token_demotes_session() {
        let transport = MockTransport::replying(json!({
            "error": {"type": "OAuthException", "message": "Invalid access token"}
        }));
        let (call_api, session) = fixture(transport);
        session.authorize("stale").await;

        let response = call_api.execute("/user", ApiRequest::get()).await;

        assert!(response.is_authorization_exception());
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.status, AuthStatus::Unauthorized);
        assert_eq!(snapshot.access_token, None);
    }

    #[tokio::test]
    async fn test_plain_error_does_not_demote() {
        let transport = MockTransport::replying(json!({"error": "Rate limit exceeded"}));
        let (call_api, session) = fixture(transport);
        session.authorize("fine").await;

        let response = call_api.execute("/user", ApiRequest::get()).await;

        assert_eq!(response.error().unwrap().message, "Rate limit exceeded");
        assert_eq!(session.snapshot().await.status, AuthStatus::Authorized);
        assert_eq!(session.access_token().await.as_deref(), Some("fine"));
    }

    #[tokio::test]
    async fn test_transport_failure_synthesizes_error_response() {
        let transport =
            MockTransport::failing(TransportError::Network("connection refused".to_string()));
        let (call_api, session) = fixture(transport);
        session.authorize("keep-me").await;

        let response = call_api.execute("/user", ApiRequest::get()).await;

        let error = response.error().unwrap();
        assert!(error.message.contains("connection refused"));
        assert!(!response.is_authorization_exception());
        // Transport failures say nothing about the token.
        assert_eq!(session.access_token().await.as_deref(), Some("keep-me"));
    }

    #[tokio::test]
    async fn test_undecodable_body_synthesizes_error_response() {
        let transport = MockTransport::raw(502, b"<html>Bad Gateway</html>");
        let (call_api, _session) = fixture(transport);

        let response = call_api.execute("/user", ApiRequest::get()).await;

        assert!(response.error().is_some());
    }

    #[tokio::test]
    async fn test_post_params_pass_through() {
        let transport = MockTransport::replying(json!({"ok": true}));
        let (call_api, _session) = fixture(Arc::clone(&transport));

        let request = ApiRequest::post().param("names", "Jane Doe");
        call_api.execute("profile-1/update", request).await;

        let calls = transport.calls.lock().unwrap();
        let (url, sent) = &calls[0];
        assert_eq!(url, "https://www.geni.com/api/profile-1/update");
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.params.get("names").map(String::as_str), Some("Jane Doe"));
    }
}

//! Client facade and builder.
//!
//! `GeniClient` owns the session, the event registry, and the flows, wired
//! by default to the real adapters: the loopback authorizer driving the
//! system browser, the reqwest transport, and the file token store when
//! cookies are enabled. Every default can be swapped through the builder.

use std::sync::Arc;
use std::time::Duration;

use geni_application::{
    ApiTransport, Authorizer, Browser, CallApi, CheckStatus, Connect, EventBus, Logout,
    SessionManager, TokenStore,
};
use geni_domain::{
    ApiRequest, ApiResponse, AppId, ClientConfig, ConfigError, ConnectOutcome,
    DEFAULT_API_TIMEOUT, DEFAULT_CONNECT_TIMEOUT, DEFAULT_HOST, Endpoints, Session, StatusReport,
    normalize_host,
};
use geni_infrastructure::{FileTokenStore, LoopbackAuthorizer, ReqwestTransport, SystemBrowser};

/// Client for the Geni REST API.
///
/// Construction validates the configuration; a client is only handed out
/// fully wired. All flow failures after that come back as values inside
/// [`ConnectOutcome`] and [`ApiResponse`], never as errors.
#[derive(Clone)]
pub struct GeniClient {
    config: Arc<ClientConfig>,
    session: Arc<SessionManager>,
    events: Arc<EventBus>,
    token_store: Option<Arc<dyn TokenStore>>,
    connect: Connect,
    logout: Logout,
    call_api: CallApi,
    check_status: CheckStatus,
}

impl GeniClient {
    /// Starts building a client.
    #[must_use]
    pub fn builder() -> GeniClientBuilder {
        GeniClientBuilder::default()
    }

    /// Creates a client for `app_id` with default settings.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] when `app_id` is blank or a default
    /// component cannot be constructed.
    pub fn new(app_id: impl Into<String>) -> Result<Self, ConfigError> {
        Self::builder().app_id(app_id).build()
    }

    /// Runs the authorization flow.
    ///
    /// A held token short-circuits: the outcome carries it back without
    /// opening the browser. Otherwise one handshake runs and its outcome,
    /// success, denial, or failure, is applied to the session and returned.
    pub async fn connect(&self) -> ConnectOutcome {
        self.connect.execute().await
    }

    /// Ends the session.
    ///
    /// Best-effort revocation against the service, then the persisted and
    /// in-memory tokens are cleared unconditionally.
    pub async fn logout(&self) {
        self.logout.execute().await;
    }

    /// Calls `path` under the API root.
    ///
    /// The held token is injected automatically. Transport and decode
    /// failures come back as a response whose payload is
    /// `{"error": "<description>"}`.
    pub async fn api(&self, path: &str, request: ApiRequest) -> ApiResponse {
        self.call_api.execute(path, request).await
    }

    /// Reports the session status, probing the service when a token is held.
    pub async fn get_status(&self) -> StatusReport {
        self.check_status.execute().await
    }

    /// Snapshot of the current session.
    pub async fn session(&self) -> Session {
        self.session.snapshot().await
    }

    /// Applies a previously obtained token, marking the session authorized.
    ///
    /// Stored tokens are never applied automatically; pair this with
    /// [`GeniClient::token_store`] to resume an earlier session explicitly.
    pub async fn restore_token(&self, token: impl Into<String>) {
        self.session.authorize(token).await;
    }

    /// Event registry for status change notifications.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// The token persistence hook, when one is configured.
    #[must_use]
    pub fn token_store(&self) -> Option<&Arc<dyn TokenStore>> {
        self.token_store.as_ref()
    }

    /// The configuration the client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

/// Builder for [`GeniClient`].
#[derive(Default)]
pub struct GeniClientBuilder {
    app_id: Option<String>,
    host: Option<String>,
    endpoints: Option<Endpoints>,
    cookies: bool,
    debug_logging: bool,
    connect_timeout: Option<Duration>,
    api_timeout: Option<Duration>,
    transport: Option<Arc<dyn ApiTransport>>,
    browser: Option<Arc<dyn Browser>>,
    authorizer: Option<Arc<dyn Authorizer>>,
    token_store: Option<Arc<dyn TokenStore>>,
}

impl GeniClientBuilder {
    /// Application identifier issued by the service. Required.
    #[must_use]
    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Service base URL. Defaults to the production host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Endpoint path table override.
    #[must_use]
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Persists the access token between runs. Off by default.
    #[must_use]
    pub const fn cookies(mut self, cookies: bool) -> Self {
        self.cookies = cookies;
        self
    }

    /// Installs a fallback debug-level log subscriber. Off by default.
    #[must_use]
    pub const fn debug_logging(mut self, debug_logging: bool) -> Self {
        self.debug_logging = debug_logging;
        self
    }

    /// How long connect waits for the authorization redirect.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Per-request API timeout.
    #[must_use]
    pub const fn api_timeout(mut self, timeout: Duration) -> Self {
        self.api_timeout = Some(timeout);
        self
    }

    /// Replaces the HTTP transport.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn ApiTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replaces the browser launcher used by the default authorizer.
    #[must_use]
    pub fn with_browser(mut self, browser: Arc<dyn Browser>) -> Self {
        self.browser = Some(browser);
        self
    }

    /// Replaces the whole authorization handshake.
    #[must_use]
    pub fn with_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = Some(authorizer);
        self
    }

    /// Replaces the token store. Implies persistence regardless of
    /// [`GeniClientBuilder::cookies`].
    #[must_use]
    pub fn with_token_store(mut self, token_store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(token_store);
        self
    }

    /// Validates the configuration and wires the client.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] when the app id is missing, the host is
    /// not an absolute http(s) URL, a timeout is zero, or a default
    /// component cannot be constructed.
    pub fn build(self) -> Result<GeniClient, ConfigError> {
        let app_id = AppId::new(self.app_id.unwrap_or_default())?;
        let host = normalize_host(self.host.as_deref().unwrap_or(DEFAULT_HOST))?;
        let connect_timeout = self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT);
        if connect_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout("connect"));
        }
        let api_timeout = self.api_timeout.unwrap_or(DEFAULT_API_TIMEOUT);
        if api_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout("api"));
        }

        if self.debug_logging {
            init_debug_logging();
        }

        let config = Arc::new(ClientConfig {
            app_id,
            host,
            endpoints: self.endpoints.unwrap_or_default(),
            cookies: self.cookies,
            connect_timeout,
            api_timeout,
        });
        tracing::debug!(host = %config.host, "client configured");

        let events = Arc::new(EventBus::new());
        let session = Arc::new(SessionManager::new(Arc::clone(&events)));

        let transport: Arc<dyn ApiTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(
                ReqwestTransport::new(api_timeout)
                    .map_err(|e| ConfigError::Transport(e.to_string()))?,
            ),
        };
        let token_store: Option<Arc<dyn TokenStore>> = match (self.token_store, config.cookies) {
            (Some(store), _) => Some(store),
            (None, true) => Some(Arc::new(
                FileTokenStore::new().map_err(|e| ConfigError::TokenStore(e.to_string()))?,
            )),
            (None, false) => None,
        };
        let authorizer: Arc<dyn Authorizer> = match self.authorizer {
            Some(authorizer) => authorizer,
            None => {
                let browser = self
                    .browser
                    .unwrap_or_else(|| Arc::new(SystemBrowser) as Arc<dyn Browser>);
                Arc::new(LoopbackAuthorizer::new(Arc::clone(&config), browser))
            }
        };

        let connect = Connect::new(authorizer, token_store.clone(), Arc::clone(&session));
        let call_api = CallApi::new(
            Arc::clone(&transport),
            Arc::clone(&session),
            Arc::clone(&config),
        );
        let check_status = CheckStatus::new(call_api.clone(), Arc::clone(&session));
        let logout = Logout::new(
            transport,
            token_store.clone(),
            Arc::clone(&session),
            Arc::clone(&config),
        );

        Ok(GeniClient {
            config,
            session,
            events,
            token_store,
            connect,
            logout,
            call_api,
            check_status,
        })
    }
}

/// Installs a process-wide fmt subscriber at debug level unless `RUST_LOG`
/// overrides it. Repeated installs are ignored.
fn init_debug_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            "geni=debug,geni_application=debug,geni_infrastructure=debug",
        )
    });
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

//! Geni - Rust SDK for the Geni REST API
//!
//! A thin client around the Geni REST API: it runs the implicit-grant
//! authorization flow through the system browser, tracks the session
//! status, announces status changes over a named-event registry, and
//! dispatches authenticated calls to arbitrary API endpoints.
//!
//! ```no_run
//! use geni::{ApiRequest, GeniClient};
//!
//! # async fn run() -> Result<(), geni::ConfigError> {
//! let client = GeniClient::new("your-app-id")?;
//! let outcome = client.connect().await;
//! if outcome.is_authorized() {
//!     let profile = client.api("/profile", ApiRequest::get()).await;
//!     println!("{}", profile.data());
//! }
//! client.logout().await;
//! # Ok(())
//! # }
//! ```

pub mod client;

pub use client::{GeniClient, GeniClientBuilder};

pub use geni_application::{
    AUTH_STATUS_CHANGE, ApiTransport, Authorizer, Browser, ConnectPhase, EventBus, EventCallback,
    SessionManager, StoreError, SubscriptionId, TokenStore, TransportError, TransportResponse,
};
pub use geni_domain::{
    AUTHORIZATION_DENIED, ApiError, ApiRequest, ApiResponse, AppId, AuthError, AuthStatus,
    ClientConfig, ConfigError, ConnectOutcome, DomainError, Endpoints, HttpMethod, Session,
    StatusReport,
};
pub use geni_infrastructure::{FileTokenStore, LoopbackAuthorizer, ReqwestTransport, SystemBrowser};

/// SDK version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Geni Domain - Core SDK types
//!
//! This crate defines the domain model for the Geni REST API client.
//! All types here are pure Rust with no I/O dependencies.

pub mod config;
pub mod endpoints;
pub mod error;
pub mod request;
pub mod response;
pub mod session;

pub use config::{
    AppId, ClientConfig, ConfigError, DEFAULT_API_TIMEOUT, DEFAULT_CONNECT_TIMEOUT, DEFAULT_HOST,
    normalize_host,
};
pub use endpoints::Endpoints;
pub use error::{DomainError, DomainResult};
pub use request::{ACCESS_TOKEN_PARAM, ApiRequest, CLIENT_ID_PARAM, HttpMethod};
pub use response::{ApiError, ApiResponse, OAUTH_EXCEPTION};
pub use session::{
    AUTHORIZATION_DENIED, AuthError, AuthStatus, ConnectOutcome, Session, StatusReport,
};

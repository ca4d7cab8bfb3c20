//! Geni Application - Session coordination and flows
//!
//! This crate coordinates the session record, the event registry, and the
//! authorization, logout, API-call, and status-check flows against ports
//! implemented by the infrastructure layer.

pub mod events;
pub mod ports;
pub mod session;
pub mod use_cases;

pub use events::{AUTH_STATUS_CHANGE, EventBus, EventCallback, SubscriptionId};
pub use ports::{
    ApiTransport, Authorizer, Browser, ConnectPhase, StoreError, TokenStore, TransportError,
    TransportResponse,
};
pub use session::SessionManager;
pub use use_cases::{CallApi, CheckStatus, Connect, Logout};

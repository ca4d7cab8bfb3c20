//! Port definitions (interfaces)
//!
//! Ports are the seams between the application core and the outside world.
//! Each is a trait implemented by an adapter in the infrastructure layer.

mod authorizer;
mod browser;
mod token_store;
mod transport;

pub use authorizer::{Authorizer, ConnectPhase};
pub use browser::Browser;
pub use token_store::{StoreError, TokenStore};
pub use transport::{ApiTransport, TransportError, TransportResponse};

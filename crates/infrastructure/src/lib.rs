//! Geni Infrastructure - Adapters
//!
//! Concrete implementations of the application-layer ports: the
//! reqwest-backed HTTP transport, the loopback authorization flow, the
//! system browser, and the file token store.

pub mod authorizer;
pub mod browser;
pub mod callback;
pub mod token_file;
pub mod transport;

pub use authorizer::LoopbackAuthorizer;
pub use browser::SystemBrowser;
pub use callback::CallbackListener;
pub use token_file::FileTokenStore;
pub use transport::ReqwestTransport;

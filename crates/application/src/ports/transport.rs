//! API transport port

use async_trait::async_trait;

use geni_domain::ApiRequest;

/// Errors raised by the HTTP transport.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(String),

    /// The request URL was rejected.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// The request timed out.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Connection or protocol failure.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Raw reply from the transport, prior to decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Creates a response from status and body.
    #[must_use]
    pub const fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }
}

/// Port for dispatching API requests over HTTP.
///
/// Implementations place `request.params` in the query string for GET and
/// in a JSON body for every other verb.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Executes `request` against the absolute `url`.
    ///
    /// HTTP error statuses are not transport errors; they come back as a
    /// normal [`TransportResponse`].
    ///
    /// # Errors
    /// Returns a [`TransportError`] when the request could not be sent or
    /// the body could not be read.
    async fn execute(
        &self,
        url: &str,
        request: &ApiRequest,
    ) -> Result<TransportResponse, TransportError>;
}

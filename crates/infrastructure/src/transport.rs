//! API transport implementation using reqwest.
//!
//! Implements the `ApiTransport` port: parameters ride in the query string
//! for GET and in a JSON body for every other verb. HTTP error statuses are
//! returned as normal responses; only transport-level failures map to
//! [`TransportError`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};

use geni_application::{ApiTransport, TransportError, TransportResponse};
use geni_domain::{ApiRequest, HttpMethod};

/// User agent presented on every API call.
const USER_AGENT: &str = concat!("geni-sdk-rust/", env!("CARGO_PKG_VERSION"));

/// API transport backed by a shared `reqwest::Client`.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with a per-request `timeout`.
    ///
    /// Redirects are followed up to 10 hops and TLS verification stays on.
    ///
    /// # Errors
    /// Returns [`TransportError::Build`] when the underlying client cannot
    /// be constructed.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;
        Ok(Self { client })
    }

    /// Creates a transport around a caller-supplied client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts the domain verb to a reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Maps reqwest errors to the transport error taxonomy.
    fn map_error(error: &reqwest::Error) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout(error.to_string());
        }
        if error.is_builder() {
            return TransportError::InvalidUrl(error.to_string());
        }
        TransportError::Network(error.to_string())
    }
}

#[async_trait]
impl ApiTransport for ReqwestTransport {
    async fn execute(
        &self,
        url: &str,
        request: &ApiRequest,
    ) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url);
        builder = if request.method.sends_query() {
            builder.query(&request.params)
        } else {
            builder.json(&request.params)
        };

        let response = builder.send().await.map_err(|e| Self::map_error(&e))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?
            .to_vec();
        tracing::debug!(status, bytes = body.len(), "transport reply");
        Ok(TransportResponse::new(status, body))
    }
}

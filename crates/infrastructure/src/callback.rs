//! One-shot loopback listener for the authorization redirect.
//!
//! The authorization page redirects the browser to
//! `http://127.0.0.1:<port>` with the access token in the query string.
//! This listener accepts exactly one request, answers it with a page that
//! closes the popup, and hands the token back. The socket is released on
//! every path, including timeout.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

use geni_domain::{ACCESS_TOKEN_PARAM, AuthError};

/// Page served to the browser after the redirect, success or not.
const CLOSE_PAGE: &str = "<html><body><script>window.close()</script></body></html>";

/// Upper bound on the redirect request size.
const MAX_REQUEST_BYTES: usize = 8192;

/// Listener bound to an ephemeral loopback port, consumed by one redirect.
pub struct CallbackListener {
    listener: TcpListener,
    port: u16,
}

impl CallbackListener {
    /// Binds to an ephemeral port on 127.0.0.1.
    ///
    /// # Errors
    /// Returns [`AuthError::Bind`] when the loopback interface refuses the
    /// bind.
    pub async fn bind() -> Result<Self, AuthError> {
        let listener = TcpListener::bind(("127.0.0.1", 0))
            .await
            .map_err(|e| AuthError::Bind(e.to_string()))?;
        let port = listener
            .local_addr()
            .map_err(|e| AuthError::Bind(e.to_string()))?
            .port();
        Ok(Self { listener, port })
    }

    /// The port the listener is bound to.
    #[must_use]
    pub const fn local_port(&self) -> u16 {
        self.port
    }

    /// Waits for exactly one request and resolves the token it carries.
    ///
    /// The browser is always answered with [`CLOSE_PAGE`] and status 200,
    /// whether or not a token arrived; a missing or malformed token comes
    /// back as `Ok(None)`. Consumes the listener.
    ///
    /// # Errors
    /// Returns [`AuthError::Timeout`] when no redirect arrives within
    /// `timeout`, or [`AuthError::Callback`] when the connection could not
    /// be accepted or read.
    pub async fn wait_for_token(self, timeout: Duration) -> Result<Option<String>, AuthError> {
        let (mut socket, peer) = tokio::time::timeout(timeout, self.listener.accept())
            .await
            .map_err(|_| AuthError::Timeout(timeout.as_secs()))?
            .map_err(|e| AuthError::Callback(e.to_string()))?;
        tracing::debug!(%peer, "authorization redirect received");

        let mut buffer = vec![0u8; MAX_REQUEST_BYTES];
        let read = socket
            .read(&mut buffer)
            .await
            .map_err(|e| AuthError::Callback(e.to_string()))?;
        let raw = String::from_utf8_lossy(&buffer[..read]);
        let token = request_target(&raw).and_then(token_from_target);

        if let Err(error) = respond(&mut socket).await {
            tracing::debug!(%error, "failed to answer the redirect request");
        }
        let _ = socket.shutdown().await;
        Ok(token)
    }
}

/// Extracts the request target from the first line of an HTTP/1.x request.
fn request_target(raw: &str) -> Option<&str> {
    let first_line = raw.lines().next()?;
    let mut parts = first_line.split_whitespace();
    let _method = parts.next()?;
    parts.next()
}

/// Pulls the access token out of a request target's query string.
///
/// A blank value counts as absent, so `?access_token=` resolves the same
/// way as a redirect without the parameter.
fn token_from_target(target: &str) -> Option<String> {
    let url = Url::parse(&format!("http://127.0.0.1{target}")).ok()?;
    url.query_pairs()
        .find(|(name, value)| name == ACCESS_TOKEN_PARAM && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

async fn respond(socket: &mut TcpStream) -> std::io::Result<()> {
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{CLOSE_PAGE}",
        CLOSE_PAGE.len()
    );
    socket.write_all(response.as_bytes()).await
}

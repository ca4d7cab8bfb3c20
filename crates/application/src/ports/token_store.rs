//! Token persistence port

use async_trait::async_trait;

/// Errors raised by token persistence.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying file or directory operation failed.
    #[error("token store I/O error: {0}")]
    Io(String),

    /// Stored payload could not be encoded or decoded.
    #[error("token store serialization error: {0}")]
    Serialization(String),
}

/// Port for persisting the access token between runs.
///
/// The connect flow saves through this port when the cookie option is on
/// and logout clears it. Loading is left to callers: a new session never
/// picks up a stored token automatically.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Persists `token`, replacing any previous one.
    ///
    /// # Errors
    /// Returns a [`StoreError`] when the token could not be written.
    async fn save(&self, token: &str) -> Result<(), StoreError>;

    /// Loads the previously saved token, if any.
    ///
    /// # Errors
    /// Returns a [`StoreError`] when a stored token exists but could not be
    /// read or decoded.
    async fn load(&self) -> Result<Option<String>, StoreError>;

    /// Removes any saved token. Clearing an empty store is not an error.
    ///
    /// # Errors
    /// Returns a [`StoreError`] when an existing token could not be
    /// removed.
    async fn clear(&self) -> Result<(), StoreError>;
}

//! File-backed token persistence.
//!
//! Stores the access token as a small JSON document under the user's
//! configuration directory, or at an explicit path for tests and embedders.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;

use geni_application::{StoreError, TokenStore};

/// On-disk shape of a persisted token.
#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    access_token: String,
    saved_at: DateTime<Utc>,
}

/// Token store writing to a single JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store at the default location under the user's
    /// configuration directory.
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] when no configuration directory can be
    /// resolved for the current user.
    pub fn new() -> Result<Self, StoreError> {
        let base = dirs::config_dir()
            .ok_or_else(|| StoreError::Io("no user configuration directory".to_string()))?;
        Ok(Self::at_path(base.join("geni").join("token.json")))
    }

    /// Creates a store at an explicit path.
    #[must_use]
    pub const fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// The file the token is stored in.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn save(&self, token: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }
        let record = StoredToken {
            access_token: token.to_string(),
            saved_at: Utc::now(),
        };
        let payload =
            serde_json::to_vec_pretty(&record).map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(&self.path, payload)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))
    }

    async fn load(&self) -> Result<Option<String>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };
        let record: StoredToken = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(Some(record.access_token))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }
}

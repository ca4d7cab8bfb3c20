//! Browser launch port

use geni_domain::AuthError;

/// Port for opening a URL in the user's default browser.
///
/// The launch itself is fire-and-forget; implementations return once the
/// browser has been handed the URL, not when the user finishes with it.
pub trait Browser: Send + Sync {
    /// Opens `url` in the default browser.
    ///
    /// # Errors
    /// Returns [`AuthError::BrowserLaunch`] when no browser could be
    /// started.
    fn open(&self, url: &str) -> Result<(), AuthError>;
}

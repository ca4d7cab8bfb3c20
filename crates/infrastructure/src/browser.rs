//! System browser launcher.

use geni_application::Browser;
use geni_domain::AuthError;

/// Opens URLs in the user's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), AuthError> {
        tracing::debug!(%url, "launching system browser");
        webbrowser::open(url).map_err(|e| AuthError::BrowserLaunch(e.to_string()))
    }
}

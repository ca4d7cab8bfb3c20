//! Status check use case

use std::sync::Arc;
use tracing::debug;

use geni_domain::{ApiRequest, AuthStatus, StatusReport};

use super::call_api::CallApi;
use crate::session::SessionManager;

/// Identity endpoint used to probe token liveness.
const IDENTITY_PATH: &str = "/user";

/// Reports the session status, probing the service when a token is held.
#[derive(Clone)]
pub struct CheckStatus {
    call_api: CallApi,
    session: Arc<SessionManager>,
}

impl CheckStatus {
    /// Creates the use case.
    #[must_use]
    pub const fn new(call_api: CallApi, session: Arc<SessionManager>) -> Self {
        Self { call_api, session }
    }

    /// Checks the current status.
    ///
    /// With no token held the stored status is reported untouched. With a
    /// token, one identity call decides: an error reply clears the token
    /// and reports [`AuthStatus::Unknown`], a clean reply confirms
    /// [`AuthStatus::Authorized`]. Either way the change funnels through
    /// the session manager so the status event stays consistent.
    pub async fn execute(&self) -> StatusReport {
        if self.session.access_token().await.is_some() {
            let response = self.call_api.execute(IDENTITY_PATH, ApiRequest::get()).await;
            if let Some(error) = response.error() {
                debug!(%error, "liveness probe failed, resetting session");
                self.session.invalidate(AuthStatus::Unknown).await;
            } else {
                self.session.set_status(AuthStatus::Authorized).await;
            }
        }
        let session = self.session.snapshot().await;
        StatusReport {
            status: session.status,
            access_token: session.access_token,
        }
    }
}

//! Geni SDK demo - command line walkthrough
//!
//! Connects through the system browser, fetches the caller's profile, and
//! logs out. Requires `GENI_APP_ID`; `GENI_HOST` optionally points the
//! client at a different service host.

use geni::{AUTH_STATUS_CHANGE, ApiRequest, GeniClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let app_id =
        std::env::var("GENI_APP_ID").map_err(|_| "set GENI_APP_ID to your application id")?;
    let mut builder = GeniClient::builder().app_id(app_id);
    if let Ok(host) = std::env::var("GENI_HOST") {
        builder = builder.host(host);
    }
    let client = builder.build()?;

    client.events().subscribe(AUTH_STATUS_CHANGE, |status| {
        tracing::info!(%status, "session status changed");
    });

    tracing::info!(version = geni::VERSION, "starting authorization");
    let outcome = client.connect().await;
    if !outcome.is_authorized() {
        tracing::error!(error = ?outcome.error, "authorization did not complete");
        return Ok(());
    }

    let profile = client.api("/profile", ApiRequest::get()).await;
    match profile.error() {
        Some(error) => tracing::error!(%error, "profile fetch failed"),
        None => {
            let name = profile.data()["name"].as_str().unwrap_or("(unnamed)");
            tracing::info!(name, "fetched profile");
        }
    }

    client.logout().await;
    Ok(())
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

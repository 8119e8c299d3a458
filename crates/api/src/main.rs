//! Skyhook server binary entrypoint.
//!
//! Initialization order matters: configuration, registry, and allowlist all
//! load before the listener binds, so the service never accepts traffic it
//! cannot validate.

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use skyhook_common::config::AppConfig;
use skyhook_engine::allowlist::HookAllowlist;
use skyhook_engine::dispatch::{self, NotificationWorker};
use skyhook_engine::registry::RepoRegistry;
use skyhook_engine::router::EventRouter;
use skyhook_notifier::SlackNotifier;

use skyhook_api::routes::create_router;
use skyhook_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("skyhook_api=debug,skyhook_engine=debug,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting skyhook...");

    // Load configuration
    let config = AppConfig::from_env()?;

    // Load the repository registry (templates validate here)
    let registry = Arc::new(RepoRegistry::from_path(&config.repos_file)?);

    // Fetch the hook-origin allowlist. Fatal on failure: without it we
    // cannot tell GitHub from anyone else.
    let client = reqwest::Client::new();
    let allowlist = Arc::new(HookAllowlist::fetch(&client, &config.github_meta_url).await?);

    // Start the notification worker
    let notifier = Arc::new(SlackNotifier::new(
        config.slack_token.clone(),
        config.slack_api_url.clone(),
    ));
    let (jobs, job_rx) = dispatch::job_channel();
    tokio::spawn(NotificationWorker::new(job_rx, registry.clone(), notifier).run());

    // Build application state and router
    let state = AppState::new(allowlist, EventRouter::new(registry), jobs);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Webhook server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

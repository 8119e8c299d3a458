//! Shared application state for the Axum server.

use std::sync::Arc;

use skyhook_engine::allowlist::HookAllowlist;
use skyhook_engine::dispatch::JobQueue;
use skyhook_engine::router::EventRouter;

/// Application state shared across all route handlers via Axum `State`.
///
/// Everything here is either immutable after startup (allowlist, router's
/// registry) or safe for concurrent producers (the job queue), so handlers
/// never take a lock.
#[derive(Clone)]
pub struct AppState {
    pub allowlist: Arc<HookAllowlist>,
    pub router: EventRouter,
    pub jobs: JobQueue,
}

impl AppState {
    pub fn new(allowlist: Arc<HookAllowlist>, router: EventRouter, jobs: JobQueue) -> Self {
        Self {
            allowlist,
            router,
            jobs,
        }
    }
}

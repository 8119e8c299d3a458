//! The webhook endpoint — the URL GitHub delivers hooks to.
//!
//! Every rejection here is part of the wire contract (fixed status + JSON
//! body), so responses are built inline rather than going through an error
//! type. An accepted event is answered 202 immediately; delivery happens
//! later in the background worker.

use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

use skyhook_engine::router::Decision;

use crate::state::AppState;

/// Header GitHub uses to carry the event type.
const HEADER_EVENT: &str = "x-github-event";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(hook))
        // Backwards-compatible alias for existing hook configurations.
        .route("/hook", post(hook))
}

async fn hook(
    State(state): State<AppState>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // Only GitHub's published hook ranges may deliver events.
    if !state.allowlist.is_authorized(remote.ip()) {
        tracing::warn!(remote = %remote.ip(), "Rejected event from unauthorized address");
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "status": "you != GitHub" })),
        )
            .into_response();
    }

    let Some(event_type) = headers.get(HEADER_EVENT).and_then(|v| v.to_str().ok()) else {
        tracing::info!(remote = %remote.ip(), "Received a non-hook request");
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "status": "not a hook" })),
        )
            .into_response();
    };

    // An unparseable body routes like an empty one: the repository cannot
    // be identified, so the event is rejected as unauthorized.
    let payload: serde_json::Value = serde_json::from_slice(&body).unwrap_or_default();

    match state.router.route(event_type, &payload) {
        Decision::Pong => (StatusCode::OK, Json(json!({ "status": "pong" }))).into_response(),
        Decision::Unsupported(event) => {
            tracing::debug!(event_type = %event, "Unhandled event type");
            (
                StatusCode::NOT_IMPLEMENTED,
                Json(json!({ "status": "unhandled event", "event": event })),
            )
                .into_response()
        }
        Decision::UnauthorizedRepo(repo) => {
            tracing::warn!(repo = %repo, "Event for unregistered repository");
            (
                StatusCode::FORBIDDEN,
                Json(json!({ "status": "repo not allowed", "repo": repo })),
            )
                .into_response()
        }
        Decision::Accept(job) => {
            state.jobs.enqueue(job);
            (StatusCode::ACCEPTED, Json(json!({ "status": "handled" }))).into_response()
        }
    }
}

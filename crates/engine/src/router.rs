//! Event router — decides what an inbound webhook becomes.
//!
//! Routing is pure: it inspects the event type and payload and produces a
//! [`Decision`]. Enqueueing an accepted job is the HTTP handler's
//! responsibility, which keeps this logic directly testable.

use std::sync::Arc;

use serde_json::Value;

use skyhook_common::types::{EventKind, NotificationJob};

use crate::registry::RepoRegistry;

/// Outcome of routing one inbound event.
#[derive(Debug, Clone)]
pub enum Decision {
    /// GitHub ping — answer pong, nothing to do
    Pong,
    /// Event type we do not relay
    Unsupported(String),
    /// Recognized event for a repository not in the registry
    UnauthorizedRepo(String),
    /// Accepted: a job ready to enqueue
    Accept(NotificationJob),
}

/// Routes inbound events against the repository registry.
#[derive(Clone)]
pub struct EventRouter {
    registry: Arc<RepoRegistry>,
}

impl EventRouter {
    pub fn new(registry: Arc<RepoRegistry>) -> Self {
        Self { registry }
    }

    /// Route an event by type and payload.
    pub fn route(&self, event_type: &str, payload: &Value) -> Decision {
        let kind = match event_type {
            "ping" => return Decision::Pong,
            "watch" => EventKind::Star,
            "fork" => EventKind::Fork,
            other => return Decision::Unsupported(other.to_string()),
        };

        let full_name = payload
            .pointer("/repository/full_name")
            .and_then(|v| v.as_str())
            .unwrap_or("");

        if !self.registry.contains(full_name) {
            return Decision::UnauthorizedRepo(full_name.to_string());
        }

        let repo_url = payload
            .pointer("/repository/html_url")
            .and_then(|v| v.as_str())
            .unwrap_or("");
        let actor_name = payload
            .pointer("/sender/login")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        let actor_url = payload
            .pointer("/sender/html_url")
            .and_then(|v| v.as_str())
            .unwrap_or("");
        let count_field = match kind {
            EventKind::Star => "/repository/stargazers_count",
            EventKind::Fork => "/repository/forks",
        };
        let count = payload
            .pointer(count_field)
            .and_then(|v| v.as_u64())
            .unwrap_or(0);

        Decision::Accept(NotificationJob::new(
            kind, full_name, repo_url, actor_name, actor_url, count,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_router() -> EventRouter {
        let registry =
            RepoRegistry::from_json(r##"{"acme/widgets": {"channel": "#releases"}}"##).unwrap();
        EventRouter::new(Arc::new(registry))
    }

    fn watch_payload() -> Value {
        json!({
            "repository": {
                "full_name": "acme/widgets",
                "html_url": "https://github.com/acme/widgets",
                "stargazers_count": 42,
                "forks": 9
            },
            "sender": {
                "login": "alice",
                "html_url": "https://github.com/alice"
            }
        })
    }

    #[test]
    fn test_ping_routes_to_pong() {
        let router = make_router();
        assert!(matches!(
            router.route("ping", &Value::Null),
            Decision::Pong
        ));
    }

    #[test]
    fn test_unsupported_event_type() {
        let router = make_router();
        match router.route("push", &watch_payload()) {
            Decision::Unsupported(event) => assert_eq!(event, "push"),
            other => panic!("expected Unsupported, got {:?}", other),
        }
    }

    #[test]
    fn test_watch_builds_star_job() {
        let router = make_router();
        match router.route("watch", &watch_payload()) {
            Decision::Accept(job) => {
                assert_eq!(job.kind, EventKind::Star);
                assert_eq!(job.repo_full_name, "acme/widgets");
                assert_eq!(job.actor_name, "alice");
                assert_eq!(job.actor_url, "https://github.com/alice");
                assert_eq!(job.count, 42);
            }
            other => panic!("expected Accept, got {:?}", other),
        }
    }

    #[test]
    fn test_fork_builds_fork_job_with_fork_count() {
        let router = make_router();
        match router.route("fork", &watch_payload()) {
            Decision::Accept(job) => {
                assert_eq!(job.kind, EventKind::Fork);
                assert_eq!(job.count, 9);
            }
            other => panic!("expected Accept, got {:?}", other),
        }
    }

    #[test]
    fn test_unregistered_repo_rejected() {
        let router = make_router();
        let payload = json!({
            "repository": { "full_name": "acme/gadgets" },
            "sender": { "login": "alice" }
        });
        match router.route("watch", &payload) {
            Decision::UnauthorizedRepo(repo) => assert_eq!(repo, "acme/gadgets"),
            other => panic!("expected UnauthorizedRepo, got {:?}", other),
        }
    }

    #[test]
    fn test_payload_without_repository_rejected() {
        let router = make_router();
        match router.route("watch", &Value::Null) {
            Decision::UnauthorizedRepo(repo) => assert_eq!(repo, ""),
            other => panic!("expected UnauthorizedRepo, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let router = make_router();
        let payload = json!({
            "repository": { "full_name": "acme/widgets" }
        });
        match router.route("watch", &payload) {
            Decision::Accept(job) => {
                assert_eq!(job.actor_name, "unknown");
                assert_eq!(job.count, 0);
            }
            other => panic!("expected Accept, got {:?}", other),
        }
    }
}

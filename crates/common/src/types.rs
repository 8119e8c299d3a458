use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kinds of repository events that produce a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Star,
    Fork,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Star => write!(f, "star"),
            EventKind::Fork => write!(f, "fork"),
        }
    }
}

/// A normalized notification ready for asynchronous delivery.
///
/// Built by the event router from an accepted webhook payload, consumed
/// exactly once by the notification worker, then discarded. Only ever
/// created for repositories present in the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationJob {
    /// Job identity, used in worker-side diagnostics
    pub id: Uuid,
    pub kind: EventKind,
    /// Repository full name, e.g. "octocat/hello-world"
    pub repo_full_name: String,
    pub repo_url: String,
    /// Login of the user who starred or forked
    pub actor_name: String,
    pub actor_url: String,
    /// Stargazer count for star events, fork count for fork events
    pub count: u64,
    pub accepted_at: DateTime<Utc>,
}

impl NotificationJob {
    pub fn new(
        kind: EventKind,
        repo_full_name: impl Into<String>,
        repo_url: impl Into<String>,
        actor_name: impl Into<String>,
        actor_url: impl Into<String>,
        count: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            repo_full_name: repo_full_name.into(),
            repo_url: repo_url.into(),
            actor_name: actor_name.into(),
            actor_url: actor_url.into(),
            count,
            accepted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_display() {
        assert_eq!(EventKind::Star.to_string(), "star");
        assert_eq!(EventKind::Fork.to_string(), "fork");
    }

    #[test]
    fn test_job_ids_are_unique() {
        let a = NotificationJob::new(EventKind::Star, "a/b", "u", "alice", "au", 1);
        let b = NotificationJob::new(EventKind::Star, "a/b", "u", "alice", "au", 1);
        assert_ne!(a.id, b.id);
    }
}

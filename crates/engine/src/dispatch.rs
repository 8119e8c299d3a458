//! Notification queue and delivery worker.
//!
//! The queue is the only mutable structure shared between the request path
//! and the worker. Producers enqueue without blocking or performing I/O, so
//! the webhook endpoint answers quickly regardless of Slack's health. One
//! worker drains the queue in FIFO order and delivers one message at a time;
//! a failed delivery is logged and dropped, never retried, and never stops
//! the worker. A slow downstream therefore delays later notifications — an
//! accepted tradeoff at webhook volumes, not a correctness issue.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;

use skyhook_common::types::{EventKind, NotificationJob};
use skyhook_notifier::{Notifier, NotifyError};

use crate::registry::RepoRegistry;

/// Errors raised while delivering a single job.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The job's repository vanished from the registry. The router only
    /// accepts registered repositories, so this indicates a wiring bug.
    #[error("repository '{0}' is not registered")]
    UnknownRepository(String),

    #[error(transparent)]
    Notify(#[from] NotifyError),
}

/// Receiving half of the job channel, consumed by the worker.
pub type JobReceiver = mpsc::UnboundedReceiver<NotificationJob>;

/// Producer handle for the notification queue. Cheap to clone; safe to use
/// from concurrent request handlers.
#[derive(Clone)]
pub struct JobQueue {
    tx: mpsc::UnboundedSender<NotificationJob>,
}

impl JobQueue {
    /// Enqueue a job. Never blocks.
    ///
    /// Sending only fails once the worker has gone away, which happens at
    /// shutdown; the job is logged and dropped in that case.
    pub fn enqueue(&self, job: NotificationJob) {
        tracing::debug!(
            job_id = %job.id,
            kind = %job.kind,
            repo = %job.repo_full_name,
            "Enqueueing notification job"
        );
        if let Err(e) = self.tx.send(job) {
            tracing::warn!(
                job_id = %e.0.id,
                "Worker is gone; dropping notification job"
            );
        }
    }
}

/// Create the job channel: a producer handle plus the worker's receiver.
pub fn job_channel() -> (JobQueue, JobReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (JobQueue { tx }, rx)
}

/// Single background worker that delivers queued notifications in order.
pub struct NotificationWorker {
    rx: JobReceiver,
    registry: Arc<RepoRegistry>,
    notifier: Arc<dyn Notifier>,
}

impl NotificationWorker {
    pub fn new(rx: JobReceiver, registry: Arc<RepoRegistry>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            rx,
            registry,
            notifier,
        }
    }

    /// Drain the queue for the lifetime of the process.
    ///
    /// Suspends while the queue is empty. Returns only once every producer
    /// handle has been dropped.
    pub async fn run(mut self) {
        tracing::info!("Notification worker started");

        while let Some(job) = self.rx.recv().await {
            if let Err(e) = self.deliver(&job).await {
                tracing::error!(
                    job_id = %job.id,
                    kind = %job.kind,
                    repo = %job.repo_full_name,
                    actor = %job.actor_name,
                    error = %e,
                    "Notification delivery failed"
                );
            }
        }

        tracing::info!("Notification worker stopped");
    }

    /// Deliver one job: resolve config, render the message, send.
    async fn deliver(&self, job: &NotificationJob) -> Result<(), DispatchError> {
        let config = self
            .registry
            .resolve(&job.repo_full_name)
            .ok_or_else(|| DispatchError::UnknownRepository(job.repo_full_name.clone()))?;

        let template = match job.kind {
            EventKind::Star => &config.star_template,
            EventKind::Fork => &config.fork_template,
        };
        let message = template.render(job);

        self.notifier.send(&config.channel, &message).await?;

        tracing::info!(
            job_id = %job.id,
            kind = %job.kind,
            repo = %job.repo_full_name,
            channel = %config.channel,
            "Notification delivered"
        );

        Ok(())
    }
}

//! Chat-notification capability consumed by the dispatch worker.
//!
//! [`Notifier`] is the seam between the delivery pipeline and any concrete
//! chat system; [`SlackNotifier`] is the production implementation.

pub mod slack;

use async_trait::async_trait;
use thiserror::Error;

pub use slack::SlackNotifier;

/// Errors raised while sending a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The chat API answered but refused the message
    #[error("chat API rejected message: {detail}")]
    Api { detail: String },
}

/// Sends a formatted text message to a named channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, channel: &str, message: &str) -> Result<(), NotifyError>;
}
